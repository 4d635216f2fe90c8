use crate::dom::Document;
use crate::events::RequestEvents;
use crate::models::{HandleOutcome, ReplayEvent, ReplaySummary, RequestCompleted};
use tracing::{info, warn};

/// Feeds recorded completions through `events`, in order, against `document`.
pub fn replay(
    document: &mut Document,
    recorded: &[ReplayEvent],
    events: &RequestEvents<Document>,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for event in recorded {
        let Some(target) = document.element_by_id(&event.target) else {
            warn!("no element with id {:?}, skipping event", event.target);
            summary.unresolved += 1;
            continue;
        };

        let completed = RequestCompleted {
            target,
            status: event.status,
            body: event.body.clone(),
        };
        for outcome in events.dispatch(document, &completed) {
            tally(&mut summary, &outcome);
        }
        document.compact();
    }

    info!(
        "replayed {} events: {} applied, {} rejected, {} ignored, {} failed, {} unresolved",
        recorded.len(),
        summary.applied,
        summary.rejected,
        summary.ignored,
        summary.failed,
        summary.unresolved
    );
    summary
}

fn tally(summary: &mut ReplaySummary, outcome: &HandleOutcome) {
    let slot = match outcome {
        HandleOutcome::Applied { .. } => &mut summary.applied,
        HandleOutcome::Rejected { .. } => &mut summary.rejected,
        HandleOutcome::Ignored => &mut summary.ignored,
        HandleOutcome::Failed(_) => &mut summary.failed,
    };
    *slot += 1;
}
