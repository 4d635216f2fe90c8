use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt as _;

/// Plain text lines without timestamps, for sinks such as the browser console.
pub fn diagnostic_subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_writer(writer),
    )
}

#[cfg(test)]
mod tests {
    use crate::dom::Document;
    use crate::handlers::LikeResponseHandler;
    use crate::handlers::tests::{list_page, with_logs};
    use crate::models::{HandleOutcome, RequestCompleted};

    fn run(doc: &mut Document, target: &str, status: u16, body: &str) -> HandleOutcome {
        let target = doc.element_by_id(target).unwrap();
        LikeResponseHandler::default().handle(
            doc,
            &RequestCompleted {
                target,
                status,
                body: body.to_string(),
            },
        )
    }

    #[test]
    fn rejected_like_is_written_as_an_error_line() {
        let mut doc = list_page();

        let (outcome, logs) =
            with_logs(|| run(&mut doc, "like-1", 400, r#"{"error":"cannot like own post"}"#));

        assert!(matches!(outcome, HandleOutcome::Rejected { .. }));
        let line = logs.lines().next().unwrap();
        assert!(line.starts_with("ERROR"), "line: {line}");
        assert!(line.contains("like request rejected: cannot like own post"));
        assert!(!line.contains('\u{1b}'), "ansi escapes in {line:?}");
    }

    #[test]
    fn malformed_body_is_written_as_an_error_line() {
        let mut doc = list_page();

        let (_, logs) = with_logs(|| run(&mut doc, "like-2", 200, "<html>"));

        assert_eq!(logs.lines().count(), 1);
        assert!(logs.starts_with("ERROR"));
        assert!(logs.contains("error processing response"));
    }
}
