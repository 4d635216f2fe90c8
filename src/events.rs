use crate::dom::LikeDom;
use crate::handlers::LikeResponseHandler;
use crate::models::{HandleOutcome, RequestCompleted};

/// Something interested in finished requests.
pub trait RequestListener<D: LikeDom> {
    fn on_request_completed(
        &self,
        dom: &mut D,
        event: &RequestCompleted<D::Element>,
    ) -> HandleOutcome;
}

impl<D: LikeDom> RequestListener<D> for LikeResponseHandler {
    fn on_request_completed(
        &self,
        dom: &mut D,
        event: &RequestCompleted<D::Element>,
    ) -> HandleOutcome {
        self.handle(dom, event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of request-completion listeners for one page.
pub struct RequestEvents<D: LikeDom> {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn RequestListener<D>>)>,
}

impl<D: LikeDom> Default for RequestEvents<D> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<D: LikeDom> RequestEvents<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl RequestListener<D> + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers `event` to every listener in subscription order.
    pub fn dispatch(&self, dom: &mut D, event: &RequestCompleted<D::Element>) -> Vec<HandleOutcome> {
        self.listeners
            .iter()
            .map(|(_, listener)| listener.on_request_completed(dom, event))
            .collect()
    }
}
