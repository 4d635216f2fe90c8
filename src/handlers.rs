use crate::config::LikeMarkup;
use crate::dom::LikeDom;
use crate::errors::LikeError;
use crate::models::{
    ErrorPayload, HandleOutcome, LikeResponsePayload, PostContext, RequestCompleted,
};
use tracing::{debug, error};

/// Errors are logged and returned as [`HandleOutcome::Failed`], never rolled back.
#[derive(Debug, Clone, Default)]
pub struct LikeResponseHandler {
    markup: LikeMarkup,
}

impl LikeResponseHandler {
    pub fn new(markup: LikeMarkup) -> Self {
        Self { markup }
    }

    pub fn markup(&self) -> &LikeMarkup {
        &self.markup
    }

    pub fn is_like_button<D: LikeDom>(&self, dom: &D, element: &D::Element) -> bool {
        dom.has_class(element, &self.markup.button_class)
    }

    pub fn handle<D: LikeDom>(
        &self,
        dom: &mut D,
        event: &RequestCompleted<D::Element>,
    ) -> HandleOutcome {
        if !self.is_like_button(dom, &event.target) {
            return HandleOutcome::Ignored;
        }

        if event.status == self.markup.rejected_status {
            return match serde_json::from_str::<ErrorPayload>(&event.body) {
                Ok(payload) => {
                    error!("like request rejected: {}", payload.error);
                    HandleOutcome::Rejected {
                        message: payload.error,
                    }
                }
                Err(err) => failed(err.into()),
            };
        }

        match self.apply(dom, &event.target, &event.body) {
            Ok(outcome) => outcome,
            Err(err) => failed(err),
        }
    }

    /// Decides which secondary count the button feeds.
    pub fn post_context<D: LikeDom>(
        &self,
        dom: &D,
        button: &D::Element,
    ) -> Result<PostContext<D::Element>, LikeError> {
        Ok(match dom.closest(button, &self.markup.container_selector)? {
            Some(container) => PostContext::Container(container),
            None => PostContext::Detail,
        })
    }

    fn apply<D: LikeDom>(
        &self,
        dom: &mut D,
        button: &D::Element,
        body: &str,
    ) -> Result<HandleOutcome, LikeError> {
        let markup = &self.markup;
        let payload: LikeResponsePayload = serde_json::from_str(body)?;

        self.toggle(dom, button, payload.liked)?;

        let count = payload.likes_count.to_string();
        let count_el = require(
            dom.query_selector(button, &markup.count_selector)?,
            &markup.count_selector,
        )?;
        dom.set_text_content(&count_el, &count)?;

        let context = self.post_context(dom, button)?;
        match &context {
            PostContext::Container(container) => {
                let secondary = require(
                    dom.query_selector(container, &markup.secondary_count_selector)?,
                    &markup.secondary_count_selector,
                )?;
                dom.set_text_content(&secondary, &markup.list_label(payload.likes_count))?;
            }
            PostContext::Detail => {
                let secondary = require(
                    dom.document_query_selector(&markup.secondary_count_selector)?,
                    &markup.secondary_count_selector,
                )?;
                dom.set_text_content(&secondary, &count)?;
            }
        }

        debug!(
            "like state applied: liked={} likes_count={}",
            payload.liked, payload.likes_count
        );

        Ok(HandleOutcome::Applied {
            liked: payload.liked,
            likes_count: payload.likes_count,
            view: context.view(),
        })
    }

    fn toggle<D: LikeDom>(&self, dom: &mut D, button: &D::Element, liked: bool) -> Result<(), LikeError> {
        let markup = &self.markup;
        let fill = if liked {
            dom.add_class(button, &markup.active_class)?;
            dom.remove_class(button, &markup.inactive_class)?;
            &markup.solid_fill
        } else {
            dom.remove_class(button, &markup.active_class)?;
            dom.add_class(button, &markup.inactive_class)?;
            &markup.empty_fill
        };

        let icon = require(
            dom.query_selector(button, &markup.icon_selector)?,
            &markup.icon_selector,
        )?;
        dom.set_attribute(&icon, &markup.fill_attribute, fill)
    }
}

fn require<E>(found: Option<E>, selector: &str) -> Result<E, LikeError> {
    found.ok_or_else(|| LikeError::missing(selector))
}

fn failed(err: LikeError) -> HandleOutcome {
    error!("{err}");
    HandleOutcome::Failed(err)
}
