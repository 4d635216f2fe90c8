use crate::config::LikeMarkup;
use crate::dom::LikeDom;
use crate::errors::LikeError;
use crate::handlers::LikeResponseHandler;
use crate::logging::diagnostic_subscriber;
use crate::models::RequestCompleted;
use js_sys::Reflect;
use std::sync::Once;
use tracing::error;
use tracing_subscriber::util::SubscriberInitExt as _;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, Document, Element, Event, XmlHttpRequest};

pub const AFTER_REQUEST_EVENT: &str = "htmx:afterRequest";

static CONSOLE_LOGGING: Once = Once::new();

/// Sends diagnostics and panics to the developer console.
pub fn init_console_logging() {
    CONSOLE_LOGGING.call_once(|| {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        // the host page may already own the global subscriber
        let _ = diagnostic_subscriber(tracing_web::MakeWebConsoleWriter::new()).try_init();
    });
}

pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn js_error(err: JsValue) -> LikeError {
    LikeError::processing(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl LikeDom for BrowserDom {
    type Element = Element;

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&mut self, element: &Element, class: &str) -> Result<(), LikeError> {
        element.class_list().add_1(class).map_err(js_error)
    }

    fn remove_class(&mut self, element: &Element, class: &str) -> Result<(), LikeError> {
        element.class_list().remove_1(class).map_err(js_error)
    }

    fn query_selector(&self, scope: &Element, selector: &str) -> Result<Option<Element>, LikeError> {
        scope.query_selector(selector).map_err(js_error)
    }

    fn closest(&self, element: &Element, selector: &str) -> Result<Option<Element>, LikeError> {
        element.closest(selector).map_err(js_error)
    }

    fn document_query_selector(&self, selector: &str) -> Result<Option<Element>, LikeError> {
        self.document.query_selector(selector).map_err(js_error)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) -> Result<(), LikeError> {
        element.set_attribute(name, value).map_err(js_error)
    }

    fn set_text_content(&mut self, element: &Element, text: &str) -> Result<(), LikeError> {
        element.set_text_content(Some(text));
        Ok(())
    }
}

/// Pulls `detail.target` and `detail.xhr` out of an htmx event. Events for
/// elements other than like buttons yield `None` before the xhr is touched.
fn completed_request(
    dom: &BrowserDom,
    handler: &LikeResponseHandler,
    event: &Event,
) -> Result<Option<RequestCompleted<Element>>, LikeError> {
    let Some(custom) = event.dyn_ref::<CustomEvent>() else {
        return Ok(None);
    };
    let detail = custom.detail();

    let target = Reflect::get(&detail, &JsValue::from_str("target")).map_err(js_error)?;
    let Ok(target) = target.dyn_into::<Element>() else {
        return Ok(None);
    };
    if !handler.is_like_button(dom, &target) {
        return Ok(None);
    }

    let xhr = Reflect::get(&detail, &JsValue::from_str("xhr"))
        .map_err(js_error)?
        .dyn_into::<XmlHttpRequest>()
        .map_err(js_error)?;
    let status = xhr.status().map_err(js_error)?;
    let body = xhr.response_text().map_err(js_error)?.unwrap_or_default();

    Ok(Some(RequestCompleted {
        target,
        status,
        body,
    }))
}

/// Registers the handler on `document.body` for the lifetime of the page.
pub fn install(document: Document, handler: LikeResponseHandler) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let mut dom = BrowserDom::new(document);

    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        match completed_request(&dom, &handler, &event) {
            Ok(Some(completed)) => {
                handler.handle(&mut dom, &completed);
            }
            Ok(None) => {}
            Err(err) => error!("{err}"),
        }
    });
    body.add_event_listener_with_callback(AFTER_REQUEST_EVENT, listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

/// JS entry point. `markup` optionally overrides class names as JSON.
#[wasm_bindgen(js_name = installLikeHandler)]
pub fn install_like_handler(markup: Option<String>) -> Result<(), JsValue> {
    init_console_logging();
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    let markup = match markup {
        Some(json) => serde_json::from_str::<LikeMarkup>(&json)
            .map_err(|err| JsValue::from_str(&err.to_string()))?,
        None => LikeMarkup::default(),
    };
    install(document, LikeResponseHandler::new(markup))
}
