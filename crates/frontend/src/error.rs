use wasm_bindgen::{JsCast, JsValue};
use web_sys::DomException;

/// `name` of the `DOMException` a fetch rejects with after `AbortController::abort`
pub const ABORT_ERROR: &str = "AbortError";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request was cancelled")]
    Cancelled,

    #[error("fetch failed: {0}")]
    Network(String),

    #[error("server responded with error: {0}")]
    Server(String),

    #[error("unable to deserialize response body: {0}")]
    Parse(String),
}

impl FetchError {
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// classify by JS error `name`, only `AbortError` means cancelled
    pub fn from_js_name(name: Option<&str>, message: String) -> Self {
        match name {
            Some(ABORT_ERROR) => Self::Cancelled,
            Some(name) => Self::Network([name, ": ", message.as_str()].concat()),
            None => Self::Network(message),
        }
    }
}

impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        if let Some(e) = value.dyn_ref::<DomException>() {
            Self::from_js_name(Some(e.name().as_str()), e.message())
        } else if let Some(e) = value.dyn_ref::<js_sys::Error>() {
            let name = String::from(e.name());
            Self::from_js_name(Some(name.as_str()), String::from(e.message()))
        } else {
            Self::from_js_name(None, value.as_string().unwrap_or(String::from("fetch error")))
        }
    }
}
