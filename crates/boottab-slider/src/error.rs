use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser glue.
///
/// Missing markup is not an error: absent elements measure as zero and the
/// controls simply stay hidden.
#[derive(Debug, Error)]
pub enum SliderError {
    #[error("window is not available")]
    NoWindow,

    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("failed to register listener: {0}")]
    Listener(String),

    #[error("invalid options: {0}")]
    Options(String),
}

impl SliderError {
    pub(crate) fn selector(selector: &str, err: JsValue) -> Self {
        SliderError::Selector {
            selector: selector.to_string(),
            message: describe(&err),
        }
    }
}

/// Best-effort text of a thrown JS value.
pub(crate) fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl From<SliderError> for JsValue {
    fn from(err: SliderError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
