//! Error type shared by every layer; converted to a JS `Error` at the boundary.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("container is not laid out (measured {width}x{height}); attach and size it before initializing")]
    ContainerNotReady { width: f32, height: f32 },

    #[error("element must be attached to the document before it is tracked")]
    ElementDetached,

    #[error("element is already tracked")]
    AlreadyTracked,

    #[error("element has no measurable size ({width}x{height})")]
    DegenerateElement { width: f32, height: f32 },

    #[error("invalid physics config: {0}")]
    InvalidConfig(String),

    #[error("physics instance has been disposed")]
    Disposed,

    #[error("host error: {0}")]
    Host(String),
}

pub type Result<T, E = SyncError> = std::result::Result<T, E>;

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::InvalidConfig(e.to_string())
    }
}

impl From<JsValue> for SyncError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SyncError::Host(message)
    }
}

impl From<SyncError> for JsValue {
    fn from(e: SyncError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}
