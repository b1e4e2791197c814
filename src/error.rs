//! Startup failures. Rendering itself has no error path.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GardenError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("canvas #{0} not found")]
    CanvasNotFound(String),

    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("2d context unavailable")]
    ContextUnavailable,

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GardenError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GardenError::Js(format!("{:?}", value))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GardenError> for wasm_bindgen::JsValue {
    fn from(err: GardenError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
