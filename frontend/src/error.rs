//! Error type for the frontend.
//!
//! DOM-facing functions keep returning `Result<_, JsValue>` like any other
//! wasm-bindgen code; `AppError` is what our own code produces and it turns
//! into a `JsValue` at that boundary.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("mount element #{0} not found")]
    MissingMountPoint(String),

    #[error("invalid router config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse router config: {0}")]
    Config(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl AppError {
    /// Wrap a raw JS error, keeping whatever text it carries.
    pub fn from_js(value: &JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        AppError::Dom(text)
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for AppError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
