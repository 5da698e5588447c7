// error.rs - Engine error types
//
// Nothing here is fatal to the page: the host logs the message and skips the effect.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from normalising a host-supplied triangle mesh
#[derive(Error, Debug, PartialEq)]
pub enum MeshError {
    #[error("mesh has no vertices")]
    Empty,

    #[error("position buffer length {0} is not a whole number of triangles")]
    Misaligned(usize),

    #[error("non-finite coordinate at index {0}")]
    NonFinite(usize),

    #[error("mesh bounding box has zero size")]
    Degenerate,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),
}

impl From<EngineError> for JsValue {
    fn from(e: EngineError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
