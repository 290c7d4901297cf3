//! Error types. Everything crossing the wasm boundary is flattened into a
//! `JsValue` string, matching the `Result<(), JsValue>` entry points.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("target_count must be at least 1")]
    ZeroTarget,
    #[error("message list is empty")]
    NoMessages,
    #[error("max_rotation_deg must be within 0..=360, got {0}")]
    InvalidRotation(f64),
    #[error("{0}: color palette is empty")]
    EmptyPalette(&'static str),
    #[error("{effect}.{field}: min {min} is greater than max {max}")]
    InvertedRange { effect: &'static str, field: &'static str, min: f64, max: f64 },
    #[error("{effect}.{field}: bounds {min}..={max} must lie within ±{limit}")]
    SpanOutOfBounds { effect: &'static str, field: &'static str, min: f64, max: f64, limit: f64 },
    #[error("{sound} volume {volume} is outside 0..=1")]
    VolumeOutOfRange { sound: &'static str, volume: f64 },
    #[error("invalid config json: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
