//! Configuration errors
//!
//! The geometric core never fails; everything here is detected once at
//! startup while turning a `RoomConfig` into `GeometryParameters`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be at least 1, got {value}")]
    ZeroCount { name: &'static str, value: u32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error(
        "room heights must satisfy lower floor < mid floor < top passage < radius \
         (got {lower} < {mid} < {top} < {radius})"
    )]
    FloorOrder {
        lower: f32,
        mid: f32,
        top: f32,
        radius: f32,
    },

    #[error("tread depth {depth} does not fit inside radius {outer}")]
    TreadDepth { depth: f32, outer: f32 },

    #[error("failed to read room config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse room config: {0}")]
    Json(#[from] serde_json::Error),
}
