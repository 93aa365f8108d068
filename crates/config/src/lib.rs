//! Shared configuration for Skywrite
//!
//! This crate is the single source of truth for the tunables of stroke
//! capture, tube extrusion and canvas bounds. Every field has
//! a default, so a partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thumb-to-index distance (meters) below which a hand counts as pinched
pub const DEFAULT_PINCH_THRESHOLD: f32 = 0.015;

/// Vertices per extruded ring
pub const DEFAULT_RING_VERTEX_COUNT: u32 = 8;

/// Segments shorter than this (meters) do not produce a new ring
pub const DEFAULT_MIN_SEGMENT_LENGTH: f32 = 1.0e-5;

/// Default canvas half extents (meters)
pub const DEFAULT_CANVAS_HALF_EXTENTS: [f32; 3] = [1.0, 1.0, 1.0];

/// Smallest ring that still encloses a volume
pub const MIN_RING_VERTEX_COUNT: u32 = 3;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Axis-aligned drawing volume, in the same space as hand input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Center of the volume
    pub center: [f32; 3],
    /// Half size along each axis
    pub half_extents: [f32; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0, 0.0],
            half_extents: DEFAULT_CANVAS_HALF_EXTENTS,
        }
    }
}

/// Stroke capture and meshing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Pinch distance threshold in meters
    pub pinch_threshold: f32,
    /// Vertices per tube ring
    pub ring_vertex_count: u32,
    /// Degenerate segment guard in meters
    pub min_segment_length: f32,
    /// Keep the newest sample provisional and smooth it once its successor arrives
    pub tail_smoothing: bool,
    /// Drawing volume
    pub canvas: CanvasConfig,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            ring_vertex_count: DEFAULT_RING_VERTEX_COUNT,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
            tail_smoothing: false,
            canvas: CanvasConfig::default(),
        }
    }
}

impl DrawingConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to pretty JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pinch_threshold > 0.0) {
            return Err(ConfigError::Invalid {
                field: "pinch_threshold",
                reason: format!("must be positive, got {}", self.pinch_threshold),
            });
        }
        if self.ring_vertex_count < MIN_RING_VERTEX_COUNT {
            return Err(ConfigError::Invalid {
                field: "ring_vertex_count",
                reason: format!(
                    "must be at least {}, got {}",
                    MIN_RING_VERTEX_COUNT, self.ring_vertex_count
                ),
            });
        }
        if !(self.min_segment_length >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "min_segment_length",
                reason: format!("must be non-negative, got {}", self.min_segment_length),
            });
        }
        if self.canvas.half_extents.iter().any(|e| !(*e >= 0.0)) {
            return Err(ConfigError::Invalid {
                field: "canvas.half_extents",
                reason: format!("must be non-negative, got {:?}", self.canvas.half_extents),
            });
        }
        Ok(())
    }
}
