//! Skywrite - hand-pinch 3D drawing core
//!
//! This crate turns tracked hand input into renderable stroke meshes:
//! - [`types`] - Input, curve sample and GPU vertex types
//! - [`extrude`] - Incremental tube extrusion with caps
//! - [`sparkle`] - Particle quad trails
//! - [`brush`] - Shared generator contract and per-stroke brush choice
//! - [`style`] - Brush settings and style providers
//! - [`mesh`] - Dirty-tracked mesh buffers and topology validation
//! - [`source`] - Per-hand stroke state machine
//! - [`history`] - Undo/redo over strokes and imports
//! - [`scene`] - Scene node arena with a change queue for the renderer
//! - [`document`] - Per-frame entry point and UI command handling

pub mod brush;
pub mod canvas;
pub mod commands;
pub mod document;
pub mod extrude;
pub mod history;
pub mod mesh;
pub mod scene;
pub mod source;
pub mod sparkle;
pub mod style;
pub mod types;

pub use brush::*;
pub use canvas::*;
pub use commands::*;
pub use document::*;
pub use extrude::*;
pub use history::*;
pub use mesh::*;
pub use scene::*;
pub use source::*;
pub use sparkle::*;
pub use style::*;
pub use types::*;

pub use skywrite_config::{CanvasConfig, ConfigError, DrawingConfig};
