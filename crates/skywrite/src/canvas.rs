//! Drawing volume bounds

use glam::Vec3;

use skywrite_config::CanvasConfig;

/// Decides whether a brush tip is inside the drawable volume
pub trait CanvasBounds {
    fn contains(&self, point: Vec3) -> bool;
}

/// Axis-aligned box canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCanvas {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl BoxCanvas {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }
}

impl Default for BoxCanvas {
    fn default() -> Self {
        Self::from(&CanvasConfig::default())
    }
}

impl From<&CanvasConfig> for BoxCanvas {
    fn from(config: &CanvasConfig) -> Self {
        Self::new(
            Vec3::from_array(config.center),
            Vec3::from_array(config.half_extents),
        )
    }
}

impl CanvasBounds for BoxCanvas {
    fn contains(&self, point: Vec3) -> bool {
        let offset = (point - self.center).abs();
        offset.cmple(self.half_extents).all()
    }
}

/// Accepts every point
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl CanvasBounds for Unbounded {
    fn contains(&self, _point: Vec3) -> bool {
        true
    }
}
