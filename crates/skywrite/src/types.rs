use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which hand produced an input or a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chirality {
    Left,
    Right,
}

/// What hand input is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Drawing,
    Placement,
}

/// Tracked finger positions for one hand in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputData {
    /// Thumb tip position
    pub thumb_tip: Vec3,
    /// Index finger tip position
    pub index_tip: Vec3,
}

impl InputData {
    pub fn new(thumb_tip: Vec3, index_tip: Vec3) -> Self {
        Self {
            thumb_tip,
            index_tip,
        }
    }

    /// The point between thumb and index finger, where the brush is
    pub fn brush_tip(&self) -> Vec3 {
        (self.thumb_tip + self.index_tip) * 0.5
    }

    pub fn pinch_distance(&self) -> f32 {
        self.thumb_tip.distance(self.index_tip)
    }

    /// True if the fingers are pinched close enough to draw
    pub fn is_drawing(&self, pinch_threshold: f32) -> bool {
        self.pinch_distance() < pinch_threshold
    }
}

/// A single styled point along a stroke
///
/// `tangent` and `curve_distance` are derived when the sample is appended to
/// a generator; style providers leave them zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Canvas-local position
    pub position: Vec3,
    /// Normalized direction of travel from the previous sample
    pub tangent: Vec3,
    /// Tube diameter (solid) or particle size (sparkle)
    pub width: f32,
    /// Linear RGB
    pub color: Vec3,
    /// Hand speed when the sample was taken, m/s
    pub speed: f32,
    /// Particle launch speed for sparkle trails
    pub initial_speed: f32,
    /// Seconds since the document started
    pub time: f32,
    /// Arc length from the stroke start
    pub curve_distance: f32,
}

impl CurveSample {
    pub fn new(position: Vec3, width: f32, color: Vec3) -> Self {
        Self {
            position,
            tangent: Vec3::ZERO,
            width,
            color,
            speed: 0.0,
            initial_speed: 0.0,
            time: 0.0,
            curve_distance: 0.0,
        }
    }

    /// Derive tangent and arc length from the preceding sample.
    ///
    /// A sample that coincides with its predecessor keeps the previous
    /// tangent so the direction of travel stays defined.
    pub(crate) fn link(&mut self, prev: Option<&CurveSample>) {
        let Some(prev) = prev else {
            self.tangent = Vec3::ZERO;
            self.curve_distance = 0.0;
            return;
        };
        let delta = self.position - prev.position;
        self.curve_distance = prev.curve_distance + delta.length();
        self.tangent = delta.try_normalize().unwrap_or(prev.tangent);
    }
}

/// Vertex layout for extruded solid strokes
///
/// Field order keeps every member 4-byte aligned with no padding.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct SolidVertex {
    pub position: [f32; 3],
    /// Outward surface normal
    pub normal: [f32; 3],
    /// Direction of travel along the curve
    pub bitangent: [f32; 3],
    /// X = arc length, Y = position around the ring (0..1)
    pub uv: [f32; 2],
    /// X = roughness, Y = metallic
    pub material_properties: [f32; 2],
    pub color: [f32; 3],
}

/// Vertex layout for sparkle particle quads
///
/// All four corners of a quad share a position; the shader expands them
/// towards the camera using `local_uv`.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct SparkleVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    /// Quad corner in [-1, 1]
    pub local_uv: [f32; 2],
    /// X = arc length since stroke start, Y = particle size
    pub curve_uv: [f32; 2],
    pub initial_speed: f32,
}
