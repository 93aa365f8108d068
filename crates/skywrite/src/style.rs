//! Brush settings and style providers
//!
//! A style provider turns a raw brush-tip position into a [`CurveSample`].
//! "Drawing styles" can vary attributes such as color or width as the curve
//! is drawn; the providers here apply the brush settings as-is.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::extrude::MaterialProperties;
use crate::types::CurveSample;

/// Default solid tube diameter in meters
pub const DEFAULT_SOLID_THICKNESS: f32 = 0.005;

/// Default sparkle particle launch speed
pub const DEFAULT_SPARKLE_INITIAL_SPEED: f32 = 0.012;

/// Default sparkle particle size
pub const DEFAULT_SPARKLE_SIZE: f32 = 0.0002;

/// Which generator a stroke uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrushKind {
    #[default]
    Solid,
    Sparkle,
}

/// Settings for the extruded tube brush
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidBrushSettings {
    /// Tube diameter in meters
    pub thickness: f32,
    /// Linear RGB
    pub color: [f32; 3],
    pub roughness: f32,
    pub metallic: f32,
}

impl Default for SolidBrushSettings {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_SOLID_THICKNESS,
            color: [1.0, 1.0, 1.0],
            roughness: 0.5,
            metallic: 0.0,
        }
    }
}

impl SolidBrushSettings {
    pub fn material(&self) -> MaterialProperties {
        MaterialProperties {
            roughness: self.roughness.clamp(0.0, 1.0),
            metallic: self.metallic.clamp(0.0, 1.0),
        }
    }
}

/// Settings for the particle trail brush
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleBrushSettings {
    pub initial_speed: f32,
    pub size: f32,
    /// Linear RGB
    pub color: [f32; 3],
}

impl Default for SparkleBrushSettings {
    fn default() -> Self {
        Self {
            initial_speed: DEFAULT_SPARKLE_INITIAL_SPEED,
            size: DEFAULT_SPARKLE_SIZE,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Brush state read at the moment a stroke begins
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    pub kind: BrushKind,
    pub solid: SolidBrushSettings,
    pub sparkle: SparkleBrushSettings,
}

/// Maps input positions to solid tube samples
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidBrushStyleProvider;

impl SolidBrushStyleProvider {
    pub fn style_input(
        &self,
        position: Vec3,
        speed: f32,
        time: f32,
        settings: &SolidBrushSettings,
    ) -> CurveSample {
        let mut sample = CurveSample::new(
            position,
            settings.thickness.max(0.0),
            Vec3::from_array(settings.color),
        );
        sample.speed = speed;
        sample.time = time;
        sample
    }
}

/// Maps input positions to sparkle particles
#[derive(Debug, Clone, Copy, Default)]
pub struct SparkleBrushStyleProvider;

impl SparkleBrushStyleProvider {
    pub fn style_input(
        &self,
        position: Vec3,
        speed: f32,
        time: f32,
        settings: &SparkleBrushSettings,
    ) -> CurveSample {
        let mut sample = CurveSample::new(
            position,
            settings.size.max(0.0),
            Vec3::from_array(settings.color),
        );
        sample.speed = speed;
        sample.time = time;
        sample.initial_speed = settings.initial_speed;
        sample
    }
}

/// Style frozen for the lifetime of one stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeStyle {
    Solid(SolidBrushSettings),
    Sparkle(SparkleBrushSettings),
}

impl StrokeStyle {
    /// Capture the style for the brush kind currently selected
    pub fn from_settings(settings: &BrushSettings) -> Self {
        match settings.kind {
            BrushKind::Solid => Self::Solid(settings.solid),
            BrushKind::Sparkle => Self::Sparkle(settings.sparkle),
        }
    }

    pub fn kind(&self) -> BrushKind {
        match self {
            Self::Solid(_) => BrushKind::Solid,
            Self::Sparkle(_) => BrushKind::Sparkle,
        }
    }

    pub fn style_input(&self, position: Vec3, speed: f32, time: f32) -> CurveSample {
        match self {
            Self::Solid(settings) => {
                SolidBrushStyleProvider.style_input(position, speed, time, settings)
            }
            Self::Sparkle(settings) => {
                SparkleBrushStyleProvider.style_input(position, speed, time, settings)
            }
        }
    }
}
