//! Brush generators
//!
//! Both stroke engines share one call contract, [`StrokeGenerator`], without
//! sharing an implementation: the extruder is append-only and cap-aware, the
//! sparkle generator is append-only with independent quads. A
//! [`BrushGenerator`] picks one of them when a stroke begins and keeps it for
//! the stroke's lifetime.

use skywrite_config::DrawingConfig;

use crate::extrude::CurveExtruder;
use crate::mesh::MeshSnapshot;
use crate::sparkle::SparkleMeshGenerator;
use crate::style::{BrushKind, StrokeStyle};
use crate::types::{CurveSample, SolidVertex, SparkleVertex};

/// Common contract for stroke mesh generators
pub trait StrokeGenerator {
    /// Reset sample and mesh state for a new stroke
    fn begin_new_stroke(&mut self);

    /// Append samples in order
    fn append(&mut self, samples: &[CurveSample]);

    /// Remove up to `count` trailing samples and their geometry
    fn remove_last(&mut self, count: usize);

    /// Freeze the stroke, emitting any closing geometry
    fn finish(&mut self);

    fn samples(&self) -> &[CurveSample];

    fn is_finished(&self) -> bool;

    fn sample_count(&self) -> usize {
        self.samples().len()
    }
}

impl StrokeGenerator for CurveExtruder {
    fn begin_new_stroke(&mut self) {
        CurveExtruder::begin_new_stroke(self);
    }

    fn append(&mut self, samples: &[CurveSample]) {
        CurveExtruder::append(self, samples);
    }

    fn remove_last(&mut self, count: usize) {
        CurveExtruder::remove_last(self, count);
    }

    fn finish(&mut self) {
        CurveExtruder::finish(self);
    }

    fn samples(&self) -> &[CurveSample] {
        CurveExtruder::samples(self)
    }

    fn is_finished(&self) -> bool {
        CurveExtruder::is_finished(self)
    }
}

impl StrokeGenerator for SparkleMeshGenerator {
    fn begin_new_stroke(&mut self) {
        SparkleMeshGenerator::begin_new_stroke(self);
    }

    fn append(&mut self, samples: &[CurveSample]) {
        SparkleMeshGenerator::append(self, samples);
    }

    fn remove_last(&mut self, count: usize) {
        SparkleMeshGenerator::remove_last(self, count);
    }

    fn finish(&mut self) {
        SparkleMeshGenerator::finish(self);
    }

    fn samples(&self) -> &[CurveSample] {
        SparkleMeshGenerator::samples(self)
    }

    fn is_finished(&self) -> bool {
        SparkleMeshGenerator::is_finished(self)
    }
}

/// Mesh snapshot from either generator
#[derive(Debug)]
pub enum MeshUpdate<'a> {
    Solid(MeshSnapshot<'a, SolidVertex>),
    Sparkle(MeshSnapshot<'a, SparkleVertex>),
}

impl MeshUpdate<'_> {
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Solid(mesh) => mesh.vertex_count(),
            Self::Sparkle(mesh) => mesh.vertex_count(),
        }
    }

    pub fn indices(&self) -> &[u32] {
        match self {
            Self::Solid(mesh) => mesh.indices,
            Self::Sparkle(mesh) => mesh.indices,
        }
    }
}

/// The generator chosen for one stroke
#[derive(Debug, Clone)]
pub enum BrushGenerator {
    Solid(CurveExtruder),
    Sparkle(SparkleMeshGenerator),
}

impl BrushGenerator {
    /// Build the generator matching a frozen stroke style
    pub fn for_style(style: &StrokeStyle, config: &DrawingConfig) -> Self {
        match style {
            StrokeStyle::Solid(settings) => Self::Solid(
                CurveExtruder::new(config.ring_vertex_count, config.min_segment_length)
                    .with_material(settings.material()),
            ),
            StrokeStyle::Sparkle(_) => Self::Sparkle(SparkleMeshGenerator::new()),
        }
    }

    pub fn kind(&self) -> BrushKind {
        match self {
            Self::Solid(_) => BrushKind::Solid,
            Self::Sparkle(_) => BrushKind::Sparkle,
        }
    }

    /// Current mesh, or `None` if nothing can be drawn yet
    pub fn update(&mut self) -> Option<MeshUpdate<'_>> {
        match self {
            Self::Solid(extruder) => extruder.update().map(MeshUpdate::Solid),
            Self::Sparkle(sparkle) => sparkle.update().map(MeshUpdate::Sparkle),
        }
    }

    fn inner(&self) -> &dyn StrokeGenerator {
        match self {
            Self::Solid(extruder) => extruder,
            Self::Sparkle(sparkle) => sparkle,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn StrokeGenerator {
        match self {
            Self::Solid(extruder) => extruder,
            Self::Sparkle(sparkle) => sparkle,
        }
    }
}

impl StrokeGenerator for BrushGenerator {
    fn begin_new_stroke(&mut self) {
        self.inner_mut().begin_new_stroke();
    }

    fn append(&mut self, samples: &[CurveSample]) {
        self.inner_mut().append(samples);
    }

    fn remove_last(&mut self, count: usize) {
        self.inner_mut().remove_last(count);
    }

    fn finish(&mut self) {
        self.inner_mut().finish();
    }

    fn samples(&self) -> &[CurveSample] {
        self.inner().samples()
    }

    fn is_finished(&self) -> bool {
        self.inner().is_finished()
    }
}
