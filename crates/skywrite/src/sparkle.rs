//! Sparkle trail generator
//!
//! Each sample becomes an independent camera-facing quad. There is no
//! connectivity between samples, so truncation never needs adjacency repair.

use tracing::debug;

use crate::mesh::{MeshBuffer, MeshSnapshot};
use crate::types::{CurveSample, SparkleVertex};

const QUAD_VERTEX_COUNT: usize = 4;
const QUAD_INDEX_COUNT: usize = 6;

/// Quad corners, counter-clockwise when facing the camera
const QUAD_CORNERS: [[f32; 2]; QUAD_VERTEX_COUNT] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_INDICES: [u32; QUAD_INDEX_COUNT] = [0, 1, 2, 0, 2, 3];

/// Builds one billboard quad per curve sample
#[derive(Debug, Clone, Default)]
pub struct SparkleMeshGenerator {
    samples: Vec<CurveSample>,
    buffer: MeshBuffer<SparkleVertex>,
    finished: bool,
}

impl SparkleMeshGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn begin_new_stroke(&mut self) {
        self.samples.clear();
        self.buffer.clear();
        self.finished = false;
    }

    pub fn append(&mut self, samples: &[CurveSample]) {
        if self.finished {
            debug!(
                "SparkleMeshGenerator::append: stroke finished, ignoring {} samples",
                samples.len()
            );
            return;
        }
        for sample in samples {
            let mut sample = *sample;
            sample.link(self.samples.last());
            self.push_quad(&sample);
            self.samples.push(sample);
        }
    }

    fn push_quad(&mut self, sample: &CurveSample) {
        let base = self.buffer.vertex_count() as u32;
        let position = sample.position.to_array();
        let color = sample.color.to_array();
        self.buffer
            .vertices
            .extend(QUAD_CORNERS.iter().map(|&corner| SparkleVertex {
                position,
                color,
                local_uv: corner,
                curve_uv: [sample.curve_distance, sample.width],
                initial_speed: sample.initial_speed,
            }));
        self.buffer
            .indices
            .extend(QUAD_INDICES.iter().map(|&i| base + i));
    }

    /// Drop the trailing `count` quads, clamped to the sample count
    pub fn remove_last(&mut self, count: usize) {
        if self.finished {
            debug!("SparkleMeshGenerator::remove_last: stroke finished, ignoring");
            return;
        }
        let new_len = self.samples.len() - count.min(self.samples.len());
        self.samples.truncate(new_len);
        self.buffer
            .truncate(new_len * QUAD_VERTEX_COUNT, new_len * QUAD_INDEX_COUNT);
    }

    /// Freeze the trail; sparkle strokes need no closing geometry
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn update(&mut self) -> Option<MeshSnapshot<'_, SparkleVertex>> {
        self.buffer.snapshot()
    }

    pub fn buffer(&self) -> &MeshBuffer<SparkleVertex> {
        &self.buffer
    }
}
