//! Incremental curve-to-tube extrusion
//!
//! [`CurveExtruder`] turns a stream of [`CurveSample`]s into a tube mesh:
//! - one ring of `N` vertices per non-degenerate sample
//! - two side-wall triangles per ring edge between consecutive rings
//! - a start cap fan when the first ring appears, an end cap fan on finish
//!
//! Vertex layout is `[start cap center, end cap center, ring 0, ring 1, ...]`,
//! so the vertex count is `2 + rings × N` once any ring exists. Geometry is
//! appended in place; only the end cap center is rewritten, once, when the
//! stroke finishes.

mod frame;

use std::f32::consts::TAU;

use glam::Vec3;
use tracing::{debug, trace, warn};

use skywrite_config::{DEFAULT_MIN_SEGMENT_LENGTH, DEFAULT_RING_VERTEX_COUNT};

use crate::mesh::{MeshBuffer, MeshSnapshot, validate_closed};
use crate::types::{CurveSample, SolidVertex};

use frame::RingFrame;

/// Radius floor so a zero-width sample still yields non-degenerate walls
const MIN_RADIUS: f32 = 1.0e-5;

const START_CAP_CENTER: u32 = 0;
const END_CAP_CENTER: u32 = 1;
const CAP_CENTER_COUNT: usize = 2;

/// Surface parameters shared by every vertex of a solid stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    pub roughness: f32,
    pub metallic: f32,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            roughness: 0.5,
            metallic: 0.0,
        }
    }
}

/// Bookkeeping for one emitted ring
#[derive(Debug, Clone, Copy)]
struct RingRecord {
    /// Sample that owns this ring
    sample_index: usize,
    frame: RingFrame,
    center: Vec3,
    /// Index buffer length once this ring's triangles were written
    index_end: usize,
}

/// Builds a capped tube mesh from curve samples, one ring at a time.
#[derive(Debug, Clone)]
pub struct CurveExtruder {
    ring_vertex_count: u32,
    min_segment_length: f32,
    material: MaterialProperties,
    samples: Vec<CurveSample>,
    rings: Vec<RingRecord>,
    buffer: MeshBuffer<SolidVertex>,
    finished: bool,
}

impl Default for CurveExtruder {
    fn default() -> Self {
        Self::new(DEFAULT_RING_VERTEX_COUNT, DEFAULT_MIN_SEGMENT_LENGTH)
    }
}

impl CurveExtruder {
    /// Create an extruder. Ring resolution is clamped to at least 3.
    pub fn new(ring_vertex_count: u32, min_segment_length: f32) -> Self {
        Self {
            ring_vertex_count: ring_vertex_count.max(3),
            min_segment_length: min_segment_length.max(0.0),
            material: MaterialProperties::default(),
            samples: Vec::new(),
            rings: Vec::new(),
            buffer: MeshBuffer::new(),
            finished: false,
        }
    }

    pub fn with_material(mut self, material: MaterialProperties) -> Self {
        self.material = material;
        self
    }

    pub fn ring_vertex_count(&self) -> u32 {
        self.ring_vertex_count
    }

    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    /// Number of rings currently in the mesh
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Reset to an empty stroke
    pub fn begin_new_stroke(&mut self) {
        self.samples.clear();
        self.rings.clear();
        self.buffer.clear();
        self.finished = false;
    }

    /// Append samples, emitting a ring and side walls for each one that moves
    /// far enough from the previous ring.
    pub fn append(&mut self, samples: &[CurveSample]) {
        if self.finished {
            debug!(
                "CurveExtruder::append: stroke finished, ignoring {} samples",
                samples.len()
            );
            return;
        }
        for sample in samples {
            self.push_sample(*sample);
        }
    }

    fn push_sample(&mut self, mut sample: CurveSample) {
        sample.link(self.samples.last());
        let index = self.samples.len();
        self.samples.push(sample);

        let reference = match self.rings.last() {
            Some(ring) => ring.center,
            None => self.samples[0].position,
        };
        let delta = sample.position - reference;
        let length = delta.length();
        if index == 0 || length <= self.min_segment_length {
            if index > 0 {
                trace!(
                    "CurveExtruder: sample {} is {:.2e} from previous ring, no ring emitted",
                    index, length
                );
            }
            return;
        }
        let tangent = delta / length;

        let previous = self.rings.last().map(|ring| ring.frame);
        let frame = match previous {
            Some(previous) => previous.transported(tangent),
            None => {
                // The first ring waits for the first real segment to know its tangent.
                let frame = RingFrame::initial(tangent);
                self.emit_first_ring(frame);
                frame
            }
        };
        self.emit_ring(index, frame);
    }

    fn emit_first_ring(&mut self, frame: RingFrame) {
        let first = self.samples[0];
        let center_vertex = self.cap_center_vertex(&first, -frame.tangent);
        // Both cap centers are allocated up front; the end center moves on finish.
        self.buffer.vertices.push(center_vertex);
        self.buffer.vertices.push(center_vertex);

        let base = self.push_ring_vertices(&first, &frame);
        let n = self.ring_vertex_count;
        for j in 0..n {
            let k = (j + 1) % n;
            self.buffer
                .indices
                .extend([START_CAP_CENTER, base + k, base + j]);
        }

        self.rings.push(RingRecord {
            sample_index: 0,
            frame,
            center: first.position,
            index_end: self.buffer.index_count(),
        });
    }

    fn emit_ring(&mut self, sample_index: usize, frame: RingFrame) {
        let sample = self.samples[sample_index];
        let n = self.ring_vertex_count;
        let previous_base = self.ring_base(self.rings.len() - 1);
        let base = self.push_ring_vertices(&sample, &frame);

        for j in 0..n {
            let k = (j + 1) % n;
            let (a_j, a_k) = (previous_base + j, previous_base + k);
            let (b_j, b_k) = (base + j, base + k);
            self.buffer.indices.extend([a_j, a_k, b_j, a_k, b_k, b_j]);
        }

        self.rings.push(RingRecord {
            sample_index,
            frame,
            center: sample.position,
            index_end: self.buffer.index_count(),
        });
    }

    /// First vertex index of ring `ring`
    fn ring_base(&self, ring: usize) -> u32 {
        (CAP_CENTER_COUNT + ring * self.ring_vertex_count as usize) as u32
    }

    fn push_ring_vertices(&mut self, sample: &CurveSample, frame: &RingFrame) -> u32 {
        let base = self.buffer.vertex_count() as u32;
        let n = self.ring_vertex_count;
        let radius = (sample.width * 0.5).max(MIN_RADIUS);
        for j in 0..n {
            let around = j as f32 / n as f32;
            let radial = frame.radial(around * TAU);
            self.buffer.vertices.push(SolidVertex {
                position: (sample.position + radial * radius).to_array(),
                normal: radial.to_array(),
                bitangent: frame.tangent.to_array(),
                uv: [sample.curve_distance, around],
                material_properties: [self.material.roughness, self.material.metallic],
                color: sample.color.to_array(),
            });
        }
        base
    }

    fn cap_center_vertex(&self, sample: &CurveSample, facing: Vec3) -> SolidVertex {
        SolidVertex {
            position: sample.position.to_array(),
            normal: facing.to_array(),
            bitangent: facing.any_orthonormal_vector().to_array(),
            uv: [sample.curve_distance, 0.0],
            material_properties: [self.material.roughness, self.material.metallic],
            color: sample.color.to_array(),
        }
    }

    /// Drop the trailing `count` samples and every ring derived from them.
    ///
    /// `count` is clamped to the number of samples. The first ring depends on
    /// the second ring's tangent, so it goes too once it would stand alone.
    pub fn remove_last(&mut self, count: usize) {
        if self.finished {
            debug!("CurveExtruder::remove_last: stroke finished, ignoring");
            return;
        }
        let count = count.min(self.samples.len());
        if count == 0 {
            return;
        }
        let new_len = self.samples.len() - count;
        self.samples.truncate(new_len);

        while self
            .rings
            .last()
            .is_some_and(|ring| ring.sample_index >= new_len)
        {
            self.rings.pop();
        }
        if self.rings.len() == 1 {
            self.rings.clear();
        }

        let (vertex_count, index_count) = match self.rings.last() {
            Some(ring) => (self.ring_base(self.rings.len()) as usize, ring.index_end),
            None => (0, 0),
        };
        self.buffer.truncate(vertex_count, index_count);
        trace!(
            "CurveExtruder::remove_last: removed {} samples, {} rings remain",
            count,
            self.rings.len()
        );
    }

    /// Close the tube with an end cap and freeze the geometry.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        let Some(last) = self.rings.last().copied() else {
            debug!(
                "CurveExtruder::finish: {} samples, no geometry",
                self.samples.len()
            );
            return;
        };
        let sample = self.samples[last.sample_index];
        let center = self.cap_center_vertex(&sample, last.frame.tangent);
        self.buffer.vertices.set(END_CAP_CENTER as usize, center);

        let base = self.ring_base(self.rings.len() - 1);
        let n = self.ring_vertex_count;
        for j in 0..n {
            let k = (j + 1) % n;
            self.buffer
                .indices
                .extend([END_CAP_CENTER, base + j, base + k]);
        }

        debug!(
            "CurveExtruder::finish: {} samples, {} rings, {} triangles",
            self.samples.len(),
            self.rings.len(),
            self.buffer.index_count() / 3
        );

        if cfg!(debug_assertions) {
            let positions: Vec<Vec3> = self
                .buffer
                .vertices()
                .iter()
                .map(|v| Vec3::from_array(v.position))
                .collect();
            if let Err(err) = validate_closed(&positions, self.buffer.indices(), 0.0) {
                warn!("CurveExtruder::finish: tube is not closed: {}", err);
            }
        }
    }

    /// Current mesh with the ranges written since the last update, or `None`
    /// if there is nothing to draw yet.
    pub fn update(&mut self) -> Option<MeshSnapshot<'_, SolidVertex>> {
        self.buffer.snapshot()
    }

    /// Read-only access to the full buffer
    pub fn buffer(&self) -> &MeshBuffer<SolidVertex> {
        &self.buffer
    }
}
