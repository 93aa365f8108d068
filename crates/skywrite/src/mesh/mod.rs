//! Growable mesh buffers with incremental upload tracking
//!
//! A [`MeshBuffer`] holds the CPU copy of a stroke's vertex and index data.
//! Each [`MeshBuffer::snapshot`] reports only the ranges written since the
//! previous snapshot, so a renderer can upload the delta instead of the whole
//! stroke.

mod validation;

use std::ops::Range;

pub use validation::{MeshValidationError, validate_closed, validate_triangle_mesh};

/// A `Vec` that remembers how much of itself the consumer has already seen.
///
/// Everything past `clean_len` (the high-water mark) is new. Writes below the
/// mark are tracked as separate rewrite ranges.
#[derive(Debug, Clone)]
pub(crate) struct TrackedVec<T> {
    data: Vec<T>,
    clean_len: usize,
    rewrites: Vec<Range<usize>>,
}

impl<T> Default for TrackedVec<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            clean_len: 0,
            rewrites: Vec::new(),
        }
    }
}

impl<T> TrackedVec<T> {
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn push(&mut self, value: T) {
        self.data.push(value);
    }

    pub(crate) fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.data.extend(values);
    }

    /// Overwrite an element in place. Returns false if out of range.
    pub(crate) fn set(&mut self, index: usize, value: T) -> bool {
        let Some(slot) = self.data.get_mut(index) else {
            return false;
        };
        *slot = value;
        if index < self.clean_len {
            self.mark_rewrite(index..index + 1);
        }
        true
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
        self.clean_len = self.clean_len.min(self.data.len());
        let clean_len = self.clean_len;
        self.rewrites.retain_mut(|r| {
            r.end = r.end.min(clean_len);
            r.start < r.end
        });
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
        self.clean_len = 0;
        self.rewrites.clear();
    }

    /// Ranges written since the last call, then mark everything clean
    pub(crate) fn take_dirty(&mut self) -> Vec<Range<usize>> {
        let mut dirty = std::mem::take(&mut self.rewrites);
        if self.clean_len < self.data.len() {
            dirty.push(self.clean_len..self.data.len());
        }
        self.clean_len = self.data.len();
        dirty
    }

    fn mark_rewrite(&mut self, range: Range<usize>) {
        // Coalesce with an overlapping or adjacent range
        for existing in &mut self.rewrites {
            if range.start <= existing.end && existing.start <= range.end {
                existing.start = existing.start.min(range.start);
                existing.end = existing.end.max(range.end);
                return;
            }
        }
        self.rewrites.push(range);
    }
}

/// Vertex and index storage for one stroke
#[derive(Debug, Clone)]
pub struct MeshBuffer<V> {
    pub(crate) vertices: TrackedVec<V>,
    pub(crate) indices: TrackedVec<u32>,
}

impl<V> Default for MeshBuffer<V> {
    fn default() -> Self {
        Self {
            vertices: TrackedVec::default(),
            indices: TrackedVec::default(),
        }
    }
}

impl<V> MeshBuffer<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn vertices(&self) -> &[V] {
        self.vertices.as_slice()
    }

    pub fn indices(&self) -> &[u32] {
        self.indices.as_slice()
    }

    /// Drop trailing geometry
    pub(crate) fn truncate(&mut self, vertex_count: usize, index_count: usize) {
        self.vertices.truncate(vertex_count);
        self.indices.truncate(index_count);
    }

    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Hand the current contents to a renderer.
    ///
    /// Returns `None` when there are no triangles yet; pending writes then
    /// stay dirty for the next snapshot.
    pub fn snapshot(&mut self) -> Option<MeshSnapshot<'_, V>> {
        if self.indices.len() == 0 {
            return None;
        }
        let dirty_vertices = self.vertices.take_dirty();
        let dirty_indices = self.indices.take_dirty();
        Some(MeshSnapshot {
            vertices: self.vertices.as_slice(),
            indices: self.indices.as_slice(),
            dirty_vertices,
            dirty_indices,
        })
    }
}

/// Read-only view of a stroke mesh handed to the renderer
///
/// The borrow keeps the generator from mutating the buffers until the
/// snapshot is dropped.
#[derive(Debug)]
pub struct MeshSnapshot<'a, V> {
    pub vertices: &'a [V],
    pub indices: &'a [u32],
    /// Vertex ranges written since the previous snapshot
    pub dirty_vertices: Vec<Range<usize>>,
    /// Index ranges written since the previous snapshot
    pub dirty_indices: Vec<Range<usize>>,
}

impl<V: bytemuck::Pod> MeshSnapshot<'_, V> {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw vertex bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices)
    }

    /// Raw index bytes for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.indices)
    }
}
