//! Topology checks for triangle index buffers.
//!
//! Provides:
//! - Index range and degenerate triangle checks
//! - Oriented manifold checking (each directed edge used at most once)
//! - Closed surface checking (every directed edge has a twin)

use std::collections::HashSet;

use glam::Vec3;
use thiserror::Error;

/// Reasons a triangle mesh fails validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshValidationError {
    #[error("Index count {0} is not divisible by 3")]
    IndexCount(usize),
    #[error("Triangle {triangle} references vertex {index} but only {vertex_count} exist")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("Triangle {triangle} repeats a vertex: {indices:?}")]
    RepeatedVertex { triangle: usize, indices: [u32; 3] },
    #[error("Triangle {triangle} has zero area ({area})")]
    ZeroArea { triangle: usize, area: f32 },
    #[error("Directed edge ({0}, {1}) is used by more than one triangle")]
    DuplicateEdge(u32, u32),
    #[error("Edge ({0}, {1}) has no opposite triangle")]
    BoundaryEdge(u32, u32),
}

/// Validate an indexed triangle list as an oriented 2-manifold (with boundary).
///
/// `min_area` is the smallest triangle area accepted as non-degenerate.
pub fn validate_triangle_mesh(
    positions: &[Vec3],
    indices: &[u32],
    min_area: f32,
) -> Result<(), MeshValidationError> {
    directed_edges(positions, indices, min_area).map(|_| ())
}

/// Validate that the mesh is a closed oriented 2-manifold.
pub fn validate_closed(
    positions: &[Vec3],
    indices: &[u32],
    min_area: f32,
) -> Result<(), MeshValidationError> {
    let edges = directed_edges(positions, indices, min_area)?;
    for &(a, b) in &edges {
        if !edges.contains(&(b, a)) {
            return Err(MeshValidationError::BoundaryEdge(a, b));
        }
    }
    Ok(())
}

fn directed_edges(
    positions: &[Vec3],
    indices: &[u32],
    min_area: f32,
) -> Result<HashSet<(u32, u32)>, MeshValidationError> {
    if indices.len() % 3 != 0 {
        return Err(MeshValidationError::IndexCount(indices.len()));
    }

    let mut edges = HashSet::with_capacity(indices.len());
    for (triangle, tri) in indices.chunks_exact(3).enumerate() {
        let tri = [tri[0], tri[1], tri[2]];

        for &index in &tri {
            if index as usize >= positions.len() {
                return Err(MeshValidationError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: positions.len(),
                });
            }
        }

        if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
            return Err(MeshValidationError::RepeatedVertex {
                triangle,
                indices: tri,
            });
        }

        let [a, b, c] = tri.map(|i| positions[i as usize]);
        let area = 0.5 * (b - a).cross(c - a).length();
        if !(area > min_area) {
            return Err(MeshValidationError::ZeroArea { triangle, area });
        }

        for (from, to) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if !edges.insert((from, to)) {
                return Err(MeshValidationError::DuplicateEdge(from, to));
            }
        }
    }

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> (Vec<Vec3>, Vec<u32>) {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let indices = vec![0, 2, 1, 0, 1, 3, 1, 2, 3, 0, 3, 2];
        (positions, indices)
    }

    #[test]
    fn test_closed_tetrahedron() {
        let (positions, indices) = tetrahedron();
        assert!(validate_triangle_mesh(&positions, &indices, 0.0).is_ok());
        assert!(validate_closed(&positions, &indices, 0.0).is_ok());
    }

    #[test]
    fn test_open_surface_is_not_closed() {
        let (positions, indices) = tetrahedron();
        let open = &indices[..9];
        assert!(validate_triangle_mesh(&positions, open, 0.0).is_ok());
        assert!(matches!(
            validate_closed(&positions, open, 0.0),
            Err(MeshValidationError::BoundaryEdge(..))
        ));
    }

    #[test]
    fn test_out_of_range_index() {
        let (positions, _) = tetrahedron();
        let err = validate_triangle_mesh(&positions, &[0, 1, 9], 0.0).unwrap_err();
        assert!(matches!(
            err,
            MeshValidationError::IndexOutOfRange { index: 9, .. }
        ));
    }

    #[test]
    fn test_zero_area_triangle() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let err = validate_triangle_mesh(&positions, &[0, 1, 2], 0.0).unwrap_err();
        assert!(matches!(err, MeshValidationError::ZeroArea { .. }));
    }

    #[test]
    fn test_flipped_triangle_duplicates_edge() {
        let (positions, _) = tetrahedron();
        let err = validate_triangle_mesh(&positions, &[0, 1, 2, 0, 1, 3], 0.0).unwrap_err();
        assert_eq!(err, MeshValidationError::DuplicateEdge(0, 1));
    }

    #[test]
    fn test_repeated_vertex() {
        let (positions, _) = tetrahedron();
        let err = validate_triangle_mesh(&positions, &[0, 0, 1], 0.0).unwrap_err();
        assert!(matches!(err, MeshValidationError::RepeatedVertex { .. }));
    }
}
