//! Orthonormal ring frames along a curve

use glam::Vec3;

/// Projections shorter than this are treated as collapsed
const COLLAPSE_EPSILON: f32 = 1.0e-6;

/// Tangents closer to the up axis than this use the fallback axis
const PARALLEL_COS: f32 = 0.99;

/// Right-handed frame: `bitangent = tangent × normal`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RingFrame {
    pub tangent: Vec3,
    pub normal: Vec3,
    pub bitangent: Vec3,
}

impl RingFrame {
    /// Frame for the first ring of a stroke, built from a fixed up reference.
    ///
    /// World Y is used unless the tangent nearly points along it, in which
    /// case world X is used.
    pub fn initial(tangent: Vec3) -> Self {
        let up = if tangent.dot(Vec3::Y).abs() > PARALLEL_COS {
            Vec3::X
        } else {
            Vec3::Y
        };
        Self::orthonormalize(tangent, up)
    }

    /// Frame for the next ring, carried over from this one.
    ///
    /// The previous normal is projected onto the plane of the new tangent
    /// (parallel transport), so rings do not spin as the curve bends. A
    /// near-reversal collapses the projection and restarts from the up
    /// reference.
    pub fn transported(&self, tangent: Vec3) -> Self {
        let projected = self.normal - tangent * self.normal.dot(tangent);
        if projected.length_squared() < COLLAPSE_EPSILON {
            return Self::initial(tangent);
        }
        Self::orthonormalize(tangent, projected)
    }

    fn orthonormalize(tangent: Vec3, reference: Vec3) -> Self {
        let normal = (reference - tangent * reference.dot(tangent))
            .try_normalize()
            .unwrap_or_else(|| tangent.any_orthonormal_vector());
        Self {
            tangent,
            normal,
            bitangent: tangent.cross(normal),
        }
    }

    /// Unit offset from the ring center for angle `theta`
    pub fn radial(&self, theta: f32) -> Vec3 {
        let (sin, cos) = theta.sin_cos();
        self.normal * cos + self.bitangent * sin
    }
}
