//! Fixed-angle 3-D to 2-D projection for the Z-curve plot

use zcurve_core::types::Bounds3;

/// Rotation by `theta` around the vertical (Z) axis followed by a tilt of
/// `phi` towards the viewer, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    cos_theta: f64,
    sin_theta: f64,
    cos_phi: f64,
    sin_phi: f64,
}

impl Projection {
    pub fn new(theta_deg: f64, phi_deg: f64) -> Self {
        let (sin_theta, cos_theta) = theta_deg.to_radians().sin_cos();
        let (sin_phi, cos_phi) = phi_deg.to_radians().sin_cos();
        Self { cos_theta, sin_theta, cos_phi, sin_phi }
    }

    /// Screen position (u to the right, v upwards) of a point.
    pub fn project(&self, p: [f64; 3]) -> (f64, f64) {
        let [x, y, z] = p;
        let u = x * self.cos_theta - y * self.sin_theta;
        let depth = x * self.sin_theta + y * self.cos_theta;
        let v = z * self.cos_phi + depth * self.sin_phi;
        (u, v)
    }
}

/// Rescales each axis of `bounds` onto `[0, 1]`, so the data box is drawn as
/// a cube regardless of the axis ranges. Flat axes map to 0.5.
#[derive(Debug, Clone, Copy)]
pub struct UnitBox {
    bounds: Bounds3,
}

impl UnitBox {
    pub fn new(bounds: Bounds3) -> Self {
        Self { bounds }
    }

    pub fn normalize(&self, p: [f64; 3]) -> [f64; 3] {
        let mut out = [0.5; 3];
        for axis in 0..3 {
            let span = self.bounds.max[axis] - self.bounds.min[axis];
            if span > 0.0 {
                out[axis] = (p[axis] - self.bounds.min[axis]) / span;
            }
        }
        out
    }

    /// Corners of the unit cube, index bits are (x, y, z).
    pub fn corners() -> [[f64; 3]; 8] {
        let mut corners = [[0.0; 3]; 8];
        for (i, c) in corners.iter_mut().enumerate() {
            *c = [(i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64];
        }
        corners
    }

    /// The 12 cube edges as pairs of corner indices.
    pub fn edges() -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(12);
        for a in 0..8usize {
            for bit in [1usize, 2, 4] {
                if a & bit == 0 {
                    edges.push((a, a | bit));
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_angles_is_front_view() {
        let proj = Projection::new(0.0, 0.0);
        assert_eq!(proj.project([2.0, 5.0, 3.0]), (2.0, 3.0));
    }

    #[test]
    fn test_origin_stays_at_origin() {
        let proj = Projection::new(40.0, 40.0);
        assert_eq!(proj.project([0.0, 0.0, 0.0]), (0.0, 0.0));
    }

    #[test]
    fn test_unit_box_normalization() {
        let unit = UnitBox::new(Bounds3 { min: [0.0, -1.0, 2.0], max: [2.0, 1.0, 2.0] });
        assert_eq!(unit.normalize([1.0, 1.0, 2.0]), [0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_cube_has_twelve_edges() {
        let edges = UnitBox::edges();
        assert_eq!(edges.len(), 12);
        let corners = UnitBox::corners();
        for (a, b) in edges {
            let diff: f64 = (0..3).map(|k| (corners[a][k] - corners[b][k]).abs()).sum();
            assert_eq!(diff, 1.0);
        }
    }
}
