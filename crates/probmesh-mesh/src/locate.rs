//! Point-in-triangle test in the X-Z plane.
//!
//! Height is ignored. This suits navigation meshes that are locally
//! near-horizontal; vertical faces have zero plan area and never contain
//! a point, and regions that overlap in plan resolve to whichever triangle
//! is stored first.

use crate::point::Point3;

/// Returns `true` if `p` lies inside or on the boundary of `tri`,
/// projected onto the X-Z plane.
///
/// With `A` the signed double area and `s`, `t` the unnormalised
/// barycentric weights of the second and third corners, the point is
/// inside iff `s >= 0`, `t >= 0` and `s + t <= A` once all three are
/// brought to `A`'s sign. Zero-area triangles contain nothing.
pub fn contains_xz(tri: &[Point3; 3], p: Point3) -> bool {
    let (p0x, p0z) = (tri[0].x as f64, tri[0].z as f64);
    let (p1x, p1z) = (tri[1].x as f64, tri[1].z as f64);
    let (p2x, p2z) = (tri[2].x as f64, tri[2].z as f64);
    let (px, pz) = (p.x as f64, p.z as f64);

    let mut area = -p1z * p2x + p0z * (p2x - p1x) + p0x * (p1z - p2z) + p1x * p2z;
    if area == 0.0 || !area.is_finite() {
        return false;
    }
    let mut s = p0z * p2x - p0x * p2z + (p2z - p0z) * px + (p0x - p2x) * pz;
    let mut t = p0x * p1z - p0z * p1x + (p0z - p1z) * px + (p1x - p0x) * pz;

    if area < 0.0 {
        s = -s;
        t = -t;
        area = -area;
    }
    s >= 0.0 && t >= 0.0 && s + t <= area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [Point3; 3] {
        [a.into(), b.into(), c.into()]
    }

    #[test]
    fn interior_and_exterior() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        assert!(contains_xz(&t, Point3::new(0.2, 0.0, 0.2)));
        assert!(!contains_xz(&t, Point3::new(0.8, 0.0, 0.8)));
        assert!(!contains_xz(&t, Point3::new(-0.1, 0.0, 0.5)));
    }

    #[test]
    fn winding_does_not_matter() {
        let ccw = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let cw = tri([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let p = Point3::new(0.25, 0.0, 0.25);
        assert!(contains_xz(&ccw, p));
        assert!(contains_xz(&cw, p));
    }

    #[test]
    fn boundary_is_inclusive() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        assert!(contains_xz(&t, Point3::new(0.5, 0.0, 0.5)));
        assert!(contains_xz(&t, Point3::new(0.0, 0.0, 0.0)));
        assert!(contains_xz(&t, Point3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn height_is_ignored() {
        let t = tri([0.0, 3.0, 0.0], [1.0, 3.0, 0.0], [0.0, 3.0, 1.0]);
        assert!(contains_xz(&t, Point3::new(0.2, -50.0, 0.2)));
    }

    #[test]
    fn vertical_triangle_contains_nothing() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]);
        assert!(!contains_xz(&t, Point3::new(0.5, 0.5, 0.0)));
    }
}
