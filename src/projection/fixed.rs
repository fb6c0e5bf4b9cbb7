//! Fixed celestial sphere: RA/Dec placed directly on the dome, independent of
//! observer and time. +Y points at the north celestial pole.

use crate::Vector3;

/// `x = r·cos(dec)·cos(ra)`, `y = r·sin(dec)`, `z = r·cos(dec)·sin(ra)`.
pub fn to_cartesian_fixed(ra_deg: f64, dec_deg: f64, radius: f64) -> Vector3 {
    let (sin_ra, cos_ra) = ra_deg.to_radians().sin_cos();
    let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
    Vector3::new(
        (radius * cos_dec * cos_ra) as f32,
        (radius * sin_dec) as f32,
        (radius * cos_dec * sin_ra) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lies_on_sphere_of_given_radius() {
        for (ra, dec) in [(0.0, 0.0), (85.19, -1.94), (37.95, 89.26), (300.0, -70.0)] {
            let p = to_cartesian_fixed(ra, dec, 1000.0);
            assert!((p.norm() - 1000.0).abs() < 1e-2, "|p| = {}", p.norm());
        }
    }

    #[test]
    fn celestial_poles_map_to_y_axis() {
        let north = to_cartesian_fixed(123.0, 90.0, 500.0);
        assert!((north.y - 500.0).abs() < 1e-3);
        let south = to_cartesian_fixed(17.0, -90.0, 500.0);
        assert!((south.y + 500.0).abs() < 1e-3);
    }

    #[test]
    fn ra_ninety_points_along_z() {
        let p = to_cartesian_fixed(90.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
        assert!((p.z - 1.0).abs() < 1e-6);
    }
}
