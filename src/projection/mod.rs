//! Celestial → render-space projection strategies.
//!
//! Both strategies end in a point on a sphere of fixed radius centered on the
//! origin, with +Y up and the X/Z plane horizontal.
//!
//! # Supported strategies
//!
//! - [`Projection::Horizon`]: the sky as seen by an observer at a given place
//!   and time. +Y is the zenith; stars below the horizon are not visible.
//! - [`Projection::FixedSphere`]: a time-independent celestial sphere. +Y is
//!   the north celestial pole; every star is visible.
//!
//! The strategy is chosen once per deployment through configuration, not per
//! star.

pub mod fixed;
pub mod horizon;

pub use fixed::to_cartesian_fixed;
pub use horizon::{horizontal_to_cartesian, to_horizontal, HorizontalCoords};

use serde::{Deserialize, Serialize};

use crate::observer::ObserverFrame;
use crate::Vector3;

/// Projection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Observer horizon frame (altitude / azimuth).
    #[default]
    Horizon,
    /// Fixed equatorial sphere (right ascension / declination).
    FixedSphere,
}

/// Result of placing one star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Point on the render dome.
    pub position: Vector3,
    /// Altitude in degrees. Only the horizon strategy computes one.
    pub altitude_deg: Option<f64>,
}

impl Projection {
    /// Project equatorial coordinates (degrees) onto a dome of `radius`.
    pub fn place(
        &self,
        ra_deg: f64,
        dec_deg: f64,
        frame: &ObserverFrame,
        radius: f64,
    ) -> Placement {
        match self {
            Projection::Horizon => {
                let hz = to_horizontal(ra_deg, dec_deg, frame.latitude_deg, frame.lst_deg);
                Placement {
                    position: horizontal_to_cartesian(&hz, radius),
                    altitude_deg: Some(hz.altitude_deg),
                }
            }
            Projection::FixedSphere => Placement {
                position: to_cartesian_fixed(ra_deg, dec_deg, radius),
                altitude_deg: None,
            },
        }
    }

    /// Whether a placement produced by this strategy should be drawn.
    pub fn is_visible(&self, placement: &Placement) -> bool {
        match self {
            Projection::Horizon => placement.altitude_deg.is_some_and(|alt| alt >= 0.0),
            Projection::FixedSphere => true,
        }
    }

    /// Returns `true` if placements depend on the observation time.
    pub fn is_time_dependent(&self) -> bool {
        matches!(self, Projection::Horizon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sphere_ignores_observer() {
        let south = ObserverFrame::new(-45.0, 10.0);
        let north = ObserverFrame::new(60.0, 250.0);
        let a = Projection::FixedSphere.place(85.19, -1.94, &south, 1000.0);
        let b = Projection::FixedSphere.place(85.19, -1.94, &north, 1000.0);
        assert_eq!(a, b);
        assert!(a.altitude_deg.is_none());
        assert!(Projection::FixedSphere.is_visible(&a));
    }

    #[test]
    fn horizon_hides_stars_below_horizon() {
        // South celestial pole seen from the northern hemisphere
        let frame = ObserverFrame::new(45.0, 0.0);
        let p = Projection::Horizon.place(0.0, -89.0, &frame, 1000.0);
        let alt = p.altitude_deg.expect("horizon computes altitude");
        assert!(alt < 0.0, "alt = {alt}");
        assert!(!Projection::Horizon.is_visible(&p));
    }

    #[test]
    fn horizon_places_meridian_star_at_zenith() {
        let frame = ObserverFrame::new(-45.0312, 150.0);
        let p = Projection::Horizon.place(150.0, -45.0312, &frame, 1000.0);
        assert!(Projection::Horizon.is_visible(&p));
        assert!((p.position.y - 1000.0).abs() < 1e-3, "{:?}", p.position);
    }

    #[test]
    fn projection_deserializes_from_snake_case() {
        let p: Projection = serde_json::from_str("\"fixed_sphere\"").unwrap();
        assert_eq!(p, Projection::FixedSphere);
        assert!(Projection::Horizon.is_time_dependent());
    }
}
