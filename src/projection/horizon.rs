//! Equatorial → horizon coordinates for an observer at a given latitude and
//! local sidereal time.
//!
//! Azimuth is measured from north through east. On the render dome, +Y points
//! at the zenith and the horizon lies in the X/Z plane.

use std::f64::consts::PI;

use crate::time::normalize_degrees;
use crate::Vector3;

/// Below this `cos(altitude)` the star sits at the zenith or nadir and
/// azimuth is undefined.
const POLE_EPSILON: f64 = 1e-12;

/// Position as seen by an observer, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoords {
    /// Angle above the horizon, [-90, 90].
    pub altitude_deg: f64,
    /// Compass bearing, [0, 360).
    pub azimuth_deg: f64,
}

impl HorizontalCoords {
    pub fn is_above_horizon(&self) -> bool {
        self.altitude_deg >= 0.0
    }
}

/// Convert right ascension / declination (degrees) to altitude / azimuth.
///
/// The hour angle `H = LST - RA` is wrapped into [-π, π). At the zenith and
/// nadir (`cos(alt) == 0`) the azimuth is defined as 0.
pub fn to_horizontal(
    ra_deg: f64,
    dec_deg: f64,
    latitude_deg: f64,
    lst_deg: f64,
) -> HorizontalCoords {
    let dec = dec_deg.to_radians();
    let lat = latitude_deg.to_radians();
    let h = wrap_pi(lst_deg.to_radians() - ra_deg.to_radians());

    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_h, cos_h) = h.sin_cos();

    // cos(alt)·sin(az) and cos(alt)·cos(az). The textbook form divides both
    // by cos(alt)·cos(lat), which blows up at the zenith; atan2 needs neither.
    let east = -cos_dec * sin_h;
    let north = sin_dec * cos_lat - cos_dec * sin_lat * cos_h;
    let sin_alt = sin_dec * sin_lat + cos_dec * cos_lat * cos_h;
    let cos_alt = east.hypot(north);

    let altitude = sin_alt.atan2(cos_alt);
    let azimuth = if cos_alt < POLE_EPSILON {
        0.0
    } else {
        east.atan2(north)
    };

    HorizontalCoords {
        altitude_deg: altitude.to_degrees(),
        azimuth_deg: normalize_degrees(azimuth.to_degrees()),
    }
}

/// Place horizon coordinates on the render dome.
///
/// `x = r·cos(alt)·sin(az)`, `y = r·sin(alt)`, `z = r·cos(alt)·cos(az)`.
pub fn horizontal_to_cartesian(coords: &HorizontalCoords, radius: f64) -> Vector3 {
    let (sin_alt, cos_alt) = coords.altitude_deg.to_radians().sin_cos();
    let (sin_az, cos_az) = coords.azimuth_deg.to_radians().sin_cos();
    Vector3::new(
        (radius * cos_alt * sin_az) as f32,
        (radius * sin_alt) as f32,
        (radius * cos_alt * cos_az) as f32,
    )
}

fn wrap_pi(theta: f64) -> f64 {
    (theta + PI).rem_euclid(2.0 * PI) - PI
}
