//! Observer location and the instant a projection pass is computed for.

use chrono::{DateTime, Utc};

use crate::time::local_sidereal_time;

/// Where and when the sky is observed from.
///
/// Latitude and longitude are session constants. The instant is sampled
/// once per projection pass; it is never re-read while a pass runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverContext {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Observation instant (UTC).
    pub instant: DateTime<Utc>,
}

impl ObserverContext {
    pub fn new(latitude_deg: f64, longitude_deg: f64, instant: DateTime<Utc>) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            instant,
        }
    }

    /// Observer at the current wall-clock time.
    pub fn now(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self::new(latitude_deg, longitude_deg, Utc::now())
    }

    /// Evaluate the time-dependent part of the frame once.
    pub fn frame(&self) -> ObserverFrame {
        ObserverFrame {
            latitude_deg: self.latitude_deg,
            lst_deg: local_sidereal_time(self.longitude_deg, &self.instant),
        }
    }
}

/// Observer state frozen for a single projection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverFrame {
    /// Observer latitude in degrees.
    pub latitude_deg: f64,
    /// Local sidereal time in degrees, [0, 360).
    pub lst_deg: f64,
}

impl ObserverFrame {
    pub fn new(latitude_deg: f64, lst_deg: f64) -> Self {
        Self {
            latitude_deg,
            lst_deg,
        }
    }
}
