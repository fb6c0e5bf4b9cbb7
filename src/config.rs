//! Deployment configuration.
//!
//! Every section has defaults, so a JSON document only needs the fields it
//! changes:
//!
//! ```json
//! {
//!   "observer": { "latitude_deg": -36.85, "longitude_deg": 174.76 },
//!   "star_field": { "color_mode": "bv_index", "projection": "fixed_sphere" }
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constellation::AssemblyConfig;
use crate::observer::ObserverContext;
use crate::picking::PickingConfig;
use crate::starfield::StarFieldConfig;

/// Default observer latitude (Queenstown, New Zealand).
pub const DEFAULT_LATITUDE_DEG: f64 = -45.0312;
/// Default observer longitude, east positive.
pub const DEFAULT_LONGITUDE_DEG: f64 = 168.6626;

/// Where the sky is observed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Fixed observation instant (RFC 3339). When `None` the wall clock is
    /// sampled each time a pass runs.
    pub time: Option<DateTime<Utc>>,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            latitude_deg: DEFAULT_LATITUDE_DEG,
            longitude_deg: DEFAULT_LONGITUDE_DEG,
            time: None,
        }
    }
}

impl ObserverConfig {
    /// Observer context for a pass starting now.
    pub fn context(&self) -> ObserverContext {
        match self.time {
            Some(instant) => ObserverContext::new(self.latitude_deg, self.longitude_deg, instant),
            None => ObserverContext::now(self.latitude_deg, self.longitude_deg),
        }
    }
}

/// Complete scene configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub observer: ObserverConfig,
    pub star_field: StarFieldConfig,
    pub assembly: AssemblyConfig,
    pub picking: PickingConfig,
}

impl SkyConfig {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("parsing sky configuration")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        Self::from_json_str(&json)
    }
}
