use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::Vector3;

/// One catalog row: an equatorial position, an apparent magnitude and an
/// optional B−V color index.
///
/// Numeric fields that failed to parse are NaN. Entries are never rejected
/// when loaded; the projector decides which ones are drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: u64,
    pub magnitude: f64,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub bv: Option<f64>,
}

impl CatalogEntry {
    pub fn new(id: u64, magnitude: f64, ra_deg: f64, dec_deg: f64, bv: Option<f64>) -> Self {
        Self {
            id,
            magnitude,
            ra_deg,
            dec_deg,
            bv,
        }
    }

    /// Returns `true` when position and magnitude are real numbers.
    pub fn has_valid_coordinates(&self) -> bool {
        self.ra_deg.is_finite() && self.dec_deg.is_finite() && self.magnitude.is_finite()
    }

    /// The color index, if present and numeric.
    pub fn color_index(&self) -> Option<f64> {
        self.bv.filter(|bv| bv.is_finite())
    }
}

/// Display names for a catalog star.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarName {
    /// Western common name, shown on hover.
    pub common_name: String,
    /// Alternate (e.g. Māori) name, when one is known.
    #[serde(default)]
    pub alternate_name: Option<String>,
}

impl StarName {
    pub fn new(common_name: impl Into<String>, alternate_name: Option<String>) -> Self {
        Self {
            common_name: common_name.into(),
            alternate_name,
        }
    }
}

/// A catalog entry after projection: everything the renderer needs to draw
/// one point.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedStar {
    pub id: u64,
    /// Point on the render dome.
    pub position: Vector3,
    /// Point size in pixels, at least 1.
    pub size: f32,
    pub color: Rgb,
    pub magnitude: f64,
    /// Altitude in degrees when projected in the horizon frame.
    pub altitude_deg: Option<f64>,
    pub name: Option<StarName>,
}

impl ProjectedStar {
    /// Common name shown on hover, if the star is named.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_ref().map(|n| n.common_name.as_str())
    }
}
