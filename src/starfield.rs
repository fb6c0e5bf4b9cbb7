//! Catalog → drawable star points.
//!
//! One pass walks the catalog in order, drops entries that cannot or should
//! not be drawn, and emits a [`ProjectedStar`] for each survivor together
//! with an id → position index for the constellation assembler.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::ColorMode;
use crate::observer::ObserverFrame;
use crate::projection::Projection;
use crate::{NameTable, ProjectedStar, StarCatalog, Vector3};

/// Configuration for projecting a catalog onto the render dome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    /// Dome radius in render units.
    pub radius: f64,
    /// Faintest apparent magnitude drawn. Entries fainter than this are skipped.
    pub magnitude_limit: f64,
    /// Point size of a magnitude-0 star.
    pub size_base: f64,
    /// Point size lost per magnitude.
    pub size_slope: f64,
    pub color_mode: ColorMode,
    pub projection: Projection,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            radius: 1000.0,
            magnitude_limit: 7.0,
            size_base: 6.0,
            size_slope: 1.0,
            color_mode: ColorMode::White,
            projection: Projection::Horizon,
        }
    }
}

impl StarFieldConfig {
    /// White stars on the observer's horizon dome.
    pub fn classic() -> Self {
        Self::default()
    }

    /// B−V colored stars on the fixed celestial sphere, with a steeper size
    /// falloff and a brighter magnitude cut.
    pub fn colored() -> Self {
        Self {
            magnitude_limit: 6.5,
            size_base: 5.0,
            size_slope: 1.2,
            color_mode: ColorMode::BvIndex,
            projection: Projection::FixedSphere,
            ..Self::default()
        }
    }

    /// Point size for a star of the given magnitude, never below 1.
    pub fn point_size(&self, magnitude: f64) -> f32 {
        (self.size_base - magnitude * self.size_slope).max(1.0) as f32
    }
}

/// Render position of every projected star, keyed by catalog id.
///
/// Built fresh by each pass and handed to the assembler explicitly. A
/// repeated id keeps the position of its first projected entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionIndex {
    positions: HashMap<u64, Vector3>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u64, position: Vector3) {
        self.positions.entry(id).or_insert(position);
    }

    pub fn get(&self, id: u64) -> Option<&Vector3> {
        self.positions.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FromIterator<(u64, Vector3)> for PositionIndex {
    fn from_iter<I: IntoIterator<Item = (u64, Vector3)>>(iter: I) -> Self {
        let mut index = PositionIndex::new();
        for (id, position) in iter {
            index.insert(id, position);
        }
        index
    }
}

/// Counters from one projection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionStats {
    pub admitted: usize,
    /// RA, Dec or magnitude was not a number.
    pub invalid: usize,
    pub too_faint: usize,
    pub below_horizon: usize,
}

impl ProjectionStats {
    pub fn total(&self) -> usize {
        self.admitted + self.invalid + self.too_faint + self.below_horizon
    }
}

/// Output of one projection pass.
#[derive(Debug, Clone, Default)]
pub struct StarField {
    /// Admitted stars in catalog order.
    pub stars: Vec<ProjectedStar>,
    pub positions: PositionIndex,
    pub stats: ProjectionStats,
}

impl StarField {
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Interleaved `x, y, z` per star.
    pub fn position_buffer(&self) -> Vec<f32> {
        self.stars
            .iter()
            .flat_map(|s| [s.position.x, s.position.y, s.position.z])
            .collect()
    }

    /// One point size per star.
    pub fn size_buffer(&self) -> Vec<f32> {
        self.stars.iter().map(|s| s.size).collect()
    }

    /// Interleaved `r, g, b` per star.
    pub fn color_buffer(&self) -> Vec<f32> {
        self.stars.iter().flat_map(|s| s.color.to_array()).collect()
    }
}

/// Project every drawable catalog entry.
///
/// Entries are skipped, in this order, when RA, Dec or magnitude is not a
/// number, when the magnitude is above `config.magnitude_limit`, or (horizon
/// projection only) when the star is below the horizon.
pub fn project_catalog(
    catalog: &StarCatalog,
    names: &NameTable,
    frame: &ObserverFrame,
    config: &StarFieldConfig,
) -> StarField {
    let mut field = StarField {
        stars: Vec::with_capacity(catalog.len()),
        ..Default::default()
    };

    for entry in catalog {
        if !entry.has_valid_coordinates() {
            field.stats.invalid += 1;
            continue;
        }
        if entry.magnitude > config.magnitude_limit {
            field.stats.too_faint += 1;
            continue;
        }

        let placement = config
            .projection
            .place(entry.ra_deg, entry.dec_deg, frame, config.radius);
        if !config.projection.is_visible(&placement) {
            field.stats.below_horizon += 1;
            continue;
        }

        field.positions.insert(entry.id, placement.position);
        field.stars.push(ProjectedStar {
            id: entry.id,
            position: placement.position,
            size: config.point_size(entry.magnitude),
            color: config.color_mode.color_for(entry.color_index()),
            magnitude: entry.magnitude,
            altitude_deg: placement.altitude_deg,
            name: names.get(entry.id).cloned(),
        });
        field.stats.admitted += 1;
    }

    debug!(
        "Skipped {} invalid, {} fainter than {:.1}, {} below horizon",
        field.stats.invalid,
        field.stats.too_faint,
        config.magnitude_limit,
        field.stats.below_horizon
    );
    info!(
        "Projected {} of {} catalog entries ({:?}, LST {:.3}°)",
        field.stats.admitted,
        catalog.len(),
        config.projection,
        frame.lst_deg
    );

    field
}
