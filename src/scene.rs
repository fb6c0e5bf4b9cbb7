//! One complete pass: sidereal time, star projection, constellation
//! assembly and picking index.

use std::time::Instant;

use tracing::info;

use crate::config::SkyConfig;
use crate::constellation::{assemble, ConstellationPrimitive, ConstellationSpec};
use crate::observer::{ObserverContext, ObserverFrame};
use crate::picking::{PickHit, PickingIndex, Ray};
use crate::projection::Projection;
use crate::starfield::{project_catalog, StarField};
use crate::{NameTable, StarCatalog};

/// Everything a renderer needs for one frame of the sky.
///
/// A scene is never updated in place. A new observer time means a new scene.
#[derive(Debug, Clone)]
pub struct SkyScene {
    /// Observer state the scene was computed for.
    pub frame: ObserverFrame,
    /// Strategy the star field was projected with.
    pub projection: Projection,
    pub star_field: StarField,
    pub constellations: Vec<ConstellationPrimitive>,
    /// Figures with no projected members.
    pub skipped_constellations: Vec<String>,
    pub picking: PickingIndex,
}

impl SkyScene {
    pub fn build(
        catalog: &StarCatalog,
        names: &NameTable,
        constellations: &[ConstellationSpec],
        observer: &ObserverContext,
        config: &SkyConfig,
    ) -> Self {
        let t0 = Instant::now();

        let frame = observer.frame();
        let star_field = project_catalog(catalog, names, &frame, &config.star_field);
        let assembly = assemble(constellations, &star_field.positions, &config.assembly);
        let picking = PickingIndex::build(&star_field, &assembly.primitives, &config.picking);

        info!(
            "Sky at {} built in {:.1}ms: {} stars, {} figures ({} skipped), {} pick entries",
            observer.instant.to_rfc3339(),
            t0.elapsed().as_secs_f64() * 1000.0,
            star_field.len(),
            assembly.primitives.len(),
            assembly.skipped.len(),
            picking.len()
        );

        Self {
            frame,
            projection: config.star_field.projection,
            star_field,
            constellations: assembly.primitives,
            skipped_constellations: assembly.skipped,
            picking,
        }
    }

    /// Nearest star or constellation along the pointer ray.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        self.picking.query(ray)
    }

    pub fn constellation(&self, name: &str) -> Option<&ConstellationPrimitive> {
        self.constellations.iter().find(|c| c.name == name)
    }

    /// Returns `true` if a later instant would place the stars differently,
    /// so the scene has to be rebuilt when the observer's clock moves.
    pub fn is_time_dependent(&self) -> bool {
        self.projection.is_time_dependent()
    }
}
