//! # skydome
//!
//! Render-ready night-sky scenes from a static star catalog.
//!
//! Given a catalog of stars, a table of constellation figures, an observer
//! location and an instant, `skydome` computes where every star sits on a
//! render dome, how large and what color to draw it, which constellation
//! shapes to draw over it, and which star or figure the pointer is over.
//! It does no drawing itself.
//!
//! ## Example
//!
//! ```no_run
//! use skydome::catalogs::builtin;
//! use skydome::{ObserverContext, Ray, SkyConfig, SkyScene, Vector3};
//!
//! let catalog = builtin::bright_stars()?;
//! let names = builtin::star_names()?;
//! let figures = builtin::constellations()?;
//!
//! let config = SkyConfig::default();
//! let observer = ObserverContext::now(
//!     config.observer.latitude_deg,
//!     config.observer.longitude_deg,
//! );
//! let scene = SkyScene::build(&catalog, &names, &figures, &observer, &config);
//!
//! // Flat buffers for a point renderer
//! let positions = scene.star_field.position_buffer();
//! let sizes = scene.star_field.size_buffer();
//! let colors = scene.star_field.color_buffer();
//! println!("{} stars, {} floats", sizes.len(), positions.len() + colors.len());
//!
//! // What is straight overhead?
//! let up = Ray::new(Vector3::zeros(), Vector3::y()).unwrap();
//! if let Some(hit) = scene.pick(&up) {
//!     println!("{:?}", hit.display_name());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. **Sidereal time**: the instant becomes a Julian Date and then local
//!    mean sidereal time, once per pass ([`time`], [`ObserverContext::frame`])
//! 2. **Projection**: each catalog entry is placed on the dome, either in the
//!    observer's horizon frame or on a fixed equatorial sphere ([`projection`])
//! 3. **Star field**: invalid, faint and below-horizon entries are dropped;
//!    survivors get a size from magnitude and a color from B−V ([`starfield`],
//!    [`color`])
//! 4. **Constellations**: figure members are resolved against the projected
//!    positions and turned into markers, lines, triangles or hull surfaces
//!    ([`constellation`])
//! 5. **Picking**: stars and figures become hit volumes for pointer rays
//!    ([`picking`])
//!
//! [`SkyScene::build`] runs all five.

pub mod catalogs;
pub mod color;
pub mod config;
pub mod constellation;
pub mod observer;
pub mod picking;
pub mod projection;
pub mod scene;
pub mod star;
pub mod starcatalog;
pub mod starfield;
pub mod time;

pub use color::{bv_to_rgb, ColorMode, Rgb};
pub use config::{ObserverConfig, SkyConfig};
pub use constellation::{
    assemble, Aabb, Assembly, AssemblyConfig, ConstellationPrimitive, ConstellationSpec, Shape,
};
pub use observer::{ObserverContext, ObserverFrame};
pub use picking::{HitVolume, PickEntry, PickHit, PickLabel, PickingConfig, PickingIndex, Ray};
pub use projection::{HorizontalCoords, Placement, Projection};
pub use scene::SkyScene;
pub use star::*;
pub use starcatalog::*;
pub use starfield::{project_catalog, PositionIndex, ProjectionStats, StarField, StarFieldConfig};

// Render space is single precision; astronomy is done in f64 and converted
// at the end.
pub type Vector3 = nalgebra::Vector3<f32>;
pub type Matrix4 = nalgebra::Matrix4<f32>;
