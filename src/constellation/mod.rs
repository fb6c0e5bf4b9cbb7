//! Constellation figures as drawable, pickable primitives.
//!
//! A figure is a name, an ordered list of member stars and a list of edges.
//! Members are resolved against the positions produced by the current
//! projection pass; members that were not projected (unknown, invalid, too
//! faint or below the horizon) are dropped silently. The number of members
//! left decides the shape:
//!
//! | resolved | shape                                  | hit-volume |
//! |----------|----------------------------------------|------------|
//! | 0        | none, figure skipped                   | none       |
//! | 1        | [`Shape::Marker`]                      | none       |
//! | 2        | [`Shape::Line`]                        | box        |
//! | 3        | [`Shape::Triangle`]                    | box        |
//! | 4+       | [`Shape::Surface`] over the convex hull | box        |

pub mod hull;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::starfield::PositionIndex;
use crate::Vector3;

pub use hull::{convex_surface, HullKind};

/// Member reference in a constellation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstellationStar {
    /// Hipparcos catalog id.
    pub hip: u64,
}

/// One constellation figure as stored in the constellation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationSpec {
    pub name: String,
    pub stars: Vec<ConstellationStar>,
    /// Decorative outline edges between member ids.
    #[serde(default)]
    pub edges: Vec<[u64; 2]>,
}

impl ConstellationSpec {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = u64>) -> Self {
        Self {
            name: name.into(),
            stars: members
                .into_iter()
                .map(|hip| ConstellationStar { hip })
                .collect(),
            edges: Vec::new(),
        }
    }

    pub fn with_edges(mut self, edges: Vec<[u64; 2]>) -> Self {
        self.edges = edges;
        self
    }

    /// Member ids in table order.
    pub fn member_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.stars.iter().map(|s| s.hip)
    }
}

/// Parse a constellation table from JSON.
pub fn load_constellations(json: &str) -> anyhow::Result<Vec<ConstellationSpec>> {
    serde_json::from_str(json).context("parsing constellation table")
}

/// Parse a constellation table from a JSON file.
pub fn load_constellations_from_file<P: AsRef<std::path::Path>>(
    path: P,
) -> anyhow::Result<Vec<ConstellationSpec>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading constellation table {}", path.display()))?;
    load_constellations(&json)
}

/// Geometry of an assembled figure, in render coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Triangulated surface; each triangle indexes into `vertices`.
    Surface {
        vertices: Vec<Vector3>,
        triangles: Vec<[u32; 3]>,
    },
    Triangle([Vector3; 3]),
    Line([Vector3; 2]),
    /// Single resolved star, drawn as a small sphere.
    Marker { center: Vector3, radius: f32 },
}

impl Shape {
    pub fn vertex_count(&self) -> usize {
        match self {
            Shape::Surface { vertices, .. } => vertices.len(),
            Shape::Triangle(_) => 3,
            Shape::Line(_) => 2,
            Shape::Marker { .. } => 1,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Surface { .. } => "surface",
            Shape::Triangle(_) => "triangle",
            Shape::Line(_) => "line",
            Shape::Marker { .. } => "marker",
        }
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points(points: &[Vector3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Scale every side by `factor` about the center, then widen any side
    /// shorter than `min_extent` to exactly `min_extent`.
    pub fn expanded(&self, factor: f32, min_extent: f32) -> Self {
        let center = self.center();
        let half = (self.size() * factor).map(|s| s.max(min_extent) * 0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, p: &Vector3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

/// Geometry settings for assembling figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Each side of a figure's hit box is its bounding box side times this.
    pub hit_expand_factor: f32,
    /// Smallest side of a hit box, in render units.
    pub min_hit_extent: f32,
    /// Radius of the sphere drawn for a single-star figure.
    pub marker_radius: f32,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            hit_expand_factor: 1.5,
            min_hit_extent: 20.0,
            marker_radius: 5.0,
        }
    }
}

/// One assembled figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationPrimitive {
    pub name: String,
    /// Ids of the resolved members, in table order.
    pub members: Vec<u64>,
    pub shape: Shape,
    /// Pick box; absent for single-star markers.
    pub hit_volume: Option<Aabb>,
    /// Segments for every edge whose two ends resolved.
    pub outline: Vec<[Vector3; 2]>,
}

/// Output of [`assemble`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembly {
    /// One primitive per figure with at least one resolved member, in table order.
    pub primitives: Vec<ConstellationPrimitive>,
    /// Names of figures with no resolved members.
    pub skipped: Vec<String>,
}

/// Assemble every figure against the positions of the current pass.
pub fn assemble(
    specs: &[ConstellationSpec],
    positions: &PositionIndex,
    config: &AssemblyConfig,
) -> Assembly {
    let mut assembly = Assembly::default();

    for spec in specs {
        match assemble_one(spec, positions, config) {
            Some(primitive) => {
                debug!(
                    "Constellation '{}': {} of {} members, {}",
                    spec.name,
                    primitive.members.len(),
                    spec.stars.len(),
                    primitive.shape.kind()
                );
                assembly.primitives.push(primitive);
            }
            None => {
                warn!("No stars resolved for constellation '{}'", spec.name);
                assembly.skipped.push(spec.name.clone());
            }
        }
    }

    assembly
}

/// Assemble a single figure; `None` when no member resolves.
pub fn assemble_one(
    spec: &ConstellationSpec,
    positions: &PositionIndex,
    config: &AssemblyConfig,
) -> Option<ConstellationPrimitive> {
    let (members, points): (Vec<u64>, Vec<Vector3>) = spec
        .member_ids()
        .filter_map(|id| positions.get(id).map(|p| (id, *p)))
        .unzip();

    let shape = match points.as_slice() {
        [] => return None,
        [center] => Shape::Marker {
            center: *center,
            radius: config.marker_radius,
        },
        [a, b] => Shape::Line([*a, *b]),
        [a, b, c] => Shape::Triangle([*a, *b, *c]),
        _ => {
            let (shape, kind) = convex_surface(&points);
            match kind {
                HullKind::Convex => {}
                HullKind::OrderedFan => warn!(
                    "Constellation '{}' does not fit one tangent plane, using member order",
                    spec.name
                ),
                HullKind::Collinear => warn!(
                    "Constellation '{}' is collinear, drawn as a line",
                    spec.name
                ),
            }
            shape
        }
    };

    let hit_volume = if points.len() >= 2 {
        let (factor, min_extent) = (config.hit_expand_factor, config.min_hit_extent);
        Aabb::from_points(&points).map(|b| b.expanded(factor, min_extent))
    } else {
        None
    };

    let outline = spec
        .edges
        .iter()
        .filter_map(|[a, b]| Some([*positions.get(*a)?, *positions.get(*b)?]))
        .collect();

    Some(ConstellationPrimitive {
        name: spec.name.clone(),
        members,
        shape,
        hit_volume,
        outline,
    })
}
