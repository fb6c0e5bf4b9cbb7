//! Pointer picking over stars and constellation figures.
//!
//! Every projected star gets a hit sphere and every figure with a hit box
//! gets that box. A query casts a ray from the camera and returns the entry
//! whose surface the ray reaches first.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::constellation::{Aabb, ConstellationPrimitive};
use crate::starfield::StarField;
use crate::{Matrix4, StarName, Vector3};

/// Direction vectors shorter than this are treated as zero.
const DIRECTION_EPSILON: f32 = 1e-12;

/// Picking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingConfig {
    /// Radius of the hit sphere around every star, in render units. Larger
    /// than the drawn point so small stars stay easy to hover.
    pub star_hit_radius: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            star_hit_radius: 40.0,
        }
    }
}

/// Half-line from `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    /// Returns `None` when `direction` has no length.
    pub fn new(origin: Vector3, direction: Vector3) -> Option<Self> {
        let direction = direction.try_normalize(DIRECTION_EPSILON)?;
        Some(Self { origin, direction })
    }

    /// Ray through a pointer position in normalized device coordinates
    /// (`x`, `y` in [-1, 1]), from the near plane towards the far plane.
    pub fn from_ndc(x: f32, y: f32, inverse_view_projection: &Matrix4) -> Option<Self> {
        let near = inverse_view_projection.transform_point(&Point3::new(x, y, -1.0));
        let far = inverse_view_projection.transform_point(&Point3::new(x, y, 1.0));
        let finite = |p: &Point3<f32>| p.coords.iter().all(|c| c.is_finite());
        if !finite(&near) || !finite(&far) {
            return None;
        }
        Self::new(near.coords, far - near)
    }

    pub fn at(&self, distance: f32) -> Vector3 {
        self.origin + self.direction * distance
    }
}

/// Pickable region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitVolume {
    Sphere { center: Vector3, radius: f32 },
    Box(Aabb),
}

impl HitVolume {
    /// Distance along `ray` to where it enters the volume.
    ///
    /// `None` when the ray misses, when the volume is behind the origin, or
    /// when the origin is already inside.
    pub fn entry_distance(&self, ray: &Ray) -> Option<f32> {
        match self {
            HitVolume::Sphere { center, radius } => ray_sphere(ray, center, *radius),
            HitVolume::Box(aabb) => ray_box(ray, aabb),
        }
    }
}

fn ray_sphere(ray: &Ray, center: &Vector3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let c = oc.norm_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = oc.dot(&ray.direction);
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Slab test.
fn ray_box(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    if aabb.contains(&ray.origin) {
        return None;
    }
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for i in 0..3 {
        let o = ray.origin[i];
        let d = ray.direction[i];
        if d.abs() < DIRECTION_EPSILON {
            if o < aabb.min[i] || o > aabb.max[i] {
                return None;
            }
            continue;
        }
        let (t1, t2) = ((aabb.min[i] - o) / d, (aabb.max[i] - o) / d);
        let (t1, t2) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        t_near = t_near.max(t1);
        t_far = t_far.min(t2);
        if t_near > t_far {
            return None;
        }
    }
    (t_near >= 0.0).then_some(t_near)
}

/// What a hit refers to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickLabel {
    Star { id: u64, name: Option<StarName> },
    Constellation { name: String },
}

impl PickLabel {
    /// Text shown on hover. Unnamed stars have none.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            PickLabel::Star { name, .. } => name.as_ref().map(|n| n.common_name.as_str()),
            PickLabel::Constellation { name } => Some(name.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickEntry {
    pub volume: HitVolume,
    pub label: PickLabel,
}

/// Result of a pick query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickHit {
    pub label: PickLabel,
    /// Distance along the ray to the volume surface.
    pub distance: f32,
}

impl PickHit {
    pub fn display_name(&self) -> Option<&str> {
        self.label.display_name()
    }
}

/// Hit volumes for one pass. Rebuilt whenever the scene is rebuilt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickingIndex {
    entries: Vec<PickEntry>,
}

impl PickingIndex {
    /// Stars first, in projection order, then figures with a hit box.
    pub fn build(
        field: &StarField,
        primitives: &[ConstellationPrimitive],
        config: &PickingConfig,
    ) -> Self {
        let stars = field.stars.iter().map(|star| PickEntry {
            volume: HitVolume::Sphere {
                center: star.position,
                radius: config.star_hit_radius,
            },
            label: PickLabel::Star {
                id: star.id,
                name: star.name.clone(),
            },
        });
        let figures = primitives.iter().filter_map(|prim| {
            prim.hit_volume.map(|aabb| PickEntry {
                volume: HitVolume::Box(aabb),
                label: PickLabel::Constellation {
                    name: prim.name.clone(),
                },
            })
        });
        Self {
            entries: stars.chain(figures).collect(),
        }
    }

    pub fn entries(&self) -> &[PickEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest entry along the ray. On equal distance the earlier entry wins.
    pub fn query(&self, ray: &Ray) -> Option<PickHit> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            let Some(t) = entry.volume.entry_distance(ray) else {
                continue;
            };
            if best.map_or(true, |(_, best_t)| t < best_t) {
                best = Some((idx, t));
            }
        }
        best.map(|(idx, distance)| PickHit {
            label: self.entries[idx].label.clone(),
            distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::constellation::Shape;
    use crate::ProjectedStar;

    fn star(id: u64, z: f32, name: Option<&str>) -> ProjectedStar {
        ProjectedStar {
            id,
            position: Vector3::new(0.0, 0.0, z),
            size: 3.0,
            color: Rgb::WHITE,
            magnitude: 3.0,
            altitude_deg: None,
            name: name.map(|n| StarName::new(n, None)),
        }
    }

    fn field(stars: Vec<ProjectedStar>) -> StarField {
        StarField {
            positions: stars.iter().map(|s| (s.id, s.position)).collect(),
            stars,
            ..Default::default()
        }
    }

    fn figure(name: &str, min: [f32; 3], max: [f32; 3]) -> ConstellationPrimitive {
        let (min, max) = (Vector3::from(min), Vector3::from(max));
        ConstellationPrimitive {
            name: name.to_string(),
            members: vec![],
            shape: Shape::Line([min, max]),
            hit_volume: Some(Aabb { min, max }),
            outline: vec![],
        }
    }

    fn ray_along(x: f32, y: f32, z: f32) -> Ray {
        Ray::new(Vector3::zeros(), Vector3::new(x, y, z)).unwrap()
    }

    #[test]
    fn ray_hits_star_sphere() {
        let stars = field(vec![star(1, 1000.0, Some("Acrux"))]);
        let index = PickingIndex::build(&stars, &[], &PickingConfig::default());
        let hit = index.query(&ray_along(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(hit.display_name(), Some("Acrux"));
        assert!(
            (hit.distance - 960.0).abs() < 1e-3,
            "distance = {}",
            hit.distance
        );

        // 45 degrees away misses by far more than the hit radius
        assert!(index.query(&ray_along(1.0, 0.0, 1.0)).is_none());
        // Pointing away
        assert!(index.query(&ray_along(0.0, 0.0, -1.0)).is_none());
    }

    #[test]
    fn nearest_surface_wins_across_kinds() {
        let stars = field(vec![star(1, 1000.0, Some("Far"))]);
        let near_box = figure("Near", [-50.0, -50.0, 500.0], [50.0, 50.0, 600.0]);
        let index = PickingIndex::build(&stars, &[near_box], &PickingConfig::default());

        let hit = index.query(&ray_along(0.0, 0.0, 1.0)).unwrap();
        assert!(matches!(hit.label, PickLabel::Constellation { .. }));
        assert_eq!(hit.display_name(), Some("Near"));
        assert!((hit.distance - 500.0).abs() < 1e-3);
    }

    #[test]
    fn star_inside_figure_box_wins_when_nearer() {
        let stars = field(vec![star(7, 1000.0, Some("Mimosa"))]);
        let big_box = figure("Mahutonga", [-200.0, -200.0, 980.0], [200.0, 200.0, 1020.0]);
        let index = PickingIndex::build(&stars, &[big_box], &PickingConfig::default());

        // Sphere surface at 960, box face at 980
        let hit = index.query(&ray_along(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(hit.display_name(), Some("Mimosa"));
    }

    #[test]
    fn volumes_containing_origin_are_ignored() {
        let stars = field(vec![star(1, 1000.0, None)]);
        let enclosing = figure("Around", [-10.0, -10.0, -10.0], [10.0, 10.0, 10.0]);
        let index = PickingIndex::build(&stars, &[enclosing], &PickingConfig::default());

        let hit = index.query(&ray_along(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(hit.label, PickLabel::Star { id: 1, name: None });
        assert_eq!(hit.display_name(), None);
    }

    #[test]
    fn ties_keep_stars_first() {
        let stars = field(vec![star(1, 140.0, None)]);
        // Box face at 100, same as the sphere surface
        let tie = figure("Tie", [-5.0, -5.0, 100.0], [5.0, 5.0, 110.0]);
        let index = PickingIndex::build(&stars, &[tie], &PickingConfig::default());
        let hit = index.query(&ray_along(0.0, 0.0, 1.0)).unwrap();
        assert!(matches!(hit.label, PickLabel::Star { id: 1, .. }));
    }

    #[test]
    fn markers_without_hit_volume_are_not_indexed() {
        let marker = ConstellationPrimitive {
            name: "Lonely".into(),
            members: vec![1],
            shape: Shape::Marker {
                center: Vector3::new(0.0, 0.0, 100.0),
                radius: 5.0,
            },
            hit_volume: None,
            outline: vec![],
        };
        let empty = StarField::default();
        let index = PickingIndex::build(&empty, &[marker], &PickingConfig::default());
        assert!(index.is_empty());
    }

    #[test]
    fn ray_from_ndc_with_identity_looks_down_z() {
        let ray = Ray::from_ndc(0.25, -0.5, &Matrix4::identity()).unwrap();
        assert_eq!(ray.origin, Vector3::new(0.25, -0.5, -1.0));
        assert_eq!(ray.direction, Vector3::new(0.0, 0.0, 1.0));
        assert!(Ray::new(Vector3::zeros(), Vector3::zeros()).is_none());
    }

    #[test]
    fn ray_from_ndc_inverts_perspective() {
        let projection = Matrix4::new_perspective(1.0, 75f32.to_radians(), 0.1, 5000.0);
        let inverse = projection.try_inverse().unwrap();
        // Center of the screen looks straight down -Z in camera space
        let ray = Ray::from_ndc(0.0, 0.0, &inverse).unwrap();
        let d = ray.direction;
        assert!(d.x.abs() < 1e-5 && d.y.abs() < 1e-5, "{d:?}");
        assert!(d.z < 0.0);
        assert!((ray.origin.z + 0.1).abs() < 1e-4, "z = {}", ray.origin.z);
    }

    #[test]
    fn ray_from_singular_matrix_is_none() {
        assert!(Ray::from_ndc(0.0, 0.0, &Matrix4::zeros()).is_none());
    }
}
