//! Convex surfaces over star points on the dome.
//!
//! The points are projected gnomonically onto the plane tangent to the dome
//! at their mean direction, the 2D convex hull is taken with Andrew's
//! monotone chain, and the hull is fan-triangulated back in 3D.

use nalgebra::Vector3 as Vector3d;

use super::Shape;
use crate::Vector3;

/// Smallest usable length of the summed direction and smallest projection
/// denominator, relative to unit vectors.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// How a surface was triangulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullKind {
    /// Fan over the convex hull.
    Convex,
    /// The points could not be projected onto one tangent plane; fan over
    /// the given order instead.
    OrderedFan,
    /// All points fall on one great circle; the shape is a line between the
    /// two extremes.
    Collinear,
}

/// Filled surface over `points`. Expects at least three points.
pub fn convex_surface(points: &[Vector3]) -> (Shape, HullKind) {
    let Some(plane) = project_to_tangent_plane(points) else {
        return (ordered_fan(points), HullKind::OrderedFan);
    };

    let hull = convex_hull(&plane);
    if hull.len() < 3 {
        let first = hull.first().copied().unwrap_or(0);
        let last = hull.last().copied().unwrap_or(first);
        return (
            Shape::Line([points[first], points[last]]),
            HullKind::Collinear,
        );
    }

    let vertices: Vec<Vector3> = hull.iter().map(|&i| points[i]).collect();
    (
        Shape::Surface {
            triangles: fan_triangles(vertices.len()),
            vertices,
        },
        HullKind::Convex,
    )
}

/// Fan triangulation over `points` in the order given.
pub fn ordered_fan(points: &[Vector3]) -> Shape {
    Shape::Surface {
        vertices: points.to_vec(),
        triangles: fan_triangles(points.len()),
    }
}

fn fan_triangles(n: usize) -> Vec<[u32; 3]> {
    (1..n.saturating_sub(1))
        .map(|i| [0, i as u32, (i + 1) as u32])
        .collect()
}

/// Gnomonic coordinates of each point on the plane tangent at the mean
/// direction. `None` when the mean direction vanishes or a point is on or
/// behind the tangent plane.
fn project_to_tangent_plane(points: &[Vector3]) -> Option<Vec<[f64; 2]>> {
    let dirs: Vec<Vector3d<f64>> = points
        .iter()
        .map(|p| p.cast::<f64>().try_normalize(DEGENERATE_EPSILON))
        .collect::<Option<_>>()?;

    let mean: Vector3d<f64> = dirs.iter().sum();
    let w = mean.try_normalize(DEGENERATE_EPSILON * dirs.len() as f64)?;

    let helper = if w.y.abs() < 0.9 {
        Vector3d::y()
    } else {
        Vector3d::x()
    };
    let u = helper.cross(&w).normalize();
    let v = w.cross(&u);

    dirs.iter()
        .map(|d| {
            let denom = d.dot(&w);
            if denom <= DEGENERATE_EPSILON {
                return None;
            }
            Some([d.dot(&u) / denom, d.dot(&v) / denom])
        })
        .collect()
}

fn cross(o: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
}

/// Whether the last two hull points and `next` fail to make a left turn.
fn not_left_turn(points: &[[f64; 2]], hull: &[usize], next: usize) -> bool {
    let n = hull.len();
    cross(points[hull[n - 2]], points[hull[n - 1]], points[next]) <= 0.0
}

/// Indices of the convex hull in counter-clockwise order. Collinear and
/// repeated points are dropped.
fn convex_hull(points: &[[f64; 2]]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[a][0]
            .total_cmp(&points[b][0])
            .then(points[a][1].total_cmp(&points[b][1]))
    });
    order.dedup_by(|a, b| points[*a] == points[*b]);

    if order.len() < 3 {
        return order;
    }

    let mut hull: Vec<usize> = Vec::with_capacity(order.len() * 2);
    // Lower hull
    for &i in &order {
        while hull.len() >= 2 && not_left_turn(points, &hull, i) {
            hull.pop();
        }
        hull.push(i);
    }
    // Upper hull
    let lower_len = hull.len() + 1;
    for &i in order.iter().rev().skip(1) {
        while hull.len() >= lower_len && not_left_turn(points, &hull, i) {
            hull.pop();
        }
        hull.push(i);
    }
    // Last point repeats the first
    hull.pop();
    hull
}
