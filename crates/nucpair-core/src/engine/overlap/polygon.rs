use nalgebra::{Point2, Vector2};
use tracing::warn;

/// Polygons with more vertices than this are not intersected.
pub const MAX_POLYGON_VERTICES: usize = 32;

#[inline]
fn cross(o: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let (oa, ob): (Vector2<f64>, Vector2<f64>) = (a - o, b - o);
    oa.x * ob.y - oa.y * ob.x
}

/// Shoelace area, positive for counter-clockwise vertex order.
pub fn signed_area(polygon: &[Point2<f64>]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|k| {
            let (p, q) = (polygon[k], polygon[(k + 1) % n]);
            p.x * q.y - q.x * p.y
        })
        .sum::<f64>()
        / 2.0
}

/// Intersection area of two simple polygons, convex or not.
///
/// Each polygon is split into signed triangles fanning out from the origin; the
/// intersection is the signed sum of pairwise triangle intersections, each computed by
/// convex clipping.
pub fn intersection_area(a: &[Point2<f64>], b: &[Point2<f64>]) -> f64 {
    if a.len() < 3 || b.len() < 3 {
        return 0.0;
    }
    if a.len() > MAX_POLYGON_VERTICES || b.len() > MAX_POLYGON_VERTICES {
        warn!(
            vertices_a = a.len(),
            vertices_b = b.len(),
            limit = MAX_POLYGON_VERTICES,
            "Polygon too large for overlap calculation; reporting zero overlap."
        );
        return 0.0;
    }

    let origin = Point2::origin();
    let fan = |polygon: &[Point2<f64>]| -> Vec<(f64, [Point2<f64>; 3])> {
        let n = polygon.len();
        (0..n)
            .filter_map(|k| {
                let (p, q) = (polygon[k], polygon[(k + 1) % n]);
                let orientation = cross(&origin, &p, &q);
                if orientation > 0.0 {
                    Some((1.0, [origin, p, q]))
                } else if orientation < 0.0 {
                    Some((-1.0, [origin, q, p]))
                } else {
                    None
                }
            })
            .collect()
    };

    let fan_a = fan(a);
    let fan_b = fan(b);
    let mut total = 0.0;
    for (sign_a, tri_a) in &fan_a {
        for (sign_b, tri_b) in &fan_b {
            let clipped = clip_convex(tri_a, tri_b);
            total += sign_a * sign_b * signed_area(&clipped).abs();
        }
    }
    total.abs()
}

/// Sutherland-Hodgman clipping of a convex polygon by a counter-clockwise convex polygon.
fn clip_convex(subject: &[Point2<f64>], clip: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut output = subject.to_vec();
    for i in 0..clip.len() {
        if output.is_empty() {
            break;
        }
        let (c1, c2) = (clip[i], clip[(i + 1) % clip.len()]);
        let input = std::mem::take(&mut output);
        let inside = |p: &Point2<f64>| cross(&c1, &c2, p) >= 0.0;
        for j in 0..input.len() {
            let current = input[j];
            let previous = input[(j + input.len() - 1) % input.len()];
            match (inside(&previous), inside(&current)) {
                (true, true) => output.push(current),
                (true, false) => output.push(edge_crossing(&previous, &current, &c1, &c2)),
                (false, true) => {
                    output.push(edge_crossing(&previous, &current, &c1, &c2));
                    output.push(current);
                }
                (false, false) => {}
            }
        }
    }
    output
}

fn edge_crossing(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    c1: &Point2<f64>,
    c2: &Point2<f64>,
) -> Point2<f64> {
    let d1 = cross(c1, c2, p1);
    let d2 = cross(c1, c2, p2);
    let t = d1 / (d1 - d2);
    p1 + (p2 - p1) * t
}
