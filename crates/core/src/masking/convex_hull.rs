//! Convex hull construction and rasterization for the face silhouette mask.

use crate::shared::point::Point2D;

use super::blend_mask::BlendMask;

/// Convex hull of a point set via Andrew's monotone chain, in
/// counter-clockwise order (y-down image coordinates).
///
/// Returns an empty vector when the hull collapses: fewer than three
/// distinct points, or all points collinear. Callers fall back to an
/// all-zero mask in that case instead of rasterizing a degenerate polygon.
pub fn convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    let mut pts: Vec<Point2D> = points.iter().copied().filter(|p| p.is_finite()).collect();
    pts.sort_by(|a, b| (a.x, a.y).partial_cmp(&(b.x, b.y)).expect("finite coords"));
    pts.dedup();
    if pts.len() < 3 {
        return Vec::new();
    }

    let mut lower: Vec<Point2D> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point2D> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    // The last point of each chain is the first point of the other.
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 || polygon_area(&lower) == 0.0 {
        return Vec::new();
    }
    lower
}

/// Rasterize the filled hull into `mask` with weight 1.0, boundary included.
pub fn fill_convex_polygon(mask: &mut BlendMask, hull: &[Point2D]) {
    if hull.len() < 3 {
        return;
    }
    let (w, h) = (mask.width() as i64, mask.height() as i64);
    let min_x = hull.iter().fold(f64::INFINITY, |m, p| m.min(p.x));
    let max_x = hull.iter().fold(f64::NEG_INFINITY, |m, p| m.max(p.x));
    let min_y = hull.iter().fold(f64::INFINITY, |m, p| m.min(p.y));
    let max_y = hull.iter().fold(f64::NEG_INFINITY, |m, p| m.max(p.y));

    let x0 = (min_x.floor() as i64).clamp(0, w);
    let x1 = ((max_x.ceil() as i64) + 1).clamp(0, w);
    let y0 = (min_y.floor() as i64).clamp(0, h);
    let y1 = ((max_y.ceil() as i64) + 1).clamp(0, h);

    for y in y0..y1 {
        for x in x0..x1 {
            let p = Point2D::new(x as f64, y as f64);
            if inside_hull(hull, p) {
                mask.set(x as usize, y as usize, 1.0);
            }
        }
    }
}

fn inside_hull(hull: &[Point2D], p: Point2D) -> bool {
    let n = hull.len();
    (0..n).all(|i| cross(hull[i], hull[(i + 1) % n], p) >= -1e-9)
}

fn cross(o: Point2D, a: Point2D, b: Point2D) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn polygon_area(poly: &[Point2D]) -> f64 {
    let n = poly.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let (a, b) = (poly[i], poly[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();
    (twice / 2.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2D> {
        coords.iter().map(|&(x, y)| Point2D::new(x, y)).collect()
    }

    #[test]
    fn test_hull_of_square_with_interior_point() {
        let hull = convex_hull(&pts(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (2.0, 2.0), // interior, must not appear
        ]));
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point2D::new(2.0, 2.0)));
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::single(pts(&[(1.0, 1.0)]))]
    #[case::coincident(pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]))]
    #[case::collinear(pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]))]
    fn test_degenerate_inputs_collapse_to_empty(#[case] input: Vec<Point2D>) {
        assert!(convex_hull(&input).is_empty());
    }

    #[test]
    fn test_fill_covers_triangle_interior_only() {
        let mut mask = BlendMask::zeros(10, 10);
        let hull = convex_hull(&pts(&[(1.0, 1.0), (8.0, 1.0), (1.0, 8.0)]));
        fill_convex_polygon(&mut mask, &hull);

        assert_eq!(mask.get(2, 2), 1.0); // interior
        assert_eq!(mask.get(1, 1), 1.0); // vertex on boundary
        assert_eq!(mask.get(8, 8), 0.0); // outside the hypotenuse
        assert_eq!(mask.get(0, 0), 0.0);
    }

    #[test]
    fn test_fill_clips_to_mask_extent() {
        let mut mask = BlendMask::zeros(4, 4);
        let hull = convex_hull(&pts(&[(-5.0, -5.0), (10.0, -5.0), (10.0, 10.0), (-5.0, 10.0)]));
        fill_convex_polygon(&mut mask, &hull);
        // Entire mask covered, no panic on out-of-range vertices
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(mask.get(x, y), 1.0);
            }
        }
    }

    #[test]
    fn test_fill_ignores_degenerate_hull() {
        let mut mask = BlendMask::zeros(4, 4);
        fill_convex_polygon(&mut mask, &[]);
        assert_eq!(mask.get(1, 1), 0.0);
    }
}
