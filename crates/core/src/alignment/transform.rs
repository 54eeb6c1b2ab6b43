use nalgebra::Matrix2;

use crate::shared::point::Point2D;

/// A 2x3 affine transform: a scale-rotation 2x2 block plus a translation
/// column, mapping source-frame coordinates into the canonical face frame.
///
/// A degenerate estimation (rank-0 covariance) yields a transform whose
/// entries are all NaN; callers must check [`is_degenerate`] before warping
/// with it and skip the affected face.
///
/// [`is_degenerate`]: SimilarityTransform::is_degenerate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimilarityTransform {
    m: [[f64; 3]; 2],
}

impl SimilarityTransform {
    pub fn new(m: [[f64; 3]; 2]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
    }

    /// The all-NaN transform signalling a degenerate estimation problem.
    pub fn degenerate() -> Self {
        Self::new([[f64::NAN; 3]; 2])
    }

    pub fn rows(&self) -> &[[f64; 3]; 2] {
        &self.m
    }

    pub fn is_degenerate(&self) -> bool {
        self.m.iter().flatten().any(|v| !v.is_finite())
    }

    pub fn apply(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2],
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2],
        )
    }

    /// Uniformly scales the whole matrix, translation included.
    ///
    /// Used to turn a transform targeting the normalized `[0,1]` canonical
    /// space into one targeting an `n x n` pixel canonical face.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut m = self.m;
        for row in &mut m {
            for v in row {
                *v *= factor;
            }
        }
        Self::new(m)
    }

    /// The inverse affine map, or `None` when the linear block is singular.
    pub fn inverse(&self) -> Option<Self> {
        let a = Matrix2::new(self.m[0][0], self.m[0][1], self.m[1][0], self.m[1][1]);
        let inv = a.try_inverse()?;
        let (tx, ty) = (self.m[0][2], self.m[1][2]);
        Some(Self::new([
            [inv[(0, 0)], inv[(0, 1)], -(inv[(0, 0)] * tx + inv[(0, 1)] * ty)],
            [inv[(1, 0)], inv[(1, 1)], -(inv[(1, 0)] * tx + inv[(1, 1)] * ty)],
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_maps_points_to_themselves() {
        let t = SimilarityTransform::identity();
        let p = t.apply(Point2D::new(3.5, -2.0));
        assert_relative_eq!(p.x, 3.5);
        assert_relative_eq!(p.y, -2.0);
    }

    #[test]
    fn test_apply_rotation_and_translation() {
        // 90 degree rotation plus (1, 2) translation
        let t = SimilarityTransform::new([[0.0, -1.0, 1.0], [1.0, 0.0, 2.0]]);
        let p = t.apply(Point2D::new(1.0, 0.0));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 3.0);
    }

    #[test]
    fn test_scaled_multiplies_translation_too() {
        let t = SimilarityTransform::new([[0.5, 0.0, 0.25], [0.0, 0.5, 0.75]]).scaled(64.0);
        assert_relative_eq!(t.rows()[0][0], 32.0);
        assert_relative_eq!(t.rows()[0][2], 16.0);
        assert_relative_eq!(t.rows()[1][2], 48.0);
    }

    #[test]
    fn test_inverse_roundtrips_points() {
        let t = SimilarityTransform::new([[0.8, -0.6, 5.0], [0.6, 0.8, -3.0]]);
        let inv = t.inverse().unwrap();
        let p = Point2D::new(12.0, 7.0);
        let back = inv.apply(t.apply(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_of_singular_is_none() {
        let t = SimilarityTransform::new([[0.0, 0.0, 1.0], [0.0, 0.0, 2.0]]);
        assert!(t.inverse().is_none());
    }

    #[test]
    fn test_degenerate_detection() {
        assert!(SimilarityTransform::degenerate().is_degenerate());
        assert!(!SimilarityTransform::identity().is_degenerate());

        let mut m = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        m[1][2] = f64::INFINITY;
        assert!(SimilarityTransform::new(m).is_degenerate());
    }
}
