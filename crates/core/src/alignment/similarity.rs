//! Least-squares similarity estimation between landmark point sets.
//!
//! Implements Umeyama's closed-form solution (PAMI 1991) restricted to 2D,
//! with scale estimation enabled. The result maps `src` points onto `dst`
//! points under rotation, uniform scale, and translation only.

use nalgebra::{Matrix2, Vector2};

use crate::shared::point::{centroid, Point2D};

use super::transform::SimilarityTransform;

/// Estimate the similarity transform aligning `src` to `dst`.
///
/// Returns the all-NaN transform when the problem is not well conditioned
/// (rank-0 cross-covariance, e.g. all landmarks coincident). Pure and
/// deterministic for identical inputs.
pub fn estimate_similarity(src: &[Point2D], dst: &[Point2D]) -> SimilarityTransform {
    debug_assert_eq!(src.len(), dst.len(), "point sets must pair up");
    if src.is_empty() {
        return SimilarityTransform::degenerate();
    }
    let n = src.len() as f64;

    let src_mean = centroid(src);
    let dst_mean = centroid(dst);

    // Cross-covariance of the demeaned sets (Umeyama eq. 38).
    let mut cov = Matrix2::zeros();
    let mut src_var = 0.0;
    for (s, d) in src.iter().zip(dst) {
        let sd = Vector2::new(s.x - src_mean.x, s.y - src_mean.y);
        let dd = Vector2::new(d.x - dst_mean.x, d.y - dst_mean.y);
        cov += dd * sd.transpose();
        src_var += sd.norm_squared();
    }
    cov /= n;
    src_var /= n;

    // Reflection-correction sign vector (eq. 39).
    let mut d = Vector2::new(1.0, 1.0);
    if cov.determinant() < 0.0 {
        d.y = -1.0;
    }

    let svd = cov.svd(true, true);
    let u = svd.u.expect("SVD computed with u requested");
    let v_t = svd.v_t.expect("SVD computed with v_t requested");
    let sv = svd.singular_values;

    let rotation = match covariance_rank(&sv) {
        0 => return SimilarityTransform::degenerate(),
        // Rank-deficient case (eq. 43): pick the branch that avoids
        // introducing a reflection.
        1 => {
            if u.determinant() * v_t.determinant() > 0.0 {
                u * v_t
            } else {
                u * Matrix2::from_diagonal(&Vector2::new(1.0, -1.0)) * v_t
            }
        }
        _ => u * Matrix2::from_diagonal(&d) * v_t,
    };

    // Scale from the trace of S*d over the source variance (eq. 41-42).
    let scale = (sv[0] * d.x + sv[1] * d.y) / src_var;

    let sr = rotation * scale;
    let tx = dst_mean.x - (sr[(0, 0)] * src_mean.x + sr[(0, 1)] * src_mean.y);
    let ty = dst_mean.y - (sr[(1, 0)] * src_mean.x + sr[(1, 1)] * src_mean.y);

    SimilarityTransform::new([
        [sr[(0, 0)], sr[(0, 1)], tx],
        [sr[(1, 0)], sr[(1, 1)], ty],
    ])
}

/// Numerical rank of the 2x2 covariance from its singular values, using the
/// `max(S) * dim * eps` threshold convention.
fn covariance_rank(sv: &Vector2<f64>) -> usize {
    let tol = sv.max() * 2.0 * f64::EPSILON;
    sv.iter().filter(|&&s| s > tol).count()
}
