//! Canonical mean-face landmark layout.
//!
//! 51 points in normalized `[0,1] x [0,1]` space covering the 68-point
//! convention from index 17 on (brows, nose, eyes, mouth). The jawline
//! (indices 0..17) is excluded: jaw points move too much under expression
//! changes to anchor a similarity fit. All detected faces are aligned
//! toward this layout before synthesis.

use crate::shared::point::Point2D;

/// Number of leading jawline landmarks excluded from alignment.
pub const JAW_LANDMARKS: usize = 17;

/// Number of landmarks participating in the similarity fit.
pub const INNER_LANDMARKS: usize = 51;

#[rustfmt::skip]
const MEAN_FACE_X: [f64; INNER_LANDMARKS] = [
    0.000213256, 0.0752622, 0.18113, 0.29077, 0.393397, 0.586856, 0.689483, 0.799124,
    0.904991, 0.98004, 0.490127, 0.490127, 0.490127, 0.490127, 0.36688, 0.426036,
    0.490127, 0.554217, 0.613373, 0.121737, 0.187122, 0.265825, 0.334606, 0.260918,
    0.182743, 0.645647, 0.714428, 0.793132, 0.858516, 0.79751, 0.719335, 0.254149,
    0.340985, 0.428858, 0.490127, 0.551395, 0.639268, 0.726104, 0.642159, 0.556721,
    0.490127, 0.423532, 0.338094, 0.290379, 0.428096, 0.490127, 0.552157, 0.689874,
    0.553364, 0.490127, 0.42689,
];

#[rustfmt::skip]
const MEAN_FACE_Y: [f64; INNER_LANDMARKS] = [
    0.106454, 0.038915, 0.0187482, 0.0344891, 0.0773906, 0.0773906, 0.0344891,
    0.0187482, 0.038915, 0.106454, 0.203352, 0.307009, 0.409805, 0.515625, 0.587326,
    0.609345, 0.628106, 0.609345, 0.587326, 0.216423, 0.178758, 0.179852, 0.231733,
    0.245099, 0.244077, 0.231733, 0.179852, 0.178758, 0.216423, 0.244077, 0.245099,
    0.780233, 0.745405, 0.727388, 0.742578, 0.727388, 0.745405, 0.780233, 0.864805,
    0.902192, 0.909281, 0.902192, 0.864805, 0.784792, 0.778746, 0.785343, 0.778746,
    0.784792, 0.824182, 0.831803, 0.824182,
];

/// The canonical reference shape as points.
pub fn reference_shape() -> [Point2D; INNER_LANDMARKS] {
    std::array::from_fn(|i| Point2D::new(MEAN_FACE_X[i], MEAN_FACE_Y[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_fits_unit_square() {
        for p in reference_shape() {
            assert!((0.0..=1.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((0.0..=1.0).contains(&p.y), "y out of range: {}", p.y);
        }
    }

    #[test]
    fn test_shape_covers_the_inner_landmark_count() {
        assert_eq!(reference_shape().len(), 68 - JAW_LANDMARKS);
    }

    #[test]
    fn test_nose_tip_is_horizontally_centered() {
        // Index 33 - 17 = 16 is the nose tip in the 68-point convention; the
        // mean face is symmetric about its vertical midline.
        let shape = reference_shape();
        let nose_tip = shape[33 - JAW_LANDMARKS];
        assert!((nose_tip.x - 0.490127).abs() < 1e-9);
    }
}
