//! Final insertion of the corrected face patch into the destination frame.

use crate::alignment::transform::SimilarityTransform;
use crate::masking::blend_mask::BlendMask;
use crate::shared::frame::Frame;
use crate::shared::point::Point2D;
use crate::warping::warper;

use super::seamless;

/// How the warped face is merged with the destination frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Per-pixel alpha blend weighted by the mask.
    #[default]
    Masked,
    /// Gradient-domain cloning centered on the face.
    Seamless,
}

/// Blends an aligned face patch into a frame using a prepared mask.
#[derive(Clone, Copy, Debug, Default)]
pub struct Compositor {
    mode: BlendMode,
}

impl Compositor {
    pub fn new(mode: BlendMode) -> Self {
        Self { mode }
    }

    /// Insert `face` (a canonical `face_size` x `face_size` patch) into
    /// `dest` under `transform`, weighted by `mask`.
    ///
    /// Pixels where the mask is zero are copied from the destination
    /// unchanged, byte for byte.
    pub fn composite(
        &self,
        dest: &Frame,
        face: &Frame,
        mask: &BlendMask,
        transform: &SimilarityTransform,
        face_size: u32,
    ) -> Frame {
        let warped = warper::warp_from_canonical(face, transform, dest);
        match self.mode {
            BlendMode::Masked => alpha_blend(dest, &warped, mask),
            BlendMode::Seamless => {
                // Face center: canonical patch center pushed back to frame
                // coordinates.
                let half = face_size as f64 / 2.0;
                let center = transform
                    .inverse()
                    .map(|inv| inv.apply(Point2D::new(half, half)))
                    .unwrap_or_else(|| {
                        Point2D::new(dest.width() as f64 / 2.0, dest.height() as f64 / 2.0)
                    });
                seamless::seamless_clone(dest, &warped, mask, center)
            }
        }
    }
}

/// `mask * warped + (1 - mask) * dest` per channel, in f32. Zero-weight
/// pixels short-circuit to the destination bytes so untouched regions stay
/// bit-identical.
fn alpha_blend(dest: &Frame, warped: &Frame, mask: &BlendMask) -> Frame {
    debug_assert!(dest.same_dimensions(warped));
    let mut out = dest.clone();
    let (w, h) = (dest.width() as usize, dest.height() as usize);
    for y in 0..h {
        for x in 0..w {
            let weight = mask.get(x, y);
            if weight <= 0.0 {
                continue;
            }
            let d = dest.pixel(x, y);
            let s = warped.pixel(x, y);
            let o = out.pixel_mut(x, y);
            for c in 0..o.len() {
                let v = weight * s[c] as f32 + (1.0 - weight) * d[c] as f32;
                o[c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}
