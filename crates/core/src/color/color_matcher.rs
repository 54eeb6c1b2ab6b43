//! Global color rectification between the synthesized face patch and the
//! original patch it replaces.
//!
//! Two steps: a linear ramp along the patch border that fades the new face
//! into the old one (so the patch boundary never shows a hard seam), then a
//! single mean-difference shift of the interior that equalizes brightness
//! and skin tone without per-pixel color transfer.

use crate::error::SwapError;
use crate::shared::frame::Frame;

/// Width, in pixels, of the border ramp and of the interior margin the
/// mean-difference is computed over.
const BORDER_RANK: usize = 5;

#[derive(Clone, Copy, Debug, Default)]
pub struct ColorMatcher;

impl ColorMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Rectify `new_face` against `old_face`; both must share the canonical
    /// patch dimensions. Returns the corrected patch, clipped to `[0, 255]`.
    pub fn match_color(&self, old_face: &Frame, new_face: &Frame) -> Result<Frame, SwapError> {
        if !old_face.same_dimensions(new_face) {
            return Err(SwapError::PatchSizeMismatch {
                old_width: old_face.width(),
                old_height: old_face.height(),
                new_width: new_face.width(),
                new_height: new_face.height(),
            });
        }

        let (w, h) = (new_face.width() as usize, new_face.height() as usize);
        let channels = new_face.channels() as usize;
        let old: Vec<f64> = old_face.data().iter().map(|&v| v as f64).collect();
        let mut out: Vec<f64> = new_face.data().iter().map(|&v| v as f64).collect();

        self.ramp_border(&old, &mut out, w, h, channels);

        // Patches too small to have an interior keep only the ramp.
        if w > 2 * BORDER_RANK && h > 2 * BORDER_RANK {
            self.shift_interior(&old, &mut out, w, h, channels);
        }

        let data = out
            .iter()
            .map(|&v| v.round().clamp(0.0, 255.0) as u8)
            .collect();
        Ok(Frame::new(
            data,
            new_face.width(),
            new_face.height(),
            new_face.channels(),
            new_face.index(),
        ))
    }

    /// Blend ring `i` of the border (top row, bottom row, left column,
    /// right column, each independent) with weight `i / rank` for the new
    /// face, so the outermost ring is entirely the old face.
    fn ramp_border(&self, old: &[f64], out: &mut [f64], w: usize, h: usize, channels: usize) {
        let rank = BORDER_RANK.min(w / 2).min(h / 2);
        let scale = 1.0 / BORDER_RANK as f64;
        let mut blend = |x: usize, y: usize, i: usize| {
            let off = (y * w + x) * channels;
            let w_new = scale * i as f64;
            let w_old = scale * (BORDER_RANK - i) as f64;
            for c in 0..channels {
                out[off + c] = w_new * out[off + c] + w_old * old[off + c];
            }
        };

        for i in 0..rank {
            for x in i..w - i {
                blend(x, i, i); // top row of ring i
                blend(x, h - 1 - i, i); // bottom row
            }
            for y in i + 1..h - 1 - i {
                blend(i, y, i); // left column
                blend(w - 1 - i, y, i); // right column
            }
        }
    }

    /// Add the mean per-channel difference over the interior (everything
    /// beyond the border ramp) uniformly to the interior.
    fn shift_interior(&self, old: &[f64], out: &mut [f64], w: usize, h: usize, channels: usize) {
        let rank = BORDER_RANK;
        let mut diff_sum = vec![0.0f64; channels];
        for y in rank..h - rank {
            for x in rank..w - rank {
                let off = (y * w + x) * channels;
                for c in 0..channels {
                    diff_sum[c] += old[off + c] - out[off + c];
                }
            }
        }
        let count = ((w - 2 * rank) * (h - 2 * rank)) as f64;
        for d in &mut diff_sum {
            *d /= count;
        }

        for y in rank..h - rank {
            for x in rank..w - rank {
                let off = (y * w + x) * channels;
                for c in 0..channels {
                    out[off + c] += diff_sum[c];
                }
            }
        }
    }
}
