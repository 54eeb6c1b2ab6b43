//! Affine resampling between the source frame and the canonical face square.
//!
//! `warp_to_canonical` extracts a face into an `n x n` canonical patch;
//! `warp_from_canonical` paints a canonical patch back into source-frame
//! coordinates with border-transparent semantics: destination pixels whose
//! canonical coordinates fall outside the patch keep their original value.
//! Both return new buffers and never mutate their inputs.

use crate::alignment::transform::SimilarityTransform;
use crate::shared::frame::Frame;
use crate::shared::point::Point2D;

/// Resample the face region of `frame` into a `size x size` canonical patch.
///
/// `transform` maps source-frame coordinates to canonical pixel coordinates;
/// each output pixel samples the source bilinearly at the inverse-mapped
/// position. Samples outside the source stay black.
pub fn warp_to_canonical(frame: &Frame, transform: &SimilarityTransform, size: u32) -> Frame {
    let mut out = Frame::zeros(size, size, frame.channels(), frame.index());
    let Some(inverse) = transform.inverse() else {
        return out;
    };

    let channels = frame.channels() as usize;
    let mut sample = vec![0.0f32; channels];
    for y in 0..size {
        for x in 0..size {
            let src = inverse.apply(Point2D::new(x as f64, y as f64));
            if sample_bilinear(frame, src.x, src.y, &mut sample) {
                let px = out.pixel_mut(x as usize, y as usize);
                for (dst, &v) in px.iter_mut().zip(&sample) {
                    *dst = v.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
    out
}

/// Paint a canonical-space face patch into a copy of `dest`.
///
/// `transform` is the same forward source-to-canonical map used for the
/// extraction warp; destination pixels that land inside the canonical square
/// are replaced with bilinear samples of `face`, all others keep the
/// destination value.
pub fn warp_from_canonical(face: &Frame, transform: &SimilarityTransform, dest: &Frame) -> Frame {
    let mut out = dest.clone();
    let size = face.width() as f64;
    let (x0, y0, x1, y1) = dest_bounds(transform, size, dest.width(), dest.height());

    let channels = out.channels() as usize;
    let mut sample = vec![0.0f32; channels];
    for y in y0..y1 {
        for x in x0..x1 {
            let c = transform.apply(Point2D::new(x as f64, y as f64));
            if c.x < 0.0 || c.y < 0.0 || c.x >= size || c.y >= size {
                continue;
            }
            if sample_bilinear(face, c.x, c.y, &mut sample) {
                let px = out.pixel_mut(x, y);
                for (dst, &v) in px.iter_mut().zip(&sample) {
                    *dst = v.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
    out
}

/// Destination-space bounding box of the warped canonical square, clamped to
/// the frame. Falls back to the full frame when the transform cannot be
/// inverted.
pub fn dest_bounds(
    transform: &SimilarityTransform,
    size: f64,
    width: u32,
    height: u32,
) -> (usize, usize, usize, usize) {
    let Some(inverse) = transform.inverse() else {
        return (0, 0, width as usize, height as usize);
    };
    let corners = [
        inverse.apply(Point2D::new(0.0, 0.0)),
        inverse.apply(Point2D::new(size, 0.0)),
        inverse.apply(Point2D::new(0.0, size)),
        inverse.apply(Point2D::new(size, size)),
    ];
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for c in corners {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }
    let x0 = (min_x.floor() as i64).clamp(0, width as i64) as usize;
    let y0 = (min_y.floor() as i64).clamp(0, height as i64) as usize;
    let x1 = (max_x.ceil() as i64 + 1).clamp(0, width as i64) as usize;
    let y1 = (max_y.ceil() as i64 + 1).clamp(0, height as i64) as usize;
    (x0, y0, x1, y1)
}

/// Bilinear sample of all channels at `(x, y)` into `out`.
///
/// Returns `false` without touching `out` when the position lies outside the
/// image.
fn sample_bilinear(frame: &Frame, x: f64, y: f64, out: &mut [f32]) -> bool {
    let (w, h) = (frame.width() as usize, frame.height() as usize);
    if x < 0.0 || y < 0.0 || x > (w - 1) as f64 || y > (h - 1) as f64 {
        return false;
    }
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let p00 = frame.pixel(x0, y0);
    let p10 = frame.pixel(x1, y0);
    let p01 = frame.pixel(x0, y1);
    let p11 = frame.pixel(x1, y1);
    for c in 0..out.len() {
        out[c] = p00[c] as f32 * (1.0 - fx) * (1.0 - fy)
            + p10[c] as f32 * fx * (1.0 - fy)
            + p01[c] as f32 * (1.0 - fx) * fy
            + p11[c] as f32 * fx * fy;
    }
    true
}
