//! Gradient-domain (Poisson) cloning for seamless face insertion.
//!
//! Solves the discrete Poisson equation over the nonzero-mask region with
//! the destination frame as Dirichlet boundary, so the inserted face keeps
//! the source gradients while its absolute colors relax toward the
//! surrounding frame. Gauss-Seidel iteration over the mask bounding box is
//! plenty for canonical-face-sized regions.

use crate::masking::blend_mask::BlendMask;
use crate::shared::frame::Frame;
use crate::shared::point::Point2D;

const ITERATIONS: usize = 300;

/// Clone `source` into a copy of `dest` over the nonzero region of `mask`.
///
/// `center` is the destination-space face center; the source patch (and its
/// mask) is shifted so the mask bounding-box center lands there, matching
/// how the warp positioned the face.
pub fn seamless_clone(
    dest: &Frame,
    source: &Frame,
    mask: &BlendMask,
    center: Point2D,
) -> Frame {
    let mut out = dest.clone();
    let Some((bx0, by0, bx1, by1)) = mask_bounds(mask) else {
        return out;
    };

    // Offset between where the mask sits in source space and where the
    // caller wants its center in destination space.
    let dx = (center.x.round() as i64) - ((bx0 + bx1) as i64 / 2);
    let dy = (center.y.round() as i64) - ((by0 + by1) as i64 / 2);

    let (w, h) = (dest.width() as i64, dest.height() as i64);
    let channels = dest.channels() as usize;

    // Region pixels in destination space, with their source-space twins.
    let in_region = |x: i64, y: i64| -> bool {
        let (sx, sy) = (x - dx, y - dy);
        sx >= bx0 as i64
            && sy >= by0 as i64
            && sx <= bx1 as i64
            && sy <= by1 as i64
            && mask.get(sx as usize, sy as usize) > 0.0
    };

    let rx0 = (bx0 as i64 + dx).clamp(0, w - 1);
    let ry0 = (by0 as i64 + dy).clamp(0, h - 1);
    let rx1 = (bx1 as i64 + dx).clamp(0, w - 1);
    let ry1 = (by1 as i64 + dy).clamp(0, h - 1);

    let rw = (rx1 - rx0 + 1) as usize;
    let rh = (ry1 - ry0 + 1) as usize;

    // f: the unknowns, initialized from the source patch.
    let mut f = vec![0.0f32; rw * rh * channels];
    for y in ry0..=ry1 {
        for x in rx0..=rx1 {
            let (sx, sy) = (((x - dx) as usize), ((y - dy) as usize));
            let src = source.pixel(sx.min(source.width() as usize - 1), sy.min(source.height() as usize - 1));
            let off = (((y - ry0) as usize) * rw + ((x - rx0) as usize)) * channels;
            for c in 0..channels {
                f[off + c] = src[c] as f32;
            }
        }
    }

    let source_at = |x: i64, y: i64, c: usize| -> f32 {
        let sx = ((x - dx).clamp(0, source.width() as i64 - 1)) as usize;
        let sy = ((y - dy).clamp(0, source.height() as i64 - 1)) as usize;
        source.pixel(sx, sy)[c] as f32
    };

    for _ in 0..ITERATIONS {
        for y in ry0..=ry1 {
            for x in rx0..=rx1 {
                if !in_region(x, y) {
                    continue;
                }
                let off = (((y - ry0) as usize) * rw + ((x - rx0) as usize)) * channels;
                for c in 0..channels {
                    let mut acc = 0.0f32;
                    let mut count = 0.0f32;
                    for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                        if nx < 0 || ny < 0 || nx >= w || ny >= h {
                            continue;
                        }
                        count += 1.0;
                        // Source gradient (guide field)
                        acc += source_at(x, y, c) - source_at(nx, ny, c);
                        // Neighbor value: unknown inside the region,
                        // destination boundary outside it
                        if in_region(nx, ny) && nx >= rx0 && nx <= rx1 && ny >= ry0 && ny <= ry1 {
                            let noff =
                                (((ny - ry0) as usize) * rw + ((nx - rx0) as usize)) * channels;
                            acc += f[noff + c];
                        } else {
                            acc += dest.pixel(nx as usize, ny as usize)[c] as f32;
                        }
                    }
                    if count > 0.0 {
                        f[off + c] = acc / count;
                    }
                }
            }
        }
    }

    for y in ry0..=ry1 {
        for x in rx0..=rx1 {
            if !in_region(x, y) {
                continue;
            }
            let off = (((y - ry0) as usize) * rw + ((x - rx0) as usize)) * channels;
            let px = out.pixel_mut(x as usize, y as usize);
            for c in 0..channels {
                px[c] = f[off + c].round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}

/// Inclusive bounding box of the nonzero mask weights, or `None` for an
/// all-zero mask.
fn mask_bounds(mask: &BlendMask) -> Option<(usize, usize, usize, usize)> {
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let (mut x0, mut y0, mut x1, mut y1) = (w, h, 0usize, 0usize);
    let mut any = false;
    for y in 0..h {
        for x in 0..w {
            if mask.get(x, y) > 0.0 {
                any = true;
                x0 = x0.min(x);
                y0 = y0.min(y);
                x1 = x1.max(x);
                y1 = y1.max(y);
            }
        }
    }
    any.then_some((x0, y0, x1, y1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(w: u32, h: u32, value: u8) -> Frame {
        Frame::new(vec![value; (w * h * 3) as usize], w, h, 3, 0)
    }

    fn box_mask(w: u32, h: u32, x0: usize, y0: usize, x1: usize, y1: usize) -> BlendMask {
        let mut mask = BlendMask::zeros(w, h);
        for y in y0..=y1 {
            for x in x0..=x1 {
                mask.set(x, y, 1.0);
            }
        }
        mask
    }

    #[test]
    fn test_empty_mask_returns_destination() {
        let dest = uniform(20, 20, 80);
        let source = uniform(20, 20, 200);
        let mask = BlendMask::zeros(20, 20);
        let out = seamless_clone(&dest, &source, &mask, Point2D::new(10.0, 10.0));
        assert_eq!(out.data(), dest.data());
    }

    #[test]
    fn test_pixels_outside_mask_untouched() {
        let dest = uniform(20, 20, 80);
        let source = uniform(20, 20, 200);
        let mask = box_mask(20, 20, 6, 6, 13, 13);
        let out = seamless_clone(&dest, &source, &mask, Point2D::new(9.0, 9.0));
        assert_eq!(out.pixel(0, 0), dest.pixel(0, 0));
        assert_eq!(out.pixel(19, 19), dest.pixel(19, 19));
        assert_eq!(out.pixel(5, 9), dest.pixel(5, 9));
    }

    #[test]
    fn test_flat_source_relaxes_to_destination_level() {
        // A flat source has zero gradients everywhere, so the solution is
        // the harmonic fill of the boundary: the flat destination color.
        let dest = uniform(20, 20, 80);
        let source = uniform(20, 20, 200);
        let mask = box_mask(20, 20, 8, 8, 11, 11);
        let out = seamless_clone(&dest, &source, &mask, Point2D::new(9.0, 9.0));
        for y in 8..=11 {
            for x in 8..=11 {
                let v = out.pixel(x, y)[0] as i32;
                assert!((v - 80).abs() <= 1, "({x},{y}) = {v}, want ~80");
            }
        }
    }

    #[test]
    fn test_source_gradients_survive_cloning() {
        // Source has a sharp internal step; the clone must keep the step
        // even though absolute levels shift toward the destination.
        let dest = uniform(24, 24, 100);
        let mut source = uniform(24, 24, 60);
        for y in 0..24 {
            for x in 12..24 {
                source.pixel_mut(x, y).copy_from_slice(&[160, 160, 160]);
            }
        }
        let mask = box_mask(24, 24, 8, 8, 15, 15);
        let out = seamless_clone(&dest, &source, &mask, Point2D::new(11.0, 11.0));
        let left = out.pixel(10, 11)[0] as i32;
        let right = out.pixel(13, 11)[0] as i32;
        assert!(
            right - left > 50,
            "step lost: left {left}, right {right}"
        );
    }
}
