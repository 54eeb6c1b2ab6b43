//! Blend-mask synthesis from face geometry.
//!
//! The mask decides, per destination pixel, how strongly the warped
//! replacement face overrides the original frame. Geometry comes from two
//! sources that can be combined: the warped canonical rectangle and the
//! convex hull of the facial landmarks.

use std::str::FromStr;

use thiserror::Error;

use crate::alignment::transform::SimilarityTransform;
use crate::shared::point::Point2D;
use crate::warping::warper::dest_bounds;

use super::blend_mask::BlendMask;
use super::convex_hull::{convex_hull, fill_convex_polygon};

/// Geometry policy for the blend mask.
///
/// A closed enum rather than substring matching on config strings, so an
/// unrecognized kind is a parse error instead of silently falling through
/// to a default. `Hull` is a first-class reachable option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaskKind {
    /// The warped canonical rectangle only.
    Rect,
    /// The filled convex hull of the landmarks only.
    Hull,
    /// Intersection of both: the rectangle trimmed to the silhouette.
    #[default]
    RectAndHull,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unrecognized mask kind: {0:?}")]
pub struct ParseMaskKindError(String);

impl FromStr for MaskKind {
    type Err = ParseMaskKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rect" => Ok(MaskKind::Rect),
            "hull" | "facehull" => Ok(MaskKind::Hull),
            "rectandhull" | "facehullandrect" => Ok(MaskKind::RectAndHull),
            other => Err(ParseMaskKindError(other.to_string())),
        }
    }
}

/// Builds frame-sized blend masks with optional erosion and edge feathering.
#[derive(Clone, Debug)]
pub struct MaskSynthesizer {
    kind: MaskKind,
    erosion_radius: Option<usize>,
    blur_size: usize,
}

impl MaskSynthesizer {
    pub fn new(kind: MaskKind, erosion_radius: Option<usize>, blur_size: usize) -> Self {
        Self {
            kind,
            erosion_radius,
            blur_size,
        }
    }

    /// Synthesize the mask for one face.
    ///
    /// `landmarks` are the face landmarks in destination-frame coordinates;
    /// `transform` is the frame-to-canonical map of the same face and
    /// `face_size` the canonical patch edge length. Output weights are
    /// clamped to `[0, 1]`; with blur disabled and no erosion the mask is
    /// binary.
    pub fn build(
        &self,
        landmarks: &[Point2D],
        transform: &SimilarityTransform,
        width: u32,
        height: u32,
        face_size: u32,
    ) -> BlendMask {
        let mut mask = match self.kind {
            MaskKind::Rect => self.rect_mask(transform, width, height, face_size),
            MaskKind::Hull => self.hull_mask(landmarks, width, height),
            MaskKind::RectAndHull => {
                let mut rect = self.rect_mask(transform, width, height, face_size);
                rect.intersect(&self.hull_mask(landmarks, width, height));
                rect
            }
        };

        if let Some(radius) = self.erosion_radius {
            if radius > 0 {
                erode(&mut mask, radius);
            }
        }
        if self.blur_size > 0 {
            box_blur(&mut mask, self.blur_size);
        }
        mask.clamp_unit();
        mask
    }

    /// Ones over the destination-space image of the canonical square.
    fn rect_mask(
        &self,
        transform: &SimilarityTransform,
        width: u32,
        height: u32,
        face_size: u32,
    ) -> BlendMask {
        let mut mask = BlendMask::zeros(width, height);
        let size = face_size as f64;
        let (x0, y0, x1, y1) = dest_bounds(transform, size, width, height);
        for y in y0..y1 {
            for x in x0..x1 {
                let c = transform.apply(Point2D::new(x as f64, y as f64));
                if c.x >= 0.0 && c.y >= 0.0 && c.x < size && c.y < size {
                    mask.set(x, y, 1.0);
                }
            }
        }
        mask
    }

    /// Ones inside the convex hull of the landmarks; all zero when the hull
    /// collapses (fewer than three distinct points), leaving the face
    /// unmodified rather than failing.
    fn hull_mask(&self, landmarks: &[Point2D], width: u32, height: u32) -> BlendMask {
        let mut mask = BlendMask::zeros(width, height);
        let hull = convex_hull(landmarks);
        if hull.is_empty() {
            log::warn!("convex hull collapsed, emitting an all-zero mask");
            return mask;
        }
        fill_convex_polygon(&mut mask, &hull);
        mask
    }
}

/// Square-window minimum filter of the given radius, run separably.
///
/// Shrinks the coverage inward, trimming thin artifact edges near the hull
/// boundary. Windows are clipped at the mask edges.
fn erode(mask: &mut BlendMask, radius: usize) {
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let r = radius as isize;
    let weights = mask.weights_mut();

    let mut pass = |horizontal: bool| {
        let snapshot = weights.clone();
        for y in 0..h {
            for x in 0..w {
                let mut min = f32::INFINITY;
                for k in -r..=r {
                    let (sx, sy) = if horizontal {
                        (x as isize + k, y as isize)
                    } else {
                        (x as isize, y as isize + k)
                    };
                    if sx < 0 || sy < 0 || sx >= w as isize || sy >= h as isize {
                        continue;
                    }
                    min = min.min(snapshot[[sy as usize, sx as usize]]);
                }
                weights[[y, x]] = min;
            }
        }
    };
    pass(true);
    pass(false);
}

/// Normalized box blur with window length `size`, run separably.
///
/// Window placement follows the `[i - size/2, i - size/2 + size - 1]`
/// anchor convention, with zero contribution outside the mask, so a
/// `size = 2` blur feathers exactly one pixel outward on the leading edges.
fn box_blur(mask: &mut BlendMask, size: usize) {
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let offset = (size / 2) as isize;
    let norm = 1.0 / size as f32;
    let weights = mask.weights_mut();

    let mut pass = |horizontal: bool| {
        let snapshot = weights.clone();
        for y in 0..h {
            for x in 0..w {
                let mut sum = 0.0f32;
                for k in 0..size as isize {
                    let (sx, sy) = if horizontal {
                        (x as isize - offset + k, y as isize)
                    } else {
                        (x as isize, y as isize - offset + k)
                    };
                    if sx < 0 || sy < 0 || sx >= w as isize || sy >= h as isize {
                        continue;
                    }
                    sum += snapshot[[sy as usize, sx as usize]];
                }
                weights[[y, x]] = sum * norm;
            }
        }
    };
    pass(true);
    pass(false);
}
