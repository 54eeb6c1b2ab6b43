//! Per-frame swap of detected faces with replacement patches.

use crate::alignment::reference_shape::reference_shape;
use crate::alignment::similarity::estimate_similarity;
use crate::alignment::transform::SimilarityTransform;
use crate::color::color_matcher::ColorMatcher;
use crate::compositing::compositor::{BlendMode, Compositor};
use crate::detection::domain::detected_face::DetectedFace;
use crate::error::SwapError;
use crate::masking::mask_synthesizer::MaskSynthesizer;
use crate::shared::frame::Frame;
use crate::synthesis::domain::face_source::FaceSource;
use crate::warping::warper;

use super::swap_config::SwapConfig;

/// Applies the full align / mask / color / composite chain to each face of
/// a frame. Holds the algorithmic components by value; collaborators
/// (detector, replacement source) are passed in by the use cases.
pub struct FaceSwapper {
    synthesizer: MaskSynthesizer,
    matcher: ColorMatcher,
    compositor: Compositor,
    face_size: u32,
}

impl FaceSwapper {
    pub fn new(config: &SwapConfig) -> Self {
        let mode = if config.seamless {
            BlendMode::Seamless
        } else {
            BlendMode::Masked
        };
        Self {
            synthesizer: MaskSynthesizer::new(
                config.mask_kind,
                config.erosion_radius,
                config.blur_size,
            ),
            matcher: ColorMatcher::new(),
            compositor: Compositor::new(mode),
            face_size: config.face_size,
        }
    }

    pub fn face_size(&self) -> u32 {
        self.face_size
    }

    /// Frame-to-canonical-pixel transform for one face, or `None` when the
    /// landmark geometry is degenerate and no alignment exists.
    pub fn align_face(&self, face: &DetectedFace) -> Option<SimilarityTransform> {
        let transform = estimate_similarity(face.landmarks().inner(), &reference_shape());
        if transform.is_degenerate() {
            return None;
        }
        Some(transform.scaled(self.face_size as f64))
    }

    /// Resample the face region into the canonical patch.
    pub fn extract_face(&self, frame: &Frame, transform: &SimilarityTransform) -> Frame {
        warper::warp_to_canonical(frame, transform, self.face_size)
    }

    /// Swap every face of `frame`, in detection order, against replacement
    /// patches pulled from `source`.
    ///
    /// Faces are applied sequentially, so overlapping faces resolve to
    /// last-applied-wins. A degenerate face is skipped without consuming a
    /// replacement; a drained source is fatal for the stream. With no
    /// faces the returned frame is a bit-identical clone of the input.
    pub fn swap_frame(
        &self,
        frame: &Frame,
        faces: &[DetectedFace],
        source: &mut dyn FaceSource,
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        let mut out = frame.clone();
        for face in faces {
            let Some(transform) = self.align_face(face) else {
                log::warn!(
                    "frame {}: degenerate alignment, face left unswapped",
                    frame.index()
                );
                continue;
            };
            let new_face = source
                .next_face()?
                .ok_or(SwapError::ReplacementSourceExhausted {
                    frame_index: frame.index(),
                })?;
            let old_face = self.extract_face(&out, &transform);
            let corrected = self.matcher.match_color(&old_face, &new_face)?;
            let mask = self.synthesizer.build(
                face.landmarks().points(),
                &transform,
                out.width(),
                out.height(),
                self.face_size,
            );
            out = self
                .compositor
                .composite(&out, &corrected, &mask, &transform, self.face_size);
        }
        Ok(out)
    }
}
