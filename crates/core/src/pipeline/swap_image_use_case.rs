//! Single-image swap: detection, swap, and output in one call, no
//! pre-pass or cache.

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::synthesis::domain::face_source::FaceSource;
use crate::video::domain::frame_writer::FrameWriter;

use super::face_swapper::FaceSwapper;

pub struct SwapImageUseCase {
    swapper: FaceSwapper,
    detector: Box<dyn FaceDetector>,
}

impl SwapImageUseCase {
    pub fn new(swapper: FaceSwapper, detector: Box<dyn FaceDetector>) -> Self {
        Self { swapper, detector }
    }

    /// Detect, swap, and write one frame; returns the composited frame.
    pub fn execute(
        &mut self,
        frame: &Frame,
        source: &mut dyn FaceSource,
        writer: &mut dyn FrameWriter,
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        let faces = self.detector.detect(frame)?;
        let out = self.swapper.swap_frame(frame, &faces, source)?;
        writer.write(&out)?;
        writer.close()?;
        Ok(out)
    }
}
