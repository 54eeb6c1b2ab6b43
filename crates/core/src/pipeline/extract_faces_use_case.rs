//! Video pre-pass: detect and align every face before any frame is
//! composited.

use crate::detection::domain::face_cache::FaceCache;
use crate::detection::domain::face_detector::FaceDetector;
use crate::synthesis::domain::aligned_face_sink::AlignedFaceSink;
use crate::video::domain::frame_reader::FrameReader;

use super::face_swapper::FaceSwapper;
use super::pipeline_logger::PipelineLogger;

/// First pass over a stream: detects faces per frame, writes each aligned
/// canonical face to the sink (the synthesis model's input), and returns
/// the cache the swap pass will replay.
///
/// Faces whose alignment is degenerate are dropped here, not during the
/// swap pass, so the cache and the replacement source stay in lockstep:
/// every cached face will consume exactly one replacement later.
pub struct ExtractFacesUseCase {
    detector: Box<dyn FaceDetector>,
    sink: Box<dyn AlignedFaceSink>,
}

impl ExtractFacesUseCase {
    pub fn new(detector: Box<dyn FaceDetector>, sink: Box<dyn AlignedFaceSink>) -> Self {
        Self { detector, sink }
    }

    pub fn execute(
        &mut self,
        reader: &mut dyn FrameReader,
        swapper: &FaceSwapper,
        logger: &mut dyn PipelineLogger,
    ) -> Result<FaceCache, Box<dyn std::error::Error>> {
        let mut cache = FaceCache::new();
        let result = (|| -> Result<(), Box<dyn std::error::Error>> {
            for item in reader.frames() {
                let frame = item?;
                let detected = self.detector.detect(&frame)?;
                let mut usable = Vec::with_capacity(detected.len());
                for face in detected {
                    let Some(transform) = swapper.align_face(&face) else {
                        log::warn!(
                            "frame {}: dropping face with degenerate alignment",
                            frame.index()
                        );
                        continue;
                    };
                    let aligned = swapper.extract_face(&frame, &transform);
                    self.sink.write(&aligned)?;
                    usable.push(face);
                }
                cache.push_frame(usable);
            }
            Ok(())
        })();
        reader.close();
        result?;

        logger.info(&format!("Extracted faces from {} frames", cache.len()));
        Ok(cache)
    }
}
