use crate::detection::domain::detected_face::DetectedFace;
use crate::detection::domain::face_cache::FaceCache;
use crate::error::SwapError;
use crate::synthesis::domain::face_source::FaceSource;

/// Owned per-stream state: the face cache built by the pre-pass and the
/// replacement source feeding the swap pass.
///
/// Constructed for one stream and dropped when the stream ends, so stale
/// caches can never leak into the next stream.
pub struct StreamSession {
    cache: FaceCache,
    source: Box<dyn FaceSource>,
}

impl StreamSession {
    pub fn new(cache: FaceCache, source: Box<dyn FaceSource>) -> Self {
        Self { cache, source }
    }

    /// Number of frames the pre-pass cached for this stream.
    pub fn cached_frames(&self) -> usize {
        self.cache.len()
    }

    /// Pop the cached faces for the next frame, in FIFO order.
    pub fn faces_for(&mut self, frame_index: usize) -> Result<Vec<DetectedFace>, SwapError> {
        self.cache.take_frame(frame_index)
    }

    pub fn source_mut(&mut self) -> &mut dyn FaceSource {
        self.source.as_mut()
    }
}
