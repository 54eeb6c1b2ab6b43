use std::collections::VecDeque;

use crate::error::SwapError;

use super::detected_face::DetectedFace;

/// Per-frame detection results collected by the pre-pass and replayed,
/// in order, during the swap pass.
///
/// The swap pass consumes exactly one entry per frame, so an exhausted
/// cache means the stream grew between the two passes and the session
/// must stop rather than guess.
#[derive(Debug, Default)]
pub struct FaceCache {
    frames: VecDeque<Vec<DetectedFace>>,
}

impl FaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Record the faces found in the next frame of the pre-pass.
    pub fn push_frame(&mut self, faces: Vec<DetectedFace>) {
        self.frames.push_back(faces);
    }

    /// Take the faces cached for the next frame of the swap pass.
    pub fn take_frame(&mut self, frame_index: usize) -> Result<Vec<DetectedFace>, SwapError> {
        self.frames
            .pop_front()
            .ok_or(SwapError::FaceCacheExhausted { frame_index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::detected_face::FaceBox;
    use crate::detection::domain::landmark_set::LandmarkSet;
    use crate::shared::frame::Frame;
    use crate::shared::point::Point2D;

    fn face(seed: f64) -> DetectedFace {
        let landmarks = LandmarkSet::new(std::array::from_fn(|i| {
            Point2D::new(seed + i as f64, seed)
        }));
        let crop = Frame::new(vec![0u8; 4 * 4 * 3], 4, 4, 3, 0);
        let bounding_box = FaceBox {
            x: seed as i64,
            y: 0,
            width: 4,
            height: 4,
        };
        DetectedFace::new(crop, bounding_box, landmarks)
    }

    #[test]
    fn test_replays_frames_in_order() {
        let mut cache = FaceCache::new();
        cache.push_frame(vec![face(1.0)]);
        cache.push_frame(vec![]);
        cache.push_frame(vec![face(2.0), face(3.0)]);

        assert_eq!(cache.take_frame(0).unwrap(), vec![face(1.0)]);
        assert!(cache.take_frame(1).unwrap().is_empty());
        assert_eq!(cache.take_frame(2).unwrap().len(), 2);
    }

    #[test]
    fn test_exhausted_cache_is_an_error() {
        let mut cache = FaceCache::new();
        cache.push_frame(vec![]);
        cache.take_frame(0).unwrap();

        let err = cache.take_frame(1).unwrap_err();
        assert!(matches!(
            err,
            SwapError::FaceCacheExhausted { frame_index: 1 }
        ));
    }
}
