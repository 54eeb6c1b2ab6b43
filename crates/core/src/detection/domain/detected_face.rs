use crate::shared::frame::Frame;

use super::landmark_set::LandmarkSet;

/// Bounding box of a detection, in source-frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBox {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// One face found in a frame: the cropped face pixels, where the crop came
/// from, and the landmarks in source-frame coordinates.
///
/// Immutable after construction; discarded after the frame is processed,
/// or cached per stream by the video pre-pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedFace {
    image: Frame,
    bounding_box: FaceBox,
    landmarks: LandmarkSet,
}

impl DetectedFace {
    pub fn new(image: Frame, bounding_box: FaceBox, landmarks: LandmarkSet) -> Self {
        Self {
            image,
            bounding_box,
            landmarks,
        }
    }

    pub fn image(&self) -> &Frame {
        &self.image
    }

    pub fn bounding_box(&self) -> FaceBox {
        self.bounding_box
    }

    pub fn landmarks(&self) -> &LandmarkSet {
        &self.landmarks
    }
}
