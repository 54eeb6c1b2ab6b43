use crate::shared::frame::Frame;

use super::detected_face::DetectedFace;

/// Domain interface for face detection with landmarks.
///
/// Implementations may be stateful (e.g., tracking across frames),
/// hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>>;
}
