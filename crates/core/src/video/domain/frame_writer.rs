use crate::shared::frame::Frame;

/// Abstracts frame output so the pipeline can emit results without
/// depending on a specific codec or image library.
pub trait FrameWriter: Send {
    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
