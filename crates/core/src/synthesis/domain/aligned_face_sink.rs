use crate::shared::frame::Frame;

/// Receives the aligned canonical faces produced by the extraction
/// pre-pass, in stream order. The synthesis model consumes these to
/// generate the replacement faces a `FaceSource` later serves back.
pub trait AlignedFaceSink: Send {
    fn write(&mut self, face: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
