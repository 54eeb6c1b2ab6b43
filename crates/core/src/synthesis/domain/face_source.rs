use crate::shared::frame::Frame;

/// Supplies replacement face patches at the canonical size, one per face
/// to be swapped, in consumption order.
///
/// Returns `Ok(None)` when drained; the pipeline treats that as fatal for
/// the stream because every remaining face would go unswapped.
pub trait FaceSource: Send {
    fn next_face(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}
