use thiserror::Error;

/// Stream-fatal failures of the swap pipeline.
///
/// Per-face degradations (degenerate alignment, collapsed hull) are not
/// errors: the face is left unswapped and processing continues. These
/// variants abort the stream and must reach the caller; frames already
/// written stay written.
#[derive(Error, Debug)]
pub enum SwapError {
    /// The replacement-face supply ran dry while frames still had faces.
    #[error("replacement face source exhausted at frame {frame_index}")]
    ReplacementSourceExhausted { frame_index: usize },

    /// The pre-extracted face cache was consumed faster than it was filled,
    /// which means the compositing pass lost sync with the detection pass.
    #[error("face cache exhausted at frame {frame_index} but frames remain")]
    FaceCacheExhausted { frame_index: usize },

    /// Color matching requires both patches to share the canonical size.
    #[error("patch size mismatch: old {old_width}x{old_height}, new {new_width}x{new_height}")]
    PatchSizeMismatch {
        old_width: u32,
        old_height: u32,
        new_width: u32,
        new_height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_frame() {
        let err = SwapError::ReplacementSourceExhausted { frame_index: 42 };
        assert!(err.to_string().contains("42"));

        let err = SwapError::FaceCacheExhausted { frame_index: 7 };
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn test_patch_mismatch_reports_both_sizes() {
        let err = SwapError::PatchSizeMismatch {
            old_width: 64,
            old_height: 64,
            new_width: 32,
            new_height: 64,
        };
        let msg = err.to_string();
        assert!(msg.contains("64x64"));
        assert!(msg.contains("32x64"));
    }
}
