use crate::masking::mask_synthesizer::MaskKind;

/// Edge length of the canonical aligned-face patch, in pixels.
pub const DEFAULT_FACE_SIZE: u32 = 64;

/// Default mask feathering window. Zero disables the blur.
pub const DEFAULT_BLUR_SIZE: usize = 2;

/// Tuning options for one swap run.
#[derive(Clone, Debug)]
pub struct SwapConfig {
    pub mask_kind: MaskKind,
    /// Box-blur window applied to the mask edges; 0 keeps them hard.
    pub blur_size: usize,
    /// Optional square erosion radius applied before the blur.
    pub erosion_radius: Option<usize>,
    /// Gradient-domain cloning instead of the weighted alpha blend.
    pub seamless: bool,
    pub face_size: u32,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            mask_kind: MaskKind::default(),
            blur_size: DEFAULT_BLUR_SIZE,
            erosion_radius: None,
            seamless: false,
            face_size: DEFAULT_FACE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SwapConfig::default();
        assert_eq!(config.mask_kind, MaskKind::RectAndHull);
        assert_eq!(config.blur_size, 2);
        assert_eq!(config.erosion_radius, None);
        assert!(!config.seamless);
        assert_eq!(config.face_size, 64);
    }
}
