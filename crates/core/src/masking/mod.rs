pub mod blend_mask;
pub mod convex_hull;
pub mod mask_synthesizer;
