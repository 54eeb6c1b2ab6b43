//! Face alignment, masking, and compositing core for face swapping.
//!
//! The algorithmic components (similarity alignment against a canonical
//! reference shape, affine warping, blend-mask synthesis, color
//! rectification, compositing) are pure and collaborator-free; detection,
//! replacement-face synthesis, and frame I/O plug in through the `domain`
//! trait seams. The `pipeline` module wires everything into per-image and
//! per-stream use cases.

pub mod alignment;
pub mod color;
pub mod compositing;
pub mod detection;
pub mod error;
pub mod masking;
pub mod pipeline;
pub mod shared;
pub mod synthesis;
pub mod video;
pub mod warping;
