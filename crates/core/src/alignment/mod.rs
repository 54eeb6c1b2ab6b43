pub mod reference_shape;
pub mod similarity;
pub mod transform;
