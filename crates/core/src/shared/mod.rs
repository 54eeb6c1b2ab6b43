pub mod frame;
pub mod point;
