pub mod compositor;
pub mod seamless;
