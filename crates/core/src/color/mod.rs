pub mod color_matcher;
