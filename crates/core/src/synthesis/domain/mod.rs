pub mod aligned_face_sink;
pub mod face_source;
