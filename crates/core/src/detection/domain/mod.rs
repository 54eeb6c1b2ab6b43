pub mod detected_face;
pub mod face_cache;
pub mod face_detector;
pub mod landmark_set;
