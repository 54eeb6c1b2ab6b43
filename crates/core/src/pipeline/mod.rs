pub mod extract_faces_use_case;
pub mod face_swapper;
pub mod pipeline_logger;
pub mod stream_session;
pub mod swap_config;
pub mod swap_image_use_case;
pub mod swap_video_use_case;
