//! Embassy async tasks

pub mod camera;
pub mod link;

pub use camera::camera_task;
pub use link::link_task;
