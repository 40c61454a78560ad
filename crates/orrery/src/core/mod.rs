pub mod camera;
pub mod scene;
pub mod time;
