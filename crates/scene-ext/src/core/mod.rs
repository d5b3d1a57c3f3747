pub mod scene;
pub mod timer;
