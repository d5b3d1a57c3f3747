pub mod animation;
pub mod node;
