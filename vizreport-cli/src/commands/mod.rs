pub mod package;
pub mod render;
