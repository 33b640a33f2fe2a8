pub mod hardware;
pub mod renderer;
pub mod shaders;
