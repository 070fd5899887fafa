//! Thin wrappers around SDL2 and OpenGL: the window, GPU meshes and shader programs.

pub mod app;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use mesh::*;
pub use shader::*;
