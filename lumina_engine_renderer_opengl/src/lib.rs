/*!
# Lumina - OpenGL Renderer Backend

OpenGL implementation of the Lumina rendering engine.

This crate implements the lumina_engine traits on top of SDL2 for window and
context management and the glow library for OpenGL function loading. The
context profile and version come from `Config` (4.1 core by default, which
works on Windows, Linux and macOS).

Everything here is single-threaded: the GL context is current on the thread
that created the renderer, and all resources must be used and dropped on that
thread, before the renderer itself.
*/

// OpenGL implementation modules
mod debug;
mod opengl_mesh;
mod opengl_renderer;
mod opengl_shader_program;

pub use opengl_mesh::OpenGlMesh;
pub use opengl_renderer::OpenGlRenderer;
pub use opengl_shader_program::OpenGlShaderProgram;
