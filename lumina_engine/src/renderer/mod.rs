//! Renderer module - all rendering-related types and traits

// Module declarations
pub mod renderer;
pub mod renderer_mesh;
pub mod renderer_shader;

// Re-export everything from renderer.rs
pub use renderer::*;

// Re-export from other modules
pub use renderer_mesh::*;
pub use renderer_shader::*;

// Mock renderer for tests (no GPU required)
#[cfg(test)]
pub mod mock_renderer;

#[cfg(test)]
mod mock_renderer_tests;
