/*!
# Lumina Engine

Core traits and types for the Lumina rendering engine.

This crate provides the platform-agnostic API for a minimal rendering loop:
window/context bring-up, shader program building, mesh upload and a
clear/activate/draw/swap frame driver. Backend implementations (OpenGL today)
live in sibling crates and implement the traits defined here.

## Architecture

- **Renderer**: factory and frame-driver trait
- **RendererShaderProgram**: linked, GPU-resident program resource trait
- **RendererMesh**: uploaded vertex/index data resource trait

Backend implementations provide concrete types that implement these traits.
All of them are single-threaded by design: the graphics context is current on
the calling thread and the traits are deliberately not `Send`/`Sync`.
*/

// Internal modules
mod engine;
mod error;
pub mod log;
pub mod renderer;

// Main lumina namespace module
pub mod lumina {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine facade (logging services)
    pub use crate::engine::Engine;

    // Renderer trait
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }
}

// Flat re-exports for backend crates
pub use engine::Engine;
pub use error::{Error, Result};
pub use renderer::{
    Config, DeviceInfo, MeshDesc, Renderer, RendererMesh, RendererShaderProgram, RendererStats,
    ShaderSource, ShaderStage, VertexAttribute, VertexLayout,
};

// Re-export math library at crate root
pub use glam;
