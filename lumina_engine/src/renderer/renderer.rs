//! Renderer trait - factory and frame-driver interface

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::renderer::{MeshDesc, RendererMesh, RendererShaderProgram, ShaderSource};

// ============================================================================
// Configuration and info types
// ============================================================================

/// Renderer configuration
///
/// Window geometry and context attributes are caller inputs validated before
/// use, not trusted constants baked into the backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Window title
    pub window_title: String,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Requested OpenGL context version (major, minor)
    pub gl_version: (u8, u8),
    /// Depth buffer precision in bits
    pub depth_bits: u8,
    /// Synchronize buffer swaps with the display refresh
    pub vsync: bool,
    /// Show the window (the test suite runs with hidden windows)
    pub window_visible: bool,
    /// Drain and report pending GL error codes after context-affecting calls
    pub gl_checks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Lumina Window".to_string(),
            window_width: 640,
            window_height: 480,
            gl_version: (4, 1),
            depth_bits: 24,
            vsync: true,
            window_visible: true,
            gl_checks: cfg!(debug_assertions),
        }
    }
}

impl Config {
    /// Check the configuration before any window or context is created
    ///
    /// # Errors
    ///
    /// Returns `InitializationFailed` for a zero-sized window or a context
    /// version older than the core profile supports.
    pub fn validate(&self) -> Result<()> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(Error::InitializationFailed(format!(
                "window size {}x{} is invalid",
                self.window_width, self.window_height
            )));
        }
        if self.gl_version.0 < 3 {
            return Err(Error::InitializationFailed(format!(
                "OpenGL {}.{} does not support the core profile",
                self.gl_version.0, self.gl_version.1
            )));
        }
        Ok(())
    }
}

/// Information reported by the acquired graphics context
///
/// Useful when diagnosing driver issues on a user's machine.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub shading_language_version: String,
}

/// Renderer statistics
///
/// `draw_calls` and `triangles` reset at `begin_frame`; the `live_*` counters
/// track GPU resources that have been created and not yet dropped, which is
/// what leak tests probe after a failed build attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Number of draw calls this frame
    pub draw_calls: u32,
    /// Number of triangles drawn this frame
    pub triangles: u32,
    /// Shader programs currently alive
    pub live_shader_programs: u32,
    /// Meshes currently alive
    pub live_meshes: u32,
}

// ============================================================================
// Renderer trait
// ============================================================================

/// Main renderer trait
///
/// Factory for GPU resources plus the per-frame driver. Implemented by
/// backend-specific renderers (e.g., OpenGlRenderer).
///
/// All operations are synchronous and must run on the thread that owns the
/// graphics context; none of the types involved are `Send` or `Sync`.
/// Resources returned by the factory methods must be dropped before the
/// renderer that created them.
pub trait Renderer {
    /// Vendor/renderer/version strings reported by the context
    fn device_info(&self) -> DeviceInfo;

    /// Compile and link a vertex+fragment source pair into one program
    ///
    /// Both sources are consumed by the build. On success the returned handle
    /// is immediately usable with `activate`. On failure no handle is
    /// returned and no GPU object created during the attempt survives.
    ///
    /// # Errors
    ///
    /// `CompileFailed` with the offending stage and the full compiler log,
    /// `LinkFailed` with the linker log, or `InvalidResource` when a source
    /// is empty or declared for the wrong stage.
    fn create_shader_program(
        &mut self,
        vertex: ShaderSource,
        fragment: ShaderSource,
    ) -> Result<Arc<dyn RendererShaderProgram>>;

    /// Upload an indexed mesh described by `desc`
    ///
    /// The descriptor is validated first; inconsistent stride/offset layouts
    /// are rejected with `InvalidResource` before anything touches the GPU.
    fn create_mesh(&mut self, desc: &MeshDesc<'_>) -> Result<Arc<dyn RendererMesh>>;

    /// Start a frame: reset per-frame stats and clear to `clear_color` (RGBA)
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<()>;

    /// Make `program` the active program for subsequent draws
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the program was not created by this renderer.
    fn activate(&mut self, program: &dyn RendererShaderProgram) -> Result<()>;

    /// Bind the null program
    fn deactivate(&mut self);

    /// Draw `mesh` with the active program
    ///
    /// # Errors
    ///
    /// `InvalidResource` if no program is active or the mesh was not created
    /// by this renderer.
    fn draw(&mut self, mesh: &dyn RendererMesh) -> Result<()>;

    /// Finish the frame and present it (buffer swap)
    fn end_frame(&mut self) -> Result<()>;

    /// Notify the renderer that the drawable area changed
    fn resize(&mut self, width: u32, height: u32);

    /// Get statistics about the renderer
    fn stats(&self) -> RendererStats;
}
