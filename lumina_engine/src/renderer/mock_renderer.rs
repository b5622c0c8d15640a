//! Mock renderer for unit tests (no GPU required)
//!
//! Implements the full Renderer contract in memory, including the builder's
//! short-circuit order and the live-resource accounting, so the frame-driver
//! and build state machines can be tested without a graphics context.
//!
//! Failure injection: a source containing `!compile_error` fails its stage's
//! compilation; a source containing `!link_error` compiles but fails the
//! link, mirroring where each failure surfaces in a real build.

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::renderer::{
    Config, DeviceInfo, MeshDesc, Renderer, RendererMesh, RendererShaderProgram, RendererStats,
    ShaderSource, ShaderStage,
};

/// Marker that makes a stage fail compilation in the mock
pub const COMPILE_ERROR_MARKER: &str = "!compile_error";
/// Marker that makes the program fail linking in the mock
pub const LINK_ERROR_MARKER: &str = "!link_error";

// ============================================================================
// Mock resources
// ============================================================================

pub struct MockShaderProgram {
    live: Rc<Cell<u32>>,
}

impl RendererShaderProgram for MockShaderProgram {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockShaderProgram {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub struct MockMesh {
    index_count: u32,
    live: Rc<Cell<u32>>,
}

impl RendererMesh for MockMesh {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn index_count(&self) -> u32 {
        self.index_count
    }
}

impl Drop for MockMesh {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

// ============================================================================
// Mock renderer
// ============================================================================

pub struct MockRenderer {
    draw_calls: u32,
    triangles: u32,
    live_programs: Rc<Cell<u32>>,
    live_meshes: Rc<Cell<u32>>,
    program_active: bool,
    pub width: u32,
    pub height: u32,
}

impl MockRenderer {
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            draw_calls: 0,
            triangles: 0,
            live_programs: Rc::new(Cell::new(0)),
            live_meshes: Rc::new(Cell::new(0)),
            program_active: false,
            width: config.window_width,
            height: config.window_height,
        }
    }

    fn mock_compile(&self, source: &ShaderSource, stage: ShaderStage) -> Result<()> {
        source.ensure_usable_as(stage)?;
        if source.text().contains(COMPILE_ERROR_MARKER) {
            return Err(Error::CompileFailed {
                stage,
                log: format!("mock: {} stage refused to compile", stage),
            });
        }
        Ok(())
    }
}

impl Renderer for MockRenderer {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            vendor: "Lumina".to_string(),
            renderer: "MockRenderer".to_string(),
            version: "0.0".to_string(),
            shading_language_version: "0.0".to_string(),
        }
    }

    fn create_shader_program(
        &mut self,
        vertex: ShaderSource,
        fragment: ShaderSource,
    ) -> Result<Arc<dyn RendererShaderProgram>> {
        // Same order as the real builder: vertex compile, fragment compile,
        // then link. A compile failure short-circuits before the link.
        self.mock_compile(&vertex, ShaderStage::Vertex)?;
        self.mock_compile(&fragment, ShaderStage::Fragment)?;

        if vertex.text().contains(LINK_ERROR_MARKER) || fragment.text().contains(LINK_ERROR_MARKER)
        {
            return Err(Error::LinkFailed {
                log: "mock: stages refused to link".to_string(),
            });
        }

        self.live_programs.set(self.live_programs.get() + 1);
        Ok(Arc::new(MockShaderProgram {
            live: Rc::clone(&self.live_programs),
        }))
    }

    fn create_mesh(&mut self, desc: &MeshDesc<'_>) -> Result<Arc<dyn RendererMesh>> {
        desc.validate()?;
        self.live_meshes.set(self.live_meshes.get() + 1);
        Ok(Arc::new(MockMesh {
            index_count: desc.indices.len() as u32,
            live: Rc::clone(&self.live_meshes),
        }))
    }

    fn begin_frame(&mut self, _clear_color: [f32; 4]) -> Result<()> {
        self.draw_calls = 0;
        self.triangles = 0;
        Ok(())
    }

    fn activate(&mut self, program: &dyn RendererShaderProgram) -> Result<()> {
        let program = program
            .as_any()
            .downcast_ref::<MockShaderProgram>()
            .ok_or_else(|| {
                Error::InvalidResource(
                    "shader program was not created by this renderer".to_string(),
                )
            })?;
        // Same ownership rule as the real backends: a program from a sibling
        // renderer downcasts fine but must still be rejected.
        if !Rc::ptr_eq(&program.live, &self.live_programs) {
            return Err(Error::InvalidResource(
                "shader program was created by a different renderer".to_string(),
            ));
        }
        self.program_active = true;
        Ok(())
    }

    fn deactivate(&mut self) {
        self.program_active = false;
    }

    fn draw(&mut self, mesh: &dyn RendererMesh) -> Result<()> {
        if !self.program_active {
            return Err(Error::InvalidResource("no active shader program".to_string()));
        }
        let mesh = mesh.as_any().downcast_ref::<MockMesh>().ok_or_else(|| {
            Error::InvalidResource("mesh was not created by this renderer".to_string())
        })?;
        if !Rc::ptr_eq(&mesh.live, &self.live_meshes) {
            return Err(Error::InvalidResource(
                "mesh was created by a different renderer".to_string(),
            ));
        }
        self.draw_calls += 1;
        self.triangles += mesh.index_count() / 3;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn stats(&self) -> RendererStats {
        RendererStats {
            draw_calls: self.draw_calls,
            triangles: self.triangles,
            live_shader_programs: self.live_programs.get(),
            live_meshes: self.live_meshes.get(),
        }
    }
}
