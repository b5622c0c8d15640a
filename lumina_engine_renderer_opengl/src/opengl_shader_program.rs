//! OpenGlShaderProgram - the shader program builder and its linked artifact
//!
//! Build pipeline: compile vertex, compile fragment, attach, link, report
//! any leftover info-log warnings, detach and delete the stage objects.
//! Stage objects never escape this module, and every failure path deletes
//! the GPU objects it allocated before the error is returned, so repeated
//! failed builds do not leak.

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use glow::HasContext;
use lumina_engine::engine_warn;
use lumina_engine::{Error, RendererShaderProgram, Result, ShaderSource, ShaderStage};

const LOG_SOURCE: &str = "lumina::opengl::ShaderProgram";

/// Linked OpenGL shader program
///
/// The underlying program object is deleted when this value is dropped.
pub struct OpenGlShaderProgram {
    gl: Rc<glow::Context>,
    program: glow::NativeProgram,
    live: Rc<Cell<u32>>,
}

impl OpenGlShaderProgram {
    /// Compile and link a vertex+fragment pair into a ready-to-use program
    pub(crate) fn build(
        gl: &Rc<glow::Context>,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
        live: &Rc<Cell<u32>>,
    ) -> Result<Self> {
        vertex.ensure_usable_as(ShaderStage::Vertex)?;
        fragment.ensure_usable_as(ShaderStage::Fragment)?;

        unsafe {
            let program = gl.create_program().map_err(Error::BackendError)?;

            let vertex_stage = match compile_stage(gl, ShaderStage::Vertex, vertex.text()) {
                Ok(stage) => stage,
                Err(err) => {
                    gl.delete_program(program);
                    return Err(err);
                }
            };

            let fragment_stage = match compile_stage(gl, ShaderStage::Fragment, fragment.text()) {
                Ok(stage) => stage,
                Err(err) => {
                    // Never attempt a link with a missing stage.
                    gl.delete_shader(vertex_stage);
                    gl.delete_program(program);
                    return Err(err);
                }
            };

            gl.attach_shader(program, vertex_stage);
            gl.attach_shader(program, fragment_stage);
            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.detach_shader(program, vertex_stage);
                gl.detach_shader(program, fragment_stage);
                gl.delete_shader(vertex_stage);
                gl.delete_shader(fragment_stage);
                gl.delete_program(program);
                return Err(Error::LinkFailed { log });
            }

            // Drivers may leave warnings in the info log even when the link
            // succeeds; advisory only, never fails the build.
            let warnings = gl.get_program_info_log(program);
            if !warnings.trim().is_empty() {
                engine_warn!(LOG_SOURCE, "link warnings: {}", warnings.trim());
            }

            // The linked program keeps the compiled code; the stage objects
            // are no longer needed.
            gl.detach_shader(program, vertex_stage);
            gl.detach_shader(program, fragment_stage);
            gl.delete_shader(vertex_stage);
            gl.delete_shader(fragment_stage);

            live.set(live.get() + 1);
            Ok(Self {
                gl: Rc::clone(gl),
                program,
                live: Rc::clone(live),
            })
        }
    }

    /// Raw program handle, for `use_program`
    pub(crate) fn raw(&self) -> glow::NativeProgram {
        self.program
    }

    /// True when this program was created on `gl`
    pub(crate) fn shares_context(&self, gl: &Rc<glow::Context>) -> bool {
        Rc::ptr_eq(&self.gl, gl)
    }
}

/// Compile one shader stage
///
/// On failure the stage object is deleted before the error (stage kind plus
/// the full compiler log) is returned.
unsafe fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    text: &str,
) -> Result<glow::NativeShader> {
    let kind = match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    };

    let shader = gl.create_shader(kind).map_err(Error::BackendError)?;
    gl.shader_source(shader, text);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(Error::CompileFailed { stage, log });
    }

    Ok(shader)
}

impl RendererShaderProgram for OpenGlShaderProgram {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for OpenGlShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
        }
        self.live.set(self.live.get() - 1);
    }
}
