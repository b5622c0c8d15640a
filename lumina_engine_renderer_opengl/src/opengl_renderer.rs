//! OpenGlRenderer - OpenGL implementation of the Renderer trait
//!
//! Owns the SDL window, the GL context and the glow function table, and
//! implements the lumina_engine factory and frame-driver methods against
//! them. Must be created and used on the thread that owns the context.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use glow::HasContext;
use sdl2::video::{GLContext, GLProfile, SwapInterval, Window};
use sdl2::VideoSubsystem;

use lumina_engine::{engine_info, engine_warn};
use lumina_engine::{
    Config, DeviceInfo, Error, MeshDesc, Renderer, RendererMesh, RendererShaderProgram,
    RendererStats, Result, ShaderSource,
};

use crate::debug::drain_gl_errors;
use crate::opengl_mesh::OpenGlMesh;
use crate::opengl_shader_program::OpenGlShaderProgram;

const LOG_SOURCE: &str = "lumina::opengl::Renderer";

/// OpenGL renderer implementation
pub struct OpenGlRenderer {
    // Window and context, kept alive for the lifetime of the renderer
    window: Window,
    _gl_context: GLContext,
    gl: Rc<glow::Context>,

    device_info: DeviceInfo,
    gl_checks: bool,

    // Per-frame counters
    draw_calls: u32,
    triangles: u32,

    // Live-resource counters, shared with the resources' Drop impls
    live_programs: Rc<Cell<u32>>,
    live_meshes: Rc<Cell<u32>>,

    program_active: bool,
}

impl OpenGlRenderer {
    /// Create a new OpenGL renderer
    ///
    /// Sets the context attributes, creates the window and GL context, loads
    /// the GL function pointers and logs what the driver reports.
    ///
    /// # Arguments
    ///
    /// * `video` - Initialized SDL video subsystem
    /// * `config` - Renderer configuration (validated before use)
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when any bring-up step is refused; nothing is
    /// partially created on the error paths.
    pub fn new(video: &VideoSubsystem, config: &Config) -> Result<Self> {
        config.validate()?;

        // Context attributes must be set before the window exists. Core
        // profile keeps deprecated functions out of reach.
        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(config.gl_version.0, config.gl_version.1);
        gl_attr.set_double_buffer(true);
        gl_attr.set_depth_size(config.depth_bits);

        let mut builder = video.window(
            &config.window_title,
            config.window_width,
            config.window_height,
        );
        builder.opengl().position_centered();
        if !config.window_visible {
            builder.hidden();
        }
        let window = builder
            .build()
            .map_err(|e| Error::InitializationFailed(format!("window creation failed: {}", e)))?;

        // Creating the context also makes it current on this thread.
        let gl_context = window.gl_create_context().map_err(|e| {
            Error::InitializationFailed(format!("OpenGL context creation failed: {}", e))
        })?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| video.gl_get_proc_address(s) as *const _)
        };
        let gl = Rc::new(gl);

        if config.vsync {
            if let Err(e) = video.gl_set_swap_interval(SwapInterval::VSync) {
                engine_warn!(LOG_SOURCE, "vsync unavailable: {}", e);
            }
        }

        let device_info = unsafe {
            DeviceInfo {
                vendor: gl.get_parameter_string(glow::VENDOR),
                renderer: gl.get_parameter_string(glow::RENDERER),
                version: gl.get_parameter_string(glow::VERSION),
                shading_language_version: gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
            }
        };
        engine_info!(LOG_SOURCE, "Vendor: {}", device_info.vendor);
        engine_info!(LOG_SOURCE, "Renderer: {}", device_info.renderer);
        engine_info!(LOG_SOURCE, "Version: {}", device_info.version);
        engine_info!(
            LOG_SOURCE,
            "Shading language: {}",
            device_info.shading_language_version
        );

        unsafe {
            gl.viewport(0, 0, config.window_width as i32, config.window_height as i32);
        }

        Ok(Self {
            window,
            _gl_context: gl_context,
            gl,
            device_info,
            gl_checks: config.gl_checks,
            draw_calls: 0,
            triangles: 0,
            live_programs: Rc::new(Cell::new(0)),
            live_meshes: Rc::new(Cell::new(0)),
            program_active: false,
        })
    }

    fn check(&self, scope: &str) {
        if self.gl_checks {
            drain_gl_errors(&self.gl, scope);
        }
    }

    /// Read back an RGBA8 block of the current framebuffer
    ///
    /// Origin is the bottom-left corner. Call between `draw` and `end_frame`
    /// to inspect what was just rendered (screenshots, render tests).
    pub fn read_pixels_rgba(&self, x: i32, y: i32, width: i32, height: i32) -> Vec<u8> {
        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
        unsafe {
            self.gl.read_pixels(
                x,
                y,
                width,
                height,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(&mut pixels),
            );
        }
        self.check("read_pixels_rgba");
        pixels
    }
}

impl Renderer for OpenGlRenderer {
    fn device_info(&self) -> DeviceInfo {
        self.device_info.clone()
    }

    fn create_shader_program(
        &mut self,
        vertex: ShaderSource,
        fragment: ShaderSource,
    ) -> Result<Arc<dyn RendererShaderProgram>> {
        let program =
            OpenGlShaderProgram::build(&self.gl, &vertex, &fragment, &self.live_programs)?;
        self.check("create_shader_program");
        Ok(Arc::new(program))
    }

    fn create_mesh(&mut self, desc: &MeshDesc<'_>) -> Result<Arc<dyn RendererMesh>> {
        let mesh = OpenGlMesh::build(&self.gl, desc, &self.live_meshes)?;
        self.check("create_mesh");
        Ok(Arc::new(mesh))
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<()> {
        self.draw_calls = 0;
        self.triangles = 0;
        unsafe {
            self.gl
                .clear_color(clear_color[0], clear_color[1], clear_color[2], clear_color[3]);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        self.check("begin_frame");
        Ok(())
    }

    fn activate(&mut self, program: &dyn RendererShaderProgram) -> Result<()> {
        let program = program
            .as_any()
            .downcast_ref::<OpenGlShaderProgram>()
            .ok_or_else(|| {
                Error::InvalidResource(
                    "shader program was not created by this renderer".to_string(),
                )
            })?;
        // Program ids are per-context; a program from a sibling renderer
        // downcasts fine but must not be bound here.
        if !program.shares_context(&self.gl) {
            return Err(Error::InvalidResource(
                "shader program was created by a different renderer".to_string(),
            ));
        }
        unsafe {
            self.gl.use_program(Some(program.raw()));
        }
        self.program_active = true;
        Ok(())
    }

    fn deactivate(&mut self) {
        unsafe {
            self.gl.use_program(None);
        }
        self.program_active = false;
    }

    fn draw(&mut self, mesh: &dyn RendererMesh) -> Result<()> {
        if !self.program_active {
            return Err(Error::InvalidResource("no active shader program".to_string()));
        }
        let mesh = mesh.as_any().downcast_ref::<OpenGlMesh>().ok_or_else(|| {
            Error::InvalidResource("mesh was not created by this renderer".to_string())
        })?;
        if !mesh.shares_context(&self.gl) {
            return Err(Error::InvalidResource(
                "mesh was created by a different renderer".to_string(),
            ));
        }

        unsafe {
            self.gl.bind_vertex_array(Some(mesh.vao()));
            self.gl.draw_elements(
                glow::TRIANGLES,
                mesh.index_count() as i32,
                glow::UNSIGNED_INT,
                0,
            );
            self.gl.bind_vertex_array(None);
        }

        self.draw_calls += 1;
        self.triangles += mesh.index_count() / 3;
        self.check("draw");
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.window.gl_swap_window();
        self.check("end_frame");
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
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
