//! Lumina demo - indexed colored quad
//!
//! The classic bring-up sequence: create a window and GL context, build a
//! two-stage shader program, upload an interleaved vertex buffer plus index
//! buffer, then clear/activate/draw/swap until the window closes.

use lumina_engine::engine_info;
use lumina_engine::{
    Config, Error, MeshDesc, Renderer, Result, ShaderSource, VertexAttribute, VertexLayout,
};
use lumina_engine_renderer_opengl::OpenGlRenderer;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

const LOG_SOURCE: &str = "lumina::Demo";

const VERTEX_SHADER: &str = r"#version 410 core
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 color;

out vec3 v_color;

void main()
{
    v_color = color;
    gl_Position = vec4(position, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"#version 410 core
in vec3 v_color;

out vec4 fragment_color;

void main()
{
    fragment_color = vec4(v_color, 1.0);
}
";

// Interleaved position (xyz) + color (rgb); one quad as two indexed triangles
const QUAD_VERTICES: [f32; 24] = [
    -0.5, -0.5, 0.0, 1.0, 0.0, 0.0, // bottom left, red
    0.5, -0.5, 0.0, 0.0, 1.0, 0.0, // bottom right, green
    -0.5, 0.5, 0.0, 0.0, 0.0, 1.0, // top left, blue
    0.5, 0.5, 0.0, 1.0, 1.0, 0.0, // top right, yellow
];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

fn main() -> Result<()> {
    let sdl = sdl2::init().map_err(Error::InitializationFailed)?;
    let video = sdl.video().map_err(Error::InitializationFailed)?;
    let mut event_pump = sdl.event_pump().map_err(Error::InitializationFailed)?;

    let config = Config {
        window_title: "Lumina Demo".to_string(),
        ..Config::default()
    };
    let mut renderer = OpenGlRenderer::new(&video, &config)?;

    let program = renderer.create_shader_program(
        ShaderSource::vertex(VERTEX_SHADER),
        ShaderSource::fragment(FRAGMENT_SHADER),
    )?;

    let layout = VertexLayout {
        stride: 6,
        attributes: vec![
            VertexAttribute {
                location: 0,
                components: 3,
                offset: 0,
            },
            VertexAttribute {
                location: 1,
                components: 3,
                offset: 3,
            },
        ],
    };
    let quad = renderer.create_mesh(&MeshDesc {
        vertices: &QUAD_VERTICES,
        indices: &QUAD_INDICES,
        layout,
    })?;

    engine_info!(LOG_SOURCE, "entering main loop (Escape or close to quit)");

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::Resized(w, h),
                    ..
                } => renderer.resize(w as u32, h as u32),
                _ => {}
            }
        }

        renderer.begin_frame([0.07, 0.07, 0.1, 1.0])?;
        renderer.activate(program.as_ref())?;
        renderer.draw(quad.as_ref())?;
        renderer.deactivate();
        renderer.end_frame()?;
    }

    engine_info!(LOG_SOURCE, "goodbye");
    Ok(())
}
