//! Unit tests for the renderer contract, run against the mock backend
//!
//! These cover the build state machine (compile short-circuit, link failure,
//! no leaked handles) and the frame-driver preconditions without a GPU.

use std::any::Any;

use crate::error::Error;
use crate::renderer::mock_renderer::{
    MockRenderer, COMPILE_ERROR_MARKER, LINK_ERROR_MARKER,
};
use crate::renderer::{
    MeshDesc, Renderer, RendererShaderProgram, ShaderSource, ShaderStage, VertexAttribute,
    VertexLayout,
};

const VERTEX_SRC: &str = "#version 410 core\nvoid main(){gl_Position=vec4(0,0,0,1);}\n";
const FRAGMENT_SRC: &str = "#version 410 core\nout vec4 c;\nvoid main(){c=vec4(1,0,0,1);}\n";

const TRIANGLE_VERTICES: [f32; 9] = [-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];
const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

fn triangle_desc() -> MeshDesc<'static> {
    MeshDesc {
        vertices: &TRIANGLE_VERTICES,
        indices: &TRIANGLE_INDICES,
        layout: VertexLayout {
            stride: 3,
            attributes: vec![VertexAttribute {
                location: 0,
                components: 3,
                offset: 0,
            }],
        },
    }
}

#[test]
fn test_build_succeeds_for_valid_pair() {
    let mut renderer = MockRenderer::new();
    let program = renderer
        .create_shader_program(
            ShaderSource::vertex(VERTEX_SRC),
            ShaderSource::fragment(FRAGMENT_SRC),
        )
        .unwrap();

    assert_eq!(renderer.stats().live_shader_programs, 1);
    drop(program);
    assert_eq!(renderer.stats().live_shader_programs, 0);
}

#[test]
fn test_vertex_compile_failure_short_circuits() {
    let mut renderer = MockRenderer::new();
    // Both stages are broken; the vertex stage must be reported because the
    // builder never reaches the fragment stage.
    let result = renderer.create_shader_program(
        ShaderSource::vertex(format!("{}{}", VERTEX_SRC, COMPILE_ERROR_MARKER)),
        ShaderSource::fragment(format!("{}{}", FRAGMENT_SRC, COMPILE_ERROR_MARKER)),
    );
    match result {
        Err(Error::CompileFailed { stage, log }) => {
            assert_eq!(stage, ShaderStage::Vertex);
            assert!(!log.is_empty());
        }
        other => panic!("expected CompileFailed, got {:?}", other.map(|_| ())),
    }
    assert_eq!(renderer.stats().live_shader_programs, 0);
}

#[test]
fn test_fragment_compile_failure_reported_per_stage() {
    let mut renderer = MockRenderer::new();
    let result = renderer.create_shader_program(
        ShaderSource::vertex(VERTEX_SRC),
        ShaderSource::fragment(format!("{}{}", FRAGMENT_SRC, COMPILE_ERROR_MARKER)),
    );
    assert!(matches!(
        result,
        Err(Error::CompileFailed {
            stage: ShaderStage::Fragment,
            ..
        })
    ));
}

#[test]
fn test_link_failure_returns_no_handle() {
    let mut renderer = MockRenderer::new();
    let result = renderer.create_shader_program(
        ShaderSource::vertex(format!("{}{}", VERTEX_SRC, LINK_ERROR_MARKER)),
        ShaderSource::fragment(FRAGMENT_SRC),
    );
    assert!(matches!(result, Err(Error::LinkFailed { .. })));
    assert_eq!(renderer.stats().live_shader_programs, 0);
}

#[test]
fn test_stage_mismatch_rejected_before_compile() {
    let mut renderer = MockRenderer::new();
    let result = renderer.create_shader_program(
        ShaderSource::fragment(FRAGMENT_SRC),
        ShaderSource::fragment(FRAGMENT_SRC),
    );
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_foreign_program_rejected_by_activate() {
    struct OtherProgram;
    impl RendererShaderProgram for OtherProgram {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    let mut renderer = MockRenderer::new();
    assert!(matches!(
        renderer.activate(&OtherProgram),
        Err(Error::InvalidResource(_))
    ));
}

#[test]
fn test_program_from_another_renderer_rejected() {
    let mut first = MockRenderer::new();
    let mut second = MockRenderer::new();
    let program = first
        .create_shader_program(
            ShaderSource::vertex(VERTEX_SRC),
            ShaderSource::fragment(FRAGMENT_SRC),
        )
        .unwrap();

    assert!(matches!(
        second.activate(program.as_ref()),
        Err(Error::InvalidResource(_))
    ));
    assert!(first.activate(program.as_ref()).is_ok());
}

#[test]
fn test_mesh_from_another_renderer_rejected() {
    let mut first = MockRenderer::new();
    let mut second = MockRenderer::new();
    let foreign_mesh = first.create_mesh(&triangle_desc()).unwrap();

    let program = second
        .create_shader_program(
            ShaderSource::vertex(VERTEX_SRC),
            ShaderSource::fragment(FRAGMENT_SRC),
        )
        .unwrap();
    second.begin_frame([0.0; 4]).unwrap();
    second.activate(program.as_ref()).unwrap();

    assert!(matches!(
        second.draw(foreign_mesh.as_ref()),
        Err(Error::InvalidResource(_))
    ));
}

#[test]
fn test_draw_without_active_program_rejected() {
    let mut renderer = MockRenderer::new();
    let mesh = renderer.create_mesh(&triangle_desc()).unwrap();
    renderer.begin_frame([0.0; 4]).unwrap();
    assert!(matches!(
        renderer.draw(mesh.as_ref()),
        Err(Error::InvalidResource(_))
    ));
}

#[test]
fn test_frame_accounting() {
    let mut renderer = MockRenderer::new();
    let program = renderer
        .create_shader_program(
            ShaderSource::vertex(VERTEX_SRC),
            ShaderSource::fragment(FRAGMENT_SRC),
        )
        .unwrap();
    let mesh = renderer.create_mesh(&triangle_desc()).unwrap();

    renderer.begin_frame([0.1, 0.1, 0.1, 1.0]).unwrap();
    renderer.activate(program.as_ref()).unwrap();
    renderer.draw(mesh.as_ref()).unwrap();
    renderer.draw(mesh.as_ref()).unwrap();
    renderer.deactivate();
    renderer.end_frame().unwrap();

    let stats = renderer.stats();
    assert_eq!(stats.draw_calls, 2);
    assert_eq!(stats.triangles, 2);
    assert_eq!(stats.live_meshes, 1);

    // Next frame resets the per-frame counters but not the live counters
    renderer.begin_frame([0.0; 4]).unwrap();
    let stats = renderer.stats();
    assert_eq!(stats.draw_calls, 0);
    assert_eq!(stats.live_meshes, 1);
}

#[test]
fn test_dropping_resources_returns_counters_to_zero() {
    let mut renderer = MockRenderer::new();
    let program = renderer
        .create_shader_program(
            ShaderSource::vertex(VERTEX_SRC),
            ShaderSource::fragment(FRAGMENT_SRC),
        )
        .unwrap();
    let mesh = renderer.create_mesh(&triangle_desc()).unwrap();

    assert_eq!(renderer.stats().live_shader_programs, 1);
    assert_eq!(renderer.stats().live_meshes, 1);

    drop(program);
    drop(mesh);

    assert_eq!(renderer.stats().live_shader_programs, 0);
    assert_eq!(renderer.stats().live_meshes, 0);
}

#[test]
fn test_resize_updates_drawable_size() {
    let mut renderer = MockRenderer::new();
    renderer.resize(800, 600);
    assert_eq!((renderer.width, renderer.height), (800, 600));
}
