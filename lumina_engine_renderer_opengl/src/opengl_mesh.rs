//! OpenGlMesh - VAO/VBO/IBO bundle for one indexed mesh

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use glow::HasContext;
use lumina_engine::{Error, MeshDesc, RendererMesh, Result};

const F32_BYTES: i32 = std::mem::size_of::<f32>() as i32;

/// Uploaded mesh: vertex buffer, index buffer and the vertex-array object
/// capturing the attribute layout. All three are deleted on drop.
pub struct OpenGlMesh {
    gl: Rc<glow::Context>,
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    ibo: glow::NativeBuffer,
    index_count: u32,
    live: Rc<Cell<u32>>,
}

impl OpenGlMesh {
    pub(crate) fn build(
        gl: &Rc<glow::Context>,
        desc: &MeshDesc<'_>,
        live: &Rc<Cell<u32>>,
    ) -> Result<Self> {
        // Stride/offset literals are caller input; checked before the upload.
        desc.validate()?;

        unsafe {
            let vao = gl.create_vertex_array().map_err(Error::BackendError)?;
            let vbo = gl.create_buffer().map_err(Error::BackendError)?;
            let ibo = gl.create_buffer().map_err(Error::BackendError)?;

            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(desc.vertices),
                glow::STATIC_DRAW,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(desc.indices),
                glow::STATIC_DRAW,
            );

            let stride_bytes = desc.layout.stride as i32 * F32_BYTES;
            for attr in &desc.layout.attributes {
                gl.enable_vertex_attrib_array(attr.location);
                gl.vertex_attrib_pointer_f32(
                    attr.location,
                    attr.components as i32,
                    glow::FLOAT,
                    false,
                    stride_bytes,
                    attr.offset as i32 * F32_BYTES,
                );
            }

            // The element-buffer binding is recorded in the VAO; unbind the
            // VAO first so the unbinds below do not disturb it.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            live.set(live.get() + 1);
            Ok(Self {
                gl: Rc::clone(gl),
                vao,
                vbo,
                ibo,
                index_count: desc.indices.len() as u32,
                live: Rc::clone(live),
            })
        }
    }

    /// Raw vertex-array handle, for binding before the draw
    pub(crate) fn vao(&self) -> glow::NativeVertexArray {
        self.vao
    }

    /// True when this mesh was created on `gl`
    pub(crate) fn shares_context(&self, gl: &Rc<glow::Context>) -> bool {
        Rc::ptr_eq(&self.gl, gl)
    }
}

impl RendererMesh for OpenGlMesh {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn index_count(&self) -> u32 {
        self.index_count
    }
}

impl Drop for OpenGlMesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.ibo);
        }
        self.live.set(self.live.get() - 1);
    }
}
