//! RendererMesh trait and mesh descriptor
//!
//! Vertex layouts here are configuration, not constants: stride and offsets
//! arrive from the caller and are validated before any upload. All layout
//! units are f32 lanes, not bytes; backends convert.

use std::any::Any;

use crate::error::{Error, Result};

/// One vertex attribute within an interleaved vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location (`layout(location = N)`)
    pub location: u32,
    /// Number of f32 components (1..=4)
    pub components: u32,
    /// Offset from the start of the vertex, in f32 lanes
    pub offset: u32,
}

/// Interleaved vertex layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Size of one vertex, in f32 lanes
    pub stride: u32,
    /// Attributes read out of each vertex
    pub attributes: Vec<VertexAttribute>,
}

/// Descriptor for creating a mesh: interleaved vertices plus triangle indices
#[derive(Debug, Clone)]
pub struct MeshDesc<'a> {
    /// Interleaved vertex data
    pub vertices: &'a [f32],
    /// Triangle indices into the vertex data
    pub indices: &'a [u32],
    /// Layout of one vertex
    pub layout: VertexLayout,
}

impl MeshDesc<'_> {
    /// Number of vertices described by the data and layout
    pub fn vertex_count(&self) -> u32 {
        if self.layout.stride == 0 {
            return 0;
        }
        (self.vertices.len() / self.layout.stride as usize) as u32
    }

    /// Check layout and data consistency
    ///
    /// # Errors
    ///
    /// `InvalidResource` for a zero or overrun stride, an empty attribute
    /// list, vertex data that is not a whole number of vertices, or indices
    /// that are missing, not triangles, or out of range.
    pub fn validate(&self) -> Result<()> {
        let stride = self.layout.stride;
        if stride == 0 {
            return Err(Error::InvalidResource("vertex stride must be non-zero".to_string()));
        }
        if self.layout.attributes.is_empty() {
            return Err(Error::InvalidResource("vertex layout has no attributes".to_string()));
        }
        for attr in &self.layout.attributes {
            if attr.components == 0 || attr.components > 4 {
                return Err(Error::InvalidResource(format!(
                    "attribute {} has {} components, expected 1..=4",
                    attr.location, attr.components
                )));
            }
            if attr.offset + attr.components > stride {
                return Err(Error::InvalidResource(format!(
                    "attribute {} (offset {} + {} components) overruns stride {}",
                    attr.location, attr.offset, attr.components, stride
                )));
            }
        }
        if self.vertices.is_empty() {
            return Err(Error::InvalidResource("mesh has no vertex data".to_string()));
        }
        if self.vertices.len() % stride as usize != 0 {
            return Err(Error::InvalidResource(format!(
                "vertex data length {} is not a multiple of stride {}",
                self.vertices.len(),
                stride
            )));
        }
        if self.indices.is_empty() {
            return Err(Error::InvalidResource("mesh has no indices".to_string()));
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::InvalidResource(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.vertex_count();
        if let Some(&max) = self.indices.iter().max() {
            if max >= vertex_count {
                return Err(Error::InvalidResource(format!(
                    "index {} out of range for {} vertices",
                    max, vertex_count
                )));
            }
        }
        Ok(())
    }
}

/// Mesh resource trait
///
/// Implemented by backend-specific mesh types (e.g., OpenGlMesh). GPU buffers
/// are released when the value is dropped.
pub trait RendererMesh {
    /// Backend downcast hook, used by `Renderer::draw`
    fn as_any(&self) -> &dyn Any;

    /// Number of indices drawn per draw call
    fn index_count(&self) -> u32;
}
