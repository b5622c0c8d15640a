//! RendererShaderProgram trait and shader source types

use std::any::Any;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// One shader stage source: stage kind plus UTF-8 GLSL text
///
/// Immutable once constructed. Consumed by
/// `Renderer::create_shader_program`; the builder discards it after
/// compilation.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: String,
}

impl ShaderSource {
    /// Wrap an in-memory source string
    pub fn new(stage: ShaderStage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    /// Vertex stage source from a literal
    pub fn vertex(text: impl Into<String>) -> Self {
        Self::new(ShaderStage::Vertex, text)
    }

    /// Fragment stage source from a literal
    pub fn fragment(text: impl Into<String>) -> Self {
        Self::new(ShaderStage::Fragment, text)
    }

    /// Load a source file
    ///
    /// The file is read whole; newlines are preserved so compiler diagnostics
    /// keep their line numbers.
    ///
    /// # Errors
    ///
    /// `InvalidResource` when the file cannot be read.
    pub fn from_file(stage: ShaderStage, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::InvalidResource(format!(
                "failed to read {} shader source '{}': {}",
                stage,
                path.display(),
                e
            ))
        })?;
        Ok(Self::new(stage, text))
    }

    /// Stage kind this source targets
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Backend precondition check: declared for `expected` and non-empty
    pub fn ensure_usable_as(&self, expected: ShaderStage) -> Result<()> {
        if self.stage != expected {
            return Err(Error::InvalidResource(format!(
                "expected a {} shader source, got a {} one",
                expected, self.stage
            )));
        }
        if self.text.trim().is_empty() {
            return Err(Error::InvalidResource(format!(
                "{} shader source is empty",
                self.stage
            )));
        }
        Ok(())
    }
}

/// Linked shader program resource trait
///
/// Implemented by backend-specific program types (e.g., OpenGlShaderProgram).
/// A value of this type is always "valid and linked"; failed builds never
/// produce one. The GPU program object is released when the value is dropped.
pub trait RendererShaderProgram {
    /// Backend downcast hook, used by `Renderer::activate`
    fn as_any(&self) -> &dyn Any;
}
