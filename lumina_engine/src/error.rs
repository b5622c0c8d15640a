//! Error types for the Lumina engine
//!
//! This module defines the error types used throughout the engine, covering
//! shader builds, resource creation and backend initialization.

use std::fmt;

use crate::renderer::ShaderStage;

/// Result type for Lumina engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Lumina engine errors
///
/// Compile and link failures are local to one build attempt: they carry the
/// full compiler/linker log and never terminate the process. Terminating on
/// failure is caller policy.
#[derive(Debug, Clone)]
pub enum Error {
    /// A shader stage failed to compile (full compiler log attached)
    CompileFailed { stage: ShaderStage, log: String },

    /// A shader program failed to link (full linker log attached)
    LinkFailed { log: String },

    /// Invalid resource (shader source, mesh layout, foreign handle, ...)
    InvalidResource(String),

    /// Backend-specific error (GL object allocation, SDL call, ...)
    BackendError(String),

    /// Initialization failed (video subsystem, window, context)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CompileFailed { stage, log } => {
                write!(f, "{} shader compilation failed: {}", stage, log)
            }
            Error::LinkFailed { log } => write!(f, "Shader program link failed: {}", log),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
