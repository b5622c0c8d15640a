//! GL error draining
//!
//! The GL state machine accumulates error codes until someone asks for them.
//! `drain_gl_errors` is the scoped replacement for the classic
//! clear-errors/call/check macro: call it after an operation (or a group of
//! operations) and every pending code is pulled and reported through the
//! engine log with the scope label that produced it.

use glow::HasContext;
use lumina_engine::engine_warn;

const LOG_SOURCE: &str = "lumina::opengl::Debug";

/// Pending codes are capped per drain in case a broken driver never stops
/// reporting.
const MAX_DRAINED_ERRORS: u32 = 32;

/// Drain every pending GL error code and report each one
///
/// Returns the number of codes drained, which is also handy in tests.
pub(crate) fn drain_gl_errors(gl: &glow::Context, scope: &str) -> u32 {
    let mut drained = 0;
    while drained < MAX_DRAINED_ERRORS {
        let code = unsafe { gl.get_error() };
        if code == glow::NO_ERROR {
            break;
        }
        drained += 1;
        engine_warn!(LOG_SOURCE, "{}: {} (0x{:04X})", scope, error_name(code), code);
    }
    drained
}

pub(crate) fn error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}
