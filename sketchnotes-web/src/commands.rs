//! One function per user action.
//!
//! Each command takes the session lock, performs exactly one store operation and
//! converts any core error into a [`CommandError`] carrying the user-facing message.

use crate::state::AppState;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sketchnotes_core::{PixelBuffer, Session, SessionView, SketchnotesError};
use std::sync::MutexGuard;

/// How a failed command should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Internal,
}

/// A failed command: what kind of failure it was and what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CommandError {
    fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            message: message.into(),
        }
    }
}

impl From<SketchnotesError> for CommandError {
    fn from(e: SketchnotesError) -> Self {
        let kind = if e.is_not_found() {
            ErrorKind::NotFound
        } else if e.is_invalid_input() {
            ErrorKind::InvalidInput
        } else {
            ErrorKind::Internal
        };
        if kind == ErrorKind::Internal {
            log::error!("{e}");
        } else {
            log::warn!("{e}");
        }
        Self {
            kind,
            message: e.user_message(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Finished canvas as sent by the browser: RGBA bytes, base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasPayload {
    pub width: u32,
    pub height: u32,
    pub pixels: String,
}

/// Body of a save-drawing request. `canvas` is absent when nothing was drawn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveDrawingRequest {
    #[serde(default)]
    pub canvas: Option<CanvasPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDrawingResponse {
    pub filename: Option<String>,
}

impl CanvasPayload {
    /// Decodes the pixel data into a validated buffer.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for bad base64 or a size mismatch.
    pub fn into_buffer(self) -> Result<PixelBuffer, CommandError> {
        let rgba = base64::engine::general_purpose::STANDARD
            .decode(self.pixels.as_bytes())
            .map_err(|e| CommandError::invalid_input(format!("Canvas data is not valid: {e}")))?;
        Ok(PixelBuffer::new(self.width, self.height, rgba)?)
    }

}

#[cfg(test)]
impl CanvasPayload {
    /// Encodes a buffer the way the browser does.
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            pixels: base64::engine::general_purpose::STANDARD.encode(buffer.as_bytes()),
        }
    }
}

/// Parses a save-drawing body. A blank body is a request with no canvas.
///
/// # Errors
///
/// Returns an invalid-input error if the body is not a valid request.
pub fn parse_save_request(body: &[u8]) -> Result<SaveDrawingRequest, CommandError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SaveDrawingRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| CommandError::invalid_input(format!("Drawing request is not valid: {e}")))
}

fn lock_session(state: &AppState) -> Result<MutexGuard<'_, Session>, CommandError> {
    state
        .session
        .lock()
        .map_err(|_| CommandError::internal("Session state is unavailable"))
}

/// Fresh snapshot of both stores for rendering.
pub fn current_view(state: &AppState) -> Result<SessionView, CommandError> {
    Ok(lock_session(state)?.view()?)
}

/// Saves a text note; returns `false` if the text was blank and nothing was saved.
pub fn add_note(state: &AppState, text: &str) -> Result<bool, CommandError> {
    Ok(lock_session(state)?.add_note(text)?)
}

/// Deletes the note at zero-based `index`.
pub fn delete_note(state: &AppState, index: usize) -> Result<(), CommandError> {
    lock_session(state)?.delete_note(index)?;
    Ok(())
}

/// Saves the canvas, returning the new filename, or `None` if nothing was drawn.
pub fn save_drawing(
    state: &AppState,
    request: SaveDrawingRequest,
) -> Result<SaveDrawingResponse, CommandError> {
    let canvas = request.canvas.map(CanvasPayload::into_buffer).transpose()?;
    let filename = lock_session(state)?.save_drawing(canvas)?;
    Ok(SaveDrawingResponse { filename })
}

/// PNG bytes of a saved drawing.
pub fn read_drawing(state: &AppState, filename: &str) -> Result<Vec<u8>, CommandError> {
    Ok(lock_session(state)?.drawings().read(filename)?)
}

pub fn delete_drawing(state: &AppState, filename: &str) -> Result<(), CommandError> {
    Ok(lock_session(state)?.delete_drawing(filename)?)
}
