//! Shared state handed to every request handler.

use crate::settings::AppSettings;
use sketchnotes_core::{PenSettings, Result, Session, CANVAS_BACKGROUND};
use std::sync::{Arc, Mutex};

/// The open session plus the drawing-surface defaults read from settings.
///
/// Requests take the session lock for the whole of their single store operation,
/// so actions are applied one at a time.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub pen: PenSettings,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub canvas_background: String,
}

impl AppState {
    /// Opens the stores named in `settings`.
    ///
    /// # Errors
    ///
    /// Fails if the note file is malformed or the drawings directory cannot be
    /// created.
    pub fn open(settings: &AppSettings) -> Result<Self> {
        let session = Session::open(settings.notes_path(), settings.images_path())?;
        let (canvas_width, canvas_height) = settings.canvas_size();
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            pen: settings.pen(),
            canvas_width,
            canvas_height,
            canvas_background: CANVAS_BACKGROUND.to_string(),
        })
    }

    /// Largest request body a canvas upload can need, with room for the JSON
    /// wrapper.
    pub fn upload_limit(&self) -> usize {
        let raw = (self.canvas_width as usize) * (self.canvas_height as usize) * 4;
        raw.div_ceil(3) * 4 + 64 * 1024
    }
}
