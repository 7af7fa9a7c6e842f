//! Application state for one running instance.
//!
//! A [`Session`] owns both stores for the life of the process. The front end calls
//! exactly one operation per user action. Afterwards it rebuilds the whole view
//! from [`Session::view`].

use crate::{DrawingEntry, DrawingStore, Note, NoteStore, PixelBuffer, Result};
use serde::Serialize;
use std::path::Path;

/// Everything the page needs to render, read fresh from both stores.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub notes: Vec<Note>,
    pub drawings: Vec<DrawingEntry>,
}

/// Both stores, loaded once at start and mutated one action at a time.
#[derive(Debug)]
pub struct Session {
    notes: NoteStore,
    drawings: DrawingStore,
}

impl Session {
    /// Loads the note file and opens (creating if needed) the drawings directory.
    ///
    /// # Errors
    ///
    /// Fails if the note file cannot be parsed or the directory cannot be created.
    pub fn open<N: AsRef<Path>, D: AsRef<Path>>(notes_file: N, images_dir: D) -> Result<Self> {
        Ok(Self {
            notes: NoteStore::open(notes_file)?,
            drawings: DrawingStore::open(images_dir)?,
        })
    }

    /// Saves a text note. Blank text is ignored and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the note file cannot be written.
    pub fn add_note(&mut self, text: &str) -> Result<bool> {
        self.notes.append(text)
    }

    /// Deletes the note at `index`, counting from zero.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SketchnotesError::NoteIndexOutOfRange`] if there is no such
    /// note, or a write error.
    pub fn delete_note(&mut self, index: usize) -> Result<Note> {
        self.notes.delete_at(index)
    }

    /// Saves the canvas, if anything was drawn on it.
    ///
    /// `None` means the canvas had no strokes. It is ignored and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing the image fails.
    pub fn save_drawing(&mut self, canvas: Option<PixelBuffer>) -> Result<Option<String>> {
        match canvas {
            Some(buffer) => self.drawings.save(buffer).map(Some),
            None => {
                log::debug!("Ignoring save of an empty canvas");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`crate::SketchnotesError::DrawingNotFound`] if the file is gone.
    pub fn delete_drawing(&mut self, filename: &str) -> Result<()> {
        self.drawings.delete(filename)
    }

    /// Current notes plus a fresh listing of the drawings directory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SketchnotesError::Io`] if the directory cannot be read.
    pub fn view(&self) -> Result<SessionView> {
        let drawings = self
            .drawings
            .list()?
            .into_iter()
            .map(DrawingEntry::from_file_name)
            .collect();
        Ok(SessionView {
            notes: self.notes.notes().to_vec(),
            drawings,
        })
    }

    #[must_use]
    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    /// Mutable access, e.g. to [`NoteStore::reload`] after an external edit.
    pub fn notes_mut(&mut self) -> &mut NoteStore {
        &mut self.notes
    }

    #[must_use]
    pub fn drawings(&self) -> &DrawingStore {
        &self.drawings
    }
}
