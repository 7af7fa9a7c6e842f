//! Core library for Sketchnotes — a local, single-user note and sketch keeper.
//!
//! The primary entry point is [`Session`], which owns the [`NoteStore`] (a CSV file
//! of text notes) and the [`DrawingStore`] (a directory of PNG drawings). Each user
//! action maps to one `Session` method, and every mutation goes straight to disk.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    drawing_name::{drawing_file_name, parse_timestamp, validate_file_name},
    drawing_store::{DrawingEntry, DrawingStore},
    error::{Result, SketchnotesError},
    note::Note,
    note_store::{NoteStore, NOTE_COLUMN},
    pen::{
        is_hex_color, PenSettings, CANVAS_BACKGROUND, DEFAULT_CANVAS_HEIGHT,
        DEFAULT_CANVAS_WIDTH, DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH, PEN_WIDTH_RANGE,
    },
    pixel_buffer::PixelBuffer,
    session::{Session, SessionView},
};
