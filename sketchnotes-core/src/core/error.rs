//! Error types for the Sketchnotes core library.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur within the Sketchnotes core library.
#[derive(Debug, Error)]
pub enum SketchnotesError {
    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The note file could not be read or written as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The note file exists but has no `note` column.
    #[error("Note file {} has no `note` column", .0.display())]
    MissingNoteColumn(PathBuf),

    /// A note position was requested that is past the end of the list.
    #[error("Note index {index} is out of range (have {len} notes)")]
    NoteIndexOutOfRange { index: usize, len: usize },

    /// A drawing file was requested that is not in the drawings directory.
    #[error("Drawing not found: {0}")]
    DrawingNotFound(String),

    /// The name does not look like a file produced by the drawing store.
    #[error("Invalid drawing name: {0}")]
    InvalidDrawingName(String),

    /// The pixel buffer length does not match `width * height * 4`.
    #[error("Invalid pixel buffer: expected {expected} bytes for {width}x{height}, got {actual}")]
    InvalidPixelBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Encoding or decoding the PNG image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// A pen colour was not a `#rrggbb` hex string.
    #[error("Invalid pen color: {0}")]
    InvalidPenColor(String),

    /// A pen width was outside the allowed range.
    #[error("Pen width {0} is out of range")]
    PenWidthOutOfRange(u32),
}

/// Convenience alias that pins the error type to [`SketchnotesError`].
pub type Result<T> = std::result::Result<T, SketchnotesError>;

impl SketchnotesError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File error: {e}"),
            Self::Csv(e) => format!("Could not read or write notes: {e}"),
            Self::MissingNoteColumn(path) => {
                format!("Notes file {} is not in the expected format", path.display())
            }
            Self::NoteIndexOutOfRange { .. } => "Note no longer exists".to_string(),
            Self::DrawingNotFound(name) => format!("Drawing {name} no longer exists"),
            Self::InvalidDrawingName(name) => format!("Not a drawing: {name}"),
            Self::InvalidPixelBuffer { .. } => "Canvas data is incomplete".to_string(),
            Self::Image(e) => format!("Could not save drawing: {e}"),
            Self::InvalidPenColor(color) => format!("Unknown pen color: {color}"),
            Self::PenWidthOutOfRange(width) => format!("Pen width {width} is not allowed"),
        }
    }

    /// Returns `true` when the error was caused by the caller's input rather than
    /// by the filesystem or the note file.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidDrawingName(_)
                | Self::InvalidPixelBuffer { .. }
                | Self::InvalidPenColor(_)
                | Self::PenWidthOutOfRange(_)
        )
    }

    /// Returns `true` when the requested note or drawing does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoteIndexOutOfRange { .. } | Self::DrawingNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let e = SketchnotesError::NoteIndexOutOfRange { index: 4, len: 2 };
        assert!(e.to_string().contains("4"));
        assert_eq!(e.user_message(), "Note no longer exists");
        assert!(e.is_not_found());
        assert!(!e.is_invalid_input());
    }

    #[test]
    fn test_pixel_buffer_error_is_invalid_input() {
        let e = SketchnotesError::InvalidPixelBuffer {
            width: 2,
            height: 2,
            expected: 16,
            actual: 3,
        };
        assert!(e.is_invalid_input());
        assert!(e.to_string().contains("expected 16"));
    }

    #[test]
    fn test_io_error_is_neither_input_nor_not_found() {
        let e = SketchnotesError::from(std::io::Error::other("disk full"));
        assert!(!e.is_invalid_input());
        assert!(!e.is_not_found());
        assert!(e.user_message().starts_with("File error"));
    }
}
