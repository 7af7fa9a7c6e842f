//! Pen and canvas settings offered by the drawing surface.
//!
//! These are transient widget values. They are baked into the pixels of a drawing
//! and never stored next to it.

use crate::{Result, SketchnotesError};
use serde::Serialize;
use std::ops::RangeInclusive;

pub const DEFAULT_PEN_COLOR: &str = "#000000";
pub const DEFAULT_PEN_WIDTH: u32 = 3;
pub const PEN_WIDTH_RANGE: RangeInclusive<u32> = 1..=20;

pub const DEFAULT_CANVAS_WIDTH: u32 = 600;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 300;
pub const CANVAS_BACKGROUND: &str = "#ffffff";

/// Stroke colour and width for freehand drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PenSettings {
    color: String,
    width: u32,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            color: DEFAULT_PEN_COLOR.to_string(),
            width: DEFAULT_PEN_WIDTH,
        }
    }
}

impl PenSettings {
    /// # Errors
    ///
    /// Returns [`SketchnotesError::InvalidPenColor`] unless `color` is `#rrggbb`,
    /// or [`SketchnotesError::PenWidthOutOfRange`] if `width` is outside
    /// [`PEN_WIDTH_RANGE`].
    pub fn new(color: &str, width: u32) -> Result<Self> {
        if !is_hex_color(color) {
            return Err(SketchnotesError::InvalidPenColor(color.to_string()));
        }
        if !PEN_WIDTH_RANGE.contains(&width) {
            return Err(SketchnotesError::PenWidthOutOfRange(width));
        }
        Ok(Self {
            color: color.to_ascii_lowercase(),
            width,
        })
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }
}

/// Returns `true` for `#rrggbb` strings in either case.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}
