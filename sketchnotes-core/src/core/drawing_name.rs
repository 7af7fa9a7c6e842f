//! Filenames of saved drawings.
//!
//! A drawing is named after the local time it was saved, as
//! `drawing_YYYYMMDD_HHMMSS.png`. The fields are zero-padded and fixed-width, so
//! sorting names as strings sorts drawings by creation time. When a name is
//! already taken within the same second, a two-digit suffix is added
//! (`drawing_YYYYMMDD_HHMMSS_01.png`), which still sorts after the bare name.

use crate::{Result, SketchnotesError};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

pub const DRAWING_PREFIX: &str = "drawing_";
pub const DRAWING_EXTENSION: &str = "png";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Highest collision suffix tried before giving up.
pub const MAX_SUFFIX: u8 = 99;

const TIMESTAMP_LEN: usize = 15;

/// Builds the filename for a drawing saved at `at`.
///
/// `suffix` is `0` for the first drawing in a given second.
#[must_use]
pub fn drawing_file_name<Tz: TimeZone>(at: &DateTime<Tz>, suffix: u8) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = at.format(TIMESTAMP_FORMAT);
    if suffix == 0 {
        format!("{DRAWING_PREFIX}{stamp}.{DRAWING_EXTENSION}")
    } else {
        format!("{DRAWING_PREFIX}{stamp}_{suffix:02}.{DRAWING_EXTENSION}")
    }
}

/// Returns `true` if `name` has the image extension the store lists.
#[must_use]
pub fn has_drawing_extension(name: &str) -> bool {
    name.strip_suffix(DRAWING_EXTENSION)
        .is_some_and(|stem| stem.ends_with('.'))
}

/// Checks that `name` is a bare `*.png` filename with no path components.
///
/// Any such file counts, even one not named by this store.
///
/// # Errors
///
/// Returns [`SketchnotesError::InvalidDrawingName`] otherwise.
pub fn validate_file_name(name: &str) -> Result<()> {
    let is_plain = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
        && has_drawing_extension(name);
    if is_plain {
        Ok(())
    } else {
        Err(SketchnotesError::InvalidDrawingName(name.to_string()))
    }
}

/// Recovers the save time encoded in a drawing filename.
///
/// Returns `None` for `*.png` files that were not named by the store.
#[must_use]
pub fn parse_timestamp(name: &str) -> Option<DateTime<Local>> {
    let rest = name.strip_prefix(DRAWING_PREFIX)?;
    let stem = rest.strip_suffix(DRAWING_EXTENSION)?.strip_suffix('.')?;
    let stamp = stem.get(..TIMESTAMP_LEN)?;
    match &stem[TIMESTAMP_LEN..] {
        "" => {}
        tail => {
            let digits = tail.strip_prefix('_')?;
            if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
        }
    }
    let naive = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest()
}
