//! Saved drawings as PNG files in a single directory.
//!
//! The directory listing is the only index: whatever `*.png` files are present are
//! the saved drawings, newest first by filename. Nothing is cached between calls.

use crate::core::drawing_name::{
    drawing_file_name, parse_timestamp, validate_file_name, MAX_SUFFIX, TIMESTAMP_FORMAT,
};
use crate::{PixelBuffer, Result, SketchnotesError};
use chrono::{DateTime, Local};
use image::{ImageFormat, RgbaImage};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Cursor, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// One saved drawing as shown in the drawing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingEntry {
    pub filename: String,
    /// Save time recovered from the filename, if it was named by the store.
    pub created_at: Option<DateTime<Local>>,
}

impl DrawingEntry {
    #[must_use]
    pub fn from_file_name(filename: String) -> Self {
        let created_at = parse_timestamp(&filename);
        Self {
            filename,
            created_at,
        }
    }
}

/// Handle on the drawings directory.
#[derive(Debug, Clone)]
pub struct DrawingStore {
    dir: PathBuf,
}

impl DrawingStore {
    /// Opens the drawings directory, creating it if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SketchnotesError::Io`] if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        log::info!("Drawings directory is {}", dir.display());
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Filenames of all saved drawings, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`SketchnotesError::Io`] if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if validate_file_name(&name).is_ok() && entry.path().is_file() {
                names.push(name);
            }
        }
        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Encodes `buffer` as PNG under a name derived from the current local time.
    ///
    /// # Errors
    ///
    /// See [`DrawingStore::save_at`].
    pub fn save(&self, buffer: PixelBuffer) -> Result<String> {
        self.save_at(buffer, Local::now())
    }

    /// Encodes `buffer` as PNG under a name derived from `at`.
    ///
    /// If that name is already taken, a `_01` to `_99` suffix is tried in turn.
    /// Existing files are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`SketchnotesError::Image`] if encoding fails, or
    /// [`SketchnotesError::Io`] if the file cannot be written or every suffix
    /// for that second is already in use.
    pub fn save_at(&self, buffer: PixelBuffer, at: DateTime<Local>) -> Result<String> {
        let (width, height) = (buffer.width(), buffer.height());
        let actual = buffer.as_bytes().len();
        let image = RgbaImage::from_raw(width, height, buffer.into_bytes()).ok_or(
            SketchnotesError::InvalidPixelBuffer {
                width,
                height,
                expected: actual,
                actual,
            },
        )?;

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        for suffix in 0..=MAX_SUFFIX {
            let name = drawing_file_name(&at, suffix);
            let path = self.dir.join(&name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    remove_on_error(&path, || write_and_sync(file, &png))?;
                    log::info!("Saved drawing {name} ({width}x{height})");
                    return Ok(name);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    log::debug!("{name} already exists, trying next suffix");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(io::Error::new(
            ErrorKind::AlreadyExists,
            format!(
                "too many drawings saved at {}",
                at.format(TIMESTAMP_FORMAT)
            ),
        )
        .into())
    }

    /// Removes a saved drawing.
    ///
    /// # Errors
    ///
    /// Returns [`SketchnotesError::InvalidDrawingName`] for names that are not
    /// plain `*.png` filenames, and [`SketchnotesError::DrawingNotFound`] if the
    /// file is not there.
    pub fn delete(&self, filename: &str) -> Result<()> {
        let path = self.path_of(filename)?;
        fs::remove_file(&path).map_err(|e| not_found_as_drawing(e, filename))?;
        log::info!("Deleted drawing {filename}");
        Ok(())
    }

    /// Reads the PNG bytes of a saved drawing.
    ///
    /// # Errors
    ///
    /// Same as [`DrawingStore::delete`].
    pub fn read(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.path_of(filename)?;
        fs::read(&path).map_err(|e| not_found_as_drawing(e, filename))
    }

    /// Full path of a drawing inside the directory.
    ///
    /// # Errors
    ///
    /// Returns [`SketchnotesError::InvalidDrawingName`] for anything other than a
    /// bare `*.png` filename.
    pub fn path_of(&self, filename: &str) -> Result<PathBuf> {
        validate_file_name(filename)?;
        Ok(self.dir.join(filename))
    }
}

fn write_and_sync(mut file: File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.sync_all()
}

/// Runs `write`; if it fails, removes the partly written file at `path`.
fn remove_on_error<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce() -> io::Result<()>,
{
    write().inspect_err(|_| {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Could not remove partial drawing {}: {e}", path.display());
        }
    })
}

fn not_found_as_drawing(e: io::Error, filename: &str) -> SketchnotesError {
    if e.kind() == ErrorKind::NotFound {
        SketchnotesError::DrawingNotFound(filename.to_string())
    } else {
        SketchnotesError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use tempfile::TempDir;

    fn white(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::filled(width, height, [255, 255, 255, 255]).unwrap()
    }

    fn at(hour: u32, min: u32, sec: u32) -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("images");
        let store = DrawingStore::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_white_canvas_decodes_back() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();

        let name = store.save(white(300, 300)).unwrap();
        assert!(name.starts_with("drawing_"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "drawing_YYYYMMDD_HHMMSS.png".len());

        let decoded = image::open(store.path_of(&name).unwrap())
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (300, 300));
        assert!(decoded.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_strokes_survive_encoding() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();

        let mut bytes = white(4, 2).into_bytes();
        // pixel (1, 1) drawn in opaque red
        let offset = (4 + 1) * 4;
        bytes[offset..offset + 4].copy_from_slice(&[255, 0, 0, 255]);
        let name = store.save(PixelBuffer::new(4, 2, bytes).unwrap()).unwrap();

        let decoded = image::open(store.path_of(&name).unwrap()).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_list_is_newest_first() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();

        let older = store.save_at(white(2, 2), at(8, 0, 0)).unwrap();
        let newer = store.save_at(white(2, 2), at(9, 30, 15)).unwrap();
        let middle = store.save_at(white(2, 2), at(9, 0, 0)).unwrap();

        assert_eq!(store.list().unwrap(), vec![newer, middle, older]);
    }

    #[test]
    fn test_save_appears_first_in_list() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();
        store.save_at(white(2, 2), at(1, 0, 0)).unwrap();

        let name = store.save(white(2, 2)).unwrap();
        assert_eq!(store.list().unwrap().first(), Some(&name));
    }

    #[test]
    fn test_same_second_saves_do_not_overwrite() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();
        let when = at(12, 0, 0);

        let first = store.save_at(white(2, 2), when).unwrap();
        let second = store.save_at(white(3, 3), when).unwrap();

        assert_eq!(first, "drawing_20240501_120000.png");
        assert_eq!(second, "drawing_20240501_120000_01.png");
        assert_eq!(store.list().unwrap(), vec![second.clone(), first.clone()]);

        let kept = image::open(store.path_of(&first).unwrap()).unwrap();
        assert_eq!((kept.width(), kept.height()), (2, 2));
    }

    #[test]
    fn test_save_fails_once_every_suffix_is_taken() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();
        let when = at(12, 0, 0);

        for _ in 0..100 {
            store.save_at(white(1, 1), when).unwrap();
        }
        let names = store.list().unwrap();
        assert_eq!(names.len(), 100);
        assert_eq!(names.first().unwrap(), "drawing_20240501_120000_99.png");

        match store.save_at(white(1, 1), when).unwrap_err() {
            SketchnotesError::Io(e) => assert_eq!(e.kind(), ErrorKind::AlreadyExists),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.list().unwrap().len(), 100);
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();
        let path = temp.path().join("drawing_20240501_120000.png");
        std::fs::write(&path, b"\x89PN").unwrap();

        let err = remove_on_error(&path, || Err(io::Error::other("disk full"))).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert!(!path.exists());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_from_list() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();
        let keep = store.save_at(white(2, 2), at(10, 0, 0)).unwrap();
        let gone = store.save_at(white(2, 2), at(11, 0, 0)).unwrap();

        store.delete(&gone).unwrap();
        assert_eq!(store.list().unwrap(), vec![keep]);
    }

    #[test]
    fn test_delete_missing_drawing_fails() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();

        let err = store.delete("drawing_20240501_120000.png").unwrap_err();
        assert!(matches!(err, SketchnotesError::DrawingNotFound(_)));
    }

    #[test]
    fn test_delete_rejects_paths_outside_directory() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("notes.csv");
        std::fs::write(&outside, "note\n").unwrap();
        let store = DrawingStore::open(temp.path().join("images")).unwrap();

        assert!(matches!(
            store.delete("../notes.csv").unwrap_err(),
            SketchnotesError::InvalidDrawingName(_)
        ));
        assert!(outside.exists());
    }

    #[test]
    fn test_list_ignores_other_files() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();
        std::fs::write(temp.path().join("readme.txt"), "hi").unwrap();
        std::fs::write(temp.path().join("upper.PNG"), "x").unwrap();
        std::fs::create_dir(temp.path().join("folder.png")).unwrap();
        let name = store.save_at(white(2, 2), at(7, 0, 0)).unwrap();

        assert_eq!(store.list().unwrap(), vec![name]);
    }

    #[test]
    fn test_read_returns_png_bytes() {
        let temp = TempDir::new().unwrap();
        let store = DrawingStore::open(temp.path()).unwrap();
        let name = store.save(white(2, 2)).unwrap();

        let bytes = store.read(&name).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert!(matches!(
            store.read("drawing_19990101_000000.png").unwrap_err(),
            SketchnotesError::DrawingNotFound(_)
        ));
    }

    #[test]
    fn test_entry_parses_timestamp() {
        let entry = DrawingEntry::from_file_name("drawing_20240501_120000.png".to_string());
        assert_eq!(entry.created_at, Some(at(12, 0, 0)));

        let foreign = DrawingEntry::from_file_name("holiday.png".to_string());
        assert_eq!(foreign.created_at, None);
    }
}
