//! The ordered list of text notes and its CSV file.
//!
//! The whole file is read once by [`NoteStore::open`] and rewritten in full after
//! every mutation. The file has a single `note` column and one row per note, in
//! display order. Notes are identified only by their position, so deleting a note
//! moves every later note down by one.

use crate::{Note, Result, SketchnotesError};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Header of the only column the note file needs.
pub const NOTE_COLUMN: &str = "note";

/// In-memory copy of the note file, kept in step with the file after every mutation.
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Loads the note file at `path`, or starts empty if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`SketchnotesError::MissingNoteColumn`] if the file has no `note`
    /// header, or [`SketchnotesError::Csv`] if a record cannot be parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let notes = Self::load(&path)?;
        log::info!("Loaded {} notes from {}", notes.len(), path.display());
        Ok(Self { path, notes })
    }

    /// Reads the notes stored at `path` in file order.
    ///
    /// A missing file is an empty list. Columns other than `note` are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`NoteStore::open`]; an unreadable file gives [`SketchnotesError::Io`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Note>> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);
        let column = reader
            .headers()?
            .iter()
            .position(|header| header == NOTE_COLUMN)
            .ok_or_else(|| SketchnotesError::MissingNoteColumn(path.to_path_buf()))?;

        reader
            .records()
            .map(|record| -> Result<Note> {
                let record = record?;
                let text = record.get(column).unwrap_or_default().to_string();
                Ok(Note::from_stored(text))
            })
            .collect()
    }

    /// Discards the in-memory list and reads the file again.
    ///
    /// # Errors
    ///
    /// Same as [`NoteStore::load`].
    pub fn reload(&mut self) -> Result<()> {
        self.notes = Self::load(&self.path)?;
        Ok(())
    }

    /// Appends a note and persists the list.
    ///
    /// Blank input is ignored and returns `Ok(false)` without touching the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written. The note stays in memory.
    pub fn append(&mut self, text: &str) -> Result<bool> {
        let Some(note) = Note::new(text) else {
            log::debug!("Ignoring blank note");
            return Ok(false);
        };
        self.notes.push(note);
        self.persist()?;
        log::info!("Appended note #{}", self.notes.len());
        Ok(true)
    }

    /// Removes the note at `index` and persists the list.
    ///
    /// # Errors
    ///
    /// Returns [`SketchnotesError::NoteIndexOutOfRange`] if there is no such note,
    /// leaving the list unchanged. Write failures are returned as-is.
    pub fn delete_at(&mut self, index: usize) -> Result<Note> {
        if index >= self.notes.len() {
            return Err(SketchnotesError::NoteIndexOutOfRange {
                index,
                len: self.notes.len(),
            });
        }
        let removed = self.notes.remove(index);
        self.persist()?;
        log::info!("Deleted note #{}", index + 1);
        Ok(removed)
    }

    /// Overwrites the note file with the full in-memory list.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be written.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(&self.path)?;
        writer.write_record([NOTE_COLUMN])?;
        for note in &self.notes {
            writer.write_record([note.text()])?;
        }
        writer.flush()?;
        Ok(())
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn texts(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(Note::text).collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes.csv")).unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_and_reload_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");

        let mut store = NoteStore::open(&path).unwrap();
        assert!(store.append("Buy milk").unwrap());
        assert!(store.append("  Call Bob  ").unwrap());

        let reopened = NoteStore::open(&path).unwrap();
        assert_eq!(texts(reopened.notes()), vec!["Buy milk", "Call Bob"]);
    }

    #[test]
    fn test_delete_shifts_later_notes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");

        let mut store = NoteStore::open(&path).unwrap();
        store.append("Buy milk").unwrap();
        store.append("Call Bob").unwrap();

        let removed = store.delete_at(0).unwrap();
        assert_eq!(removed.text(), "Buy milk");

        let reloaded = NoteStore::load(&path).unwrap();
        assert_eq!(texts(&reloaded), vec!["Call Bob"]);
    }

    #[test]
    fn test_delete_middle_preserves_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");

        let mut store = NoteStore::open(&path).unwrap();
        for text in ["a", "b", "c", "d"] {
            store.append(text).unwrap();
        }
        store.delete_at(2).unwrap();

        assert_eq!(texts(&NoteStore::load(&path).unwrap()), vec!["a", "b", "d"]);
    }

    #[test]
    fn test_blank_append_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");

        let mut store = NoteStore::open(&path).unwrap();
        store.append("keep me").unwrap();
        let before = fs::read(&path).unwrap();

        assert!(!store.append("   \n\t").unwrap());
        assert!(!store.append("").unwrap());

        assert_eq!(fs::read(&path).unwrap(), before);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_out_of_range_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut store = NoteStore::open(dir.path().join("notes.csv")).unwrap();
        store.append("only").unwrap();

        let err = store.delete_at(1).unwrap_err();
        assert!(matches!(
            err,
            SketchnotesError::NoteIndexOutOfRange { index: 1, len: 1 }
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_format_is_single_note_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");

        let mut store = NoteStore::open(&path).unwrap();
        store.append("Buy milk").unwrap();
        store.append("eggs, bread").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "note\nBuy milk\n\"eggs, bread\"\n");
    }

    #[test]
    fn test_empty_list_still_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");

        let mut store = NoteStore::open(&path).unwrap();
        store.append("temp").unwrap();
        store.delete_at(0).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "note\n");
        assert!(NoteStore::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_special_characters_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");
        let tricky = "line one\nline \"two\", with comma";

        let mut store = NoteStore::open(&path).unwrap();
        store.append(tricky).unwrap();

        let reloaded = NoteStore::load(&path).unwrap();
        assert_eq!(texts(&reloaded), vec![tricky]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");
        fs::write(&path, "id,note\n1,first\n2,second\n").unwrap();

        let notes = NoteStore::load(&path).unwrap();
        assert_eq!(texts(&notes), vec!["first", "second"]);
    }

    #[test]
    fn test_missing_note_column_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");
        fs::write(&path, "text\nhello\n").unwrap();

        let err = NoteStore::open(&path).unwrap_err();
        assert!(matches!(err, SketchnotesError::MissingNoteColumn(_)));
    }

    #[test]
    fn test_zero_byte_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            NoteStore::load(&path).unwrap_err(),
            SketchnotesError::MissingNoteColumn(_)
        ));
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.csv");

        let mut store = NoteStore::open(&path).unwrap();
        store.append("mine").unwrap();
        fs::write(&path, "note\nmine\ntheirs\n").unwrap();

        store.reload().unwrap();
        assert_eq!(texts(store.notes()), vec!["mine", "theirs"]);
    }

    #[test]
    fn test_persist_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("notes.csv");

        let mut store = NoteStore::open(&path).unwrap();
        store.append("deep").unwrap();
        assert!(path.exists());
    }
}
