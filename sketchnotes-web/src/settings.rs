//! Application settings persistence for Sketchnotes.
//!
//! Stores where notes and drawings live, the address to serve on, and the
//! drawing surface defaults in a JSON file at an OS-appropriate location.

use serde::{Deserialize, Serialize};
use sketchnotes_core::{
    PenSettings, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_PEN_COLOR,
    DEFAULT_PEN_WIDTH,
};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_NOTES_FILE: &str = "notes.csv";
pub const DEFAULT_IMAGES_DIRECTORY: &str = "images";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8501";

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Base directory for relative `notes_file` and `images_directory` values.
    pub data_directory: String,
    pub notes_file: String,
    pub images_directory: String,
    pub bind_address: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub pen_color: String,
    pub pen_width: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory().to_string_lossy().to_string(),
            notes_file: DEFAULT_NOTES_FILE.to_string(),
            images_directory: DEFAULT_IMAGES_DIRECTORY.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            pen_color: DEFAULT_PEN_COLOR.to_string(),
            pen_width: DEFAULT_PEN_WIDTH,
        }
    }
}

impl AppSettings {
    /// Settings rooted at `dir`, with every other value at its default.
    pub fn in_directory<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            data_directory: dir.as_ref().to_string_lossy().to_string(),
            ..Self::default()
        }
    }

    /// Full path of the note file.
    pub fn notes_path(&self) -> PathBuf {
        Path::new(&self.data_directory).join(&self.notes_file)
    }

    /// Full path of the drawings directory.
    pub fn images_path(&self) -> PathBuf {
        Path::new(&self.data_directory).join(&self.images_directory)
    }

    /// Initial pen for the drawing surface; an invalid stored value falls back
    /// to the default pen.
    pub fn pen(&self) -> PenSettings {
        PenSettings::new(&self.pen_color, self.pen_width).unwrap_or_else(|e| {
            log::warn!("Ignoring stored pen settings: {e}");
            PenSettings::default()
        })
    }

    /// Canvas size in pixels, never zero.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.canvas_width.max(1),
            self.canvas_height.max(1),
        )
    }
}

const SETTINGS_FILE: &str = "settings.json";

/// Where the settings file lives.
///
/// - macOS / Linux: `~/.config/sketchnotes/settings.json`
/// - Windows: `%APPDATA%/Sketchnotes/settings.json`
pub fn settings_file_path() -> PathBuf {
    let dir = if cfg!(target_os = "windows") {
        dirs::config_dir().map(|config| config.join("Sketchnotes"))
    } else {
        dirs::home_dir().map(|home| home.join(".config").join("sketchnotes"))
    };
    dir.unwrap_or_else(|| PathBuf::from(".")).join(SETTINGS_FILE)
}

/// `~/Documents/Sketchnotes`, or `./Sketchnotes` without a home directory.
pub fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Sketchnotes")
}

/// Loads settings from the default location.
pub fn load_settings() -> AppSettings {
    load_settings_from(settings_file_path())
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings_from<P: AsRef<Path>>(path: P) -> AppSettings {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Settings file {} is unreadable, using defaults: {e}", path.display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to the default location.
pub fn save_settings(settings: &AppSettings) -> Result<(), String> {
    save_settings_to(settings_file_path(), settings)
}

/// Saves settings to `path`, creating parent directories as needed.
pub fn save_settings_to<P: AsRef<Path>>(path: P, settings: &AppSettings) -> Result<(), String> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {e}"))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, json)
        .map_err(|e| format!("Failed to write settings: {e}"))?;
    Ok(())
}
