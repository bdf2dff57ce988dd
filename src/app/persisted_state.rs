// SPDX-License-Identifier: MPL-2.0
//! Window placement persistence using JSON format.
//!
//! The gallery and viewer windows remember where the user last left them.
//! This is transient state, not a preference, so it lives in the data
//! directory as `window_state.json` rather than in `settings.toml`:
//!
//! ```json
//! { "galleryRect": { "top": 40, "left": 60, "width": 800, "height": 600 },
//!   "viewerRect": null }
//! ```
//!
//! # Path Resolution
//!
//! 1. Use `load_from()`/`save_to()` with explicit path override
//! 2. Set `ST_GALLERY_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use super::paths;
use crate::ui::window::{Rect, WindowKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// State file name within the app data directory.
const STATE_FILE: &str = "window_state.json";

/// Last known rectangles of the floating windows, stored independently.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    #[serde(default)]
    pub gallery_rect: Option<Rect>,

    #[serde(default)]
    pub viewer_rect: Option<Rect>,
}

impl WindowState {
    /// Stored rect of `kind`, if any.
    #[must_use]
    pub fn rect(&self, kind: WindowKind) -> Option<Rect> {
        match kind {
            WindowKind::Gallery => self.gallery_rect,
            WindowKind::Viewer => self.viewer_rect,
        }
    }

    /// Replaces the stored rect of `kind`.
    pub fn set_rect(&mut self, kind: WindowKind, rect: Rect) {
        match kind {
            WindowKind::Gallery => self.gallery_rect = Some(rect),
            WindowKind::Viewer => self.viewer_rect = Some(rect),
        }
    }

    /// Loads window state from the default location.
    ///
    /// Returns a tuple of (state, optional_warning). If loading fails, returns
    /// default state with a warning key explaining what went wrong.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads window state from a custom directory.
    ///
    /// # Path Resolution
    ///
    /// 1. `base_dir` parameter (if `Some`)
    /// 2. `ST_GALLERY_DATA_DIR` environment variable (if set)
    /// 3. Platform-specific data directory
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match serde_json::from_reader(BufReader::new(file)) {
                Ok(state) => (state, None),
                Err(err) => {
                    log::warn!("Ignoring unreadable {}: {}", path.display(), err);
                    (
                        Self::default(),
                        Some("notification-state-parse-error".to_string()),
                    )
                }
            },
            Err(err) => {
                log::warn!("Cannot open {}: {}", path.display(), err);
                (
                    Self::default(),
                    Some("notification-state-read-error".to_string()),
                )
            }
        }
    }

    /// Saves window state to the default location.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves window state to a custom directory.
    ///
    /// Creates the parent directory if it doesn't exist. Returns a warning
    /// key if the save failed.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("notification-state-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-state-dir-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                if serde_json::to_writer(BufWriter::new(file), self).is_err() {
                    return Some("notification-state-write-error".to_string());
                }
                None
            }
            Err(_) => Some("notification-state-create-error".to_string()),
        }
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_to_and_load_from_custom_directory() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut original = WindowState::default();
        original.set_rect(WindowKind::Gallery, Rect::new(40.0, 60.0, 800.0, 600.0));

        assert!(original.save_to(Some(base_dir.clone())).is_none());
        assert!(base_dir.join(STATE_FILE).exists());

        let (loaded, warning) = WindowState::load_from(Some(base_dir));
        assert!(warning.is_none());
        assert_eq!(loaded, original);
        assert!(loaded.rect(WindowKind::Viewer).is_none());
    }

    #[test]
    fn uses_camel_case_keys() {
        let mut state = WindowState::default();
        state.set_rect(WindowKind::Viewer, Rect::new(1.0, 2.0, 300.0, 400.0));
        let json = serde_json::to_string(&state).expect("serialize");

        assert!(json.contains("\"galleryRect\":null"));
        assert!(json.contains("\"viewerRect\":{"));
    }

    #[test]
    fn reads_partial_document() {
        let temp_dir = tempdir().expect("create temp dir");
        fs::write(
            temp_dir.path().join(STATE_FILE),
            r#"{"viewerRect": {"top": 5, "left": 6, "width": 700}}"#,
        )
        .expect("write file");

        let (state, warning) = WindowState::load_from(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert!(state.gallery_rect.is_none());
        assert_eq!(state.viewer_rect, Some(Rect::new(5.0, 6.0, 700.0, 0.0)));
    }

    #[test]
    fn load_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("create temp dir");
        let (state, warning) = WindowState::load_from(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(state, WindowState::default());
    }

    #[test]
    fn load_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("create temp dir");
        fs::write(temp_dir.path().join(STATE_FILE), "not json").expect("write file");

        let (state, warning) = WindowState::load_from(Some(temp_dir.path().to_path_buf()));
        assert_eq!(warning.as_deref(), Some("notification-state-parse-error"));
        assert_eq!(state, WindowState::default());
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp_dir = tempdir().expect("create temp dir");
        let nested_dir = temp_dir.path().join("nested").join("deeply");

        let result = WindowState::default().save_to(Some(nested_dir.clone()));
        assert!(result.is_none(), "save should succeed");
        assert!(nested_dir.join(STATE_FILE).exists());
    }
}
