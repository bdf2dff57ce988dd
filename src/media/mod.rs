// SPDX-License-Identifier: MPL-2.0
//! Gallery media model: image entries, the loaded collection, sorting and
//! server-side paths.

pub mod collection;
pub mod path;
pub mod sort;

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub use collection::ImageCollection;
pub use path::{delete_path, encode_uri_component, image_path};
pub use sort::{sort_entries, sort_images};

/// `YYYY-MM-DD` with optional hyphens, first occurrence in the name.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})-?([0-9]{2})-?([0-9]{2})").expect("date pattern is valid")
});

/// An image filename together with the capture date derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    filename: String,
    capture_date: Option<NaiveDate>,
}

impl ImageEntry {
    /// Creates an entry, extracting the capture date from the filename.
    pub fn new(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let capture_date = extract_capture_date(&filename);
        Self {
            filename,
            capture_date,
        }
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Date embedded in the filename, if it holds a real calendar date.
    #[must_use]
    pub fn capture_date(&self) -> Option<NaiveDate> {
        self.capture_date
    }

    /// Date used for ordering: the capture date, or the Unix epoch
    /// (`NaiveDate::default()` is 1970-01-01).
    #[must_use]
    pub fn sort_date(&self) -> NaiveDate {
        self.capture_date.unwrap_or_default()
    }
}

/// Returns the first `YYYY-MM-DD`-like date in `name`.
///
/// Only the first match is considered; if it is not a valid date
/// (`2024-13-40`) the name is treated as undated.
#[must_use]
pub fn extract_capture_date(name: &str) -> Option<NaiveDate> {
    let caps = DATE_PATTERN.captures(name)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
