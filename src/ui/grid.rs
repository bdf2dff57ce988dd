// SPDX-License-Identifier: MPL-2.0
//! Paginated thumbnail grid.
//!
//! The grid shows the loaded collection a page at a time. It never owns the
//! collection; the controller passes it in when a view is built.

use crate::error::ApiError;
use crate::media::ImageCollection;
use crate::ui::render::RenderScheduler;

/// What the grid area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridStatus {
    /// No folder selected yet.
    Idle,
    /// First load of a folder is in flight.
    Loading,
    /// The folder has no images.
    NoImages,
    /// Thumbnails are shown.
    Ready,
    /// The last load failed; shown inline in place of the grid.
    Error { key: &'static str, message: String },
}

/// One thumbnail cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    pub index: usize,
    pub filename: String,
    /// Encoded URL path of the image.
    pub path: String,
}

/// Render model of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub status: GridStatus,
    pub items: Vec<GridItem>,
    /// Images not shown yet; the "Load More (n)" button appears when non-zero.
    pub remaining: usize,
    /// Dim the existing thumbnails while a reload is in flight.
    pub dimmed: bool,
}

impl GridView {
    /// Label of the "load more" button, if it should be shown.
    #[must_use]
    pub fn load_more_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("Load More ({})", self.remaining))
    }
}

/// Pagination and load status of the grid.
#[derive(Debug, Clone)]
pub struct GridState {
    page_size: usize,
    shown: usize,
    loading: bool,
    error: Option<ApiError>,
    render: RenderScheduler,
}

impl GridState {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            shown: 0,
            loading: false,
            error: None,
            render: RenderScheduler::new(),
        }
    }

    /// Number of thumbnails currently shown.
    #[must_use]
    pub fn shown(&self) -> usize {
        self.shown
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.render.schedule();
        }
    }

    /// A new collection of `len` images replaced the old one.
    ///
    /// Drops any frame scheduled for the old collection and restarts at the
    /// first page.
    pub fn collection_replaced(&mut self, len: usize) {
        self.render.cancel();
        self.error = None;
        self.shown = self.page_size.min(len);
        self.render.schedule();
    }

    /// The collection shrank or was re-sorted in place.
    pub fn collection_changed(&mut self, len: usize) {
        self.shown = self.shown.min(len);
        self.render.schedule();
    }

    /// The current load failed.
    pub fn load_failed(&mut self, error: ApiError) {
        self.error = Some(error);
        self.render.schedule();
    }

    /// Forgets everything shown (folder switched away or gallery closed).
    pub fn clear(&mut self) {
        self.shown = 0;
        self.error = None;
        self.loading = false;
        self.render.cancel();
    }

    /// Appends the next page. Returns `false` when everything is shown.
    pub fn load_more(&mut self, len: usize) -> bool {
        if self.shown >= len {
            return false;
        }
        self.shown = (self.shown + self.page_size).min(len);
        self.render.schedule();
        true
    }

    /// Builds the render model for `collection`.
    #[must_use]
    pub fn view(&self, collection: Option<&ImageCollection>) -> GridView {
        let status = match (&self.error, collection) {
            (Some(err), _) => GridStatus::Error {
                key: err.i18n_key(),
                message: err.to_string(),
            },
            (None, None) if self.loading => GridStatus::Loading,
            (None, None) => GridStatus::Idle,
            (None, Some(c)) if c.is_empty() => GridStatus::NoImages,
            (None, Some(_)) => GridStatus::Ready,
        };

        let (items, remaining) = match (&status, collection) {
            (GridStatus::Ready, Some(c)) => {
                let shown = self.shown.min(c.len());
                let items = c
                    .iter()
                    .take(shown)
                    .enumerate()
                    .map(|(index, entry)| GridItem {
                        index,
                        filename: entry.filename().to_string(),
                        path: crate::media::image_path(c.folder(), entry.filename()),
                    })
                    .collect();
                (items, c.len() - shown)
            }
            _ => (Vec::new(), 0),
        };

        GridView {
            status,
            items,
            remaining,
            dimmed: self.loading && collection.is_some(),
        }
    }

    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.render.is_pending()
    }

    /// Paints the latest grid view if a render is pending.
    pub fn on_animation_frame<R>(
        &mut self,
        collection: Option<&ImageCollection>,
        paint: impl FnOnce(&GridView) -> R,
    ) -> Option<R> {
        if !self.render.is_pending() {
            return None;
        }
        let view = self.view(collection);
        self.render.flush(|| paint(&view))
    }
}
