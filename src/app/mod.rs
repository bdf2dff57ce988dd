// SPDX-License-Identifier: MPL-2.0
//! Gallery session state and orchestration.
//!
//! [`GalleryController`] owns everything one gallery session needs: the
//! request sequencer, the loaded collection, the grid and folder sidebar, the
//! open viewer, window placement and the toast queue. It never blocks. Every
//! network call is returned as a [`Task`] for the host runtime to await, and
//! the resulting [`Message`] comes back through [`GalleryController::update`].
//!
//! ```no_run
//! use st_gallery::app::{GalleryController, Flags};
//! use st_gallery::config;
//! use st_gallery::infrastructure::HttpImageApi;
//! use std::sync::Arc;
//!
//! # async fn run() -> st_gallery::error::Result<()> {
//! let (config, _warning) = config::load();
//! let api = Arc::new(HttpImageApi::new(&config.server)?);
//! let mut gallery = GalleryController::new(api, config, Flags::default());
//!
//! let (_outcome, mut tasks) = gallery.open(Some("Alice"));
//! while let Some(task) = tasks.pop() {
//!     let message = task.await;
//!     tasks.extend(gallery.update(message));
//! }
//! # Ok(())
//! # }
//! ```

mod message;
pub mod paths;
pub mod persisted_state;

pub use message::{
    Confirm, DownloadOutcome, Flags, Message, Task, DELETE_PROMPT, MENU_LABEL, OPEN_COMMAND,
};
pub use persisted_state::WindowState;

use crate::application::port::ImageApi;
use crate::application::{FolderLoad, Outcome, RequestSequencer, Settlement};
use crate::config::{self, Config, SortOrder};
use crate::media::{delete_path, image_path, ImageCollection};
use crate::ui::folders::FolderList;
use crate::ui::geometry::Size;
use crate::ui::gesture::{Effect, InputEvent};
use crate::ui::grid::{GridState, GridView};
use crate::ui::notifications::{self, Notification};
use crate::ui::state::{Transform, ViewportState};
use crate::ui::viewer::{Key, KeyAction, ViewerSession};
use crate::ui::window::{self, Rect, Sidebar, Stacking, WindowKind};
use futures_util::FutureExt;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Result of the "open gallery" command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The gallery window was created.
    Created,
    /// The gallery was already open and has been raised.
    BroughtToFront,
}

/// One gallery session.
pub struct GalleryController {
    api: Arc<dyn ImageApi>,
    config: Config,
    config_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    sequencer: RequestSequencer,
    collection: Option<ImageCollection>,
    /// Folder most recently requested; refresh and delete reload this one.
    current_folder: Option<String>,
    folders: FolderList,
    grid: GridState,
    viewer: Option<ViewerSession>,
    is_open: bool,
    stacking: Stacking,
    sidebar: Sidebar,
    window_state: WindowState,
    notifications: notifications::Manager,
    download: Option<DownloadOutcome>,
}

impl fmt::Debug for GalleryController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryController")
            .field("is_open", &self.is_open)
            .field("current_folder", &self.current_folder)
            .field("images", &self.collection.as_ref().map(ImageCollection::len))
            .field("viewer_index", &self.viewer.as_ref().map(ViewerSession::index))
            .finish_non_exhaustive()
    }
}

impl GalleryController {
    /// Creates a closed gallery. Persisted window placement is read here.
    pub fn new(api: Arc<dyn ImageApi>, config: Config, flags: Flags) -> Self {
        let (window_state, warning) = WindowState::load_from(flags.data_dir.clone());
        let mut notifications = notifications::Manager::new();
        if let Some(key) = warning {
            notifications.push(Notification::warning(key));
        }

        let grid = GridState::new(config.display.page_size());
        Self {
            api,
            config,
            config_dir: flags.config_dir,
            data_dir: flags.data_dir,
            sequencer: RequestSequencer::new(),
            collection: None,
            current_folder: None,
            folders: FolderList::new(),
            grid,
            viewer: None,
            is_open: false,
            stacking: Stacking::new(),
            sidebar: Sidebar::default(),
            window_state,
            notifications,
            download: None,
        }
    }

    // ---------------------------------------------------------------------
    // Gallery window
    // ---------------------------------------------------------------------

    /// Handles [`OPEN_COMMAND`]: opens the gallery, or raises it if it is
    /// already open.
    ///
    /// A fresh window reloads the folder list, then the current folder if
    /// one was loaded before, otherwise the folder of `character`.
    pub fn open(&mut self, character: Option<&str>) -> (OpenOutcome, Vec<Task>) {
        self.stacking.bring_to_front(WindowKind::Gallery);
        if self.is_open {
            return (OpenOutcome::BroughtToFront, Vec::new());
        }
        self.is_open = true;
        log::info!("Opening gallery");

        let mut tasks = vec![self.load_folders()];
        let folder = self
            .current_folder
            .clone()
            .or_else(|| character.filter(|c| !c.is_empty()).map(str::to_string));
        if let Some(folder) = folder {
            tasks.extend(self.select_folder(&folder));
        }
        (OpenOutcome::Created, tasks)
    }

    /// Closes the gallery: aborts in-flight requests and drops pending frames.
    ///
    /// The current folder is remembered for the next [`Self::open`].
    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.close_viewer();
        self.sequencer.cancel_all();
        self.grid.clear();
        self.stacking.remove(WindowKind::Gallery);
        self.is_open = false;
        log::info!("Gallery closed");
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Requests the folder list.
    pub fn load_folders(&mut self) -> Task {
        self.sequencer
            .request_folders(self.api.as_ref())
            .map(Message::FoldersLoaded)
            .boxed()
    }

    /// Starts loading `folder`, superseding any in-flight image request.
    ///
    /// Returns `None` for an empty folder name.
    pub fn select_folder(&mut self, folder: &str) -> Option<Task> {
        if folder.is_empty() {
            return None;
        }
        self.current_folder = Some(folder.to_string());
        self.folders.set_active(Some(folder));

        let (_token, load) = self.sequencer.request_images(self.api.as_ref(), folder);
        self.grid.set_loading(true);
        Some(load.map(Message::ImagesLoaded).boxed())
    }

    /// Reloads the current folder, or the folder list if none is loaded.
    pub fn refresh(&mut self) -> Option<Task> {
        match self.current_folder.clone() {
            Some(folder) => self.select_folder(&folder),
            None => Some(self.load_folders()),
        }
    }

    /// Follows the active character.
    ///
    /// With a name, that character's folder is loaded. Without one, the
    /// folder list is loaded if no folder is loaded yet.
    pub fn sync_to_character(&mut self, character: Option<&str>) -> Option<Task> {
        match character.filter(|c| !c.is_empty()) {
            Some(name) => {
                log::debug!("Following character {:?}", name);
                self.select_folder(name)
            }
            None if self.current_folder.is_none() => Some(self.load_folders()),
            None => None,
        }
    }

    /// Host event: a character was loaded. Ignored while the gallery is closed.
    pub fn on_character_loaded(&mut self, character: Option<&str>) -> Option<Task> {
        if !self.is_open {
            return None;
        }
        self.sync_to_character(character)
    }

    /// Flips the sort order, re-sorts locally and persists the choice.
    pub fn toggle_sort_order(&mut self) -> SortOrder {
        let order = self.sort_order().toggled();
        self.config.display.sort_order = Some(order);

        if let Some(collection) = self.collection.as_mut() {
            let shown = self
                .viewer
                .as_ref()
                .and_then(|viewer| collection.get(viewer.index()))
                .map(|entry| entry.filename().to_string());

            collection.resort(order);
            self.grid.collection_changed(collection.len());

            let moved_to = shown.and_then(|filename| collection.position(&filename));
            if let (Some(viewer), Some(index)) = (self.viewer.as_mut(), moved_to) {
                if viewer.index() != index {
                    viewer.show(index);
                }
            }
        }

        if let Err(err) = config::save_with_override(&self.config, self.config_dir.clone()) {
            log::warn!("Failed to persist sort order: {}", err);
            self.notifications
                .push(Notification::warning("notification-config-save-error"));
        }
        order
    }

    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.config.display.sort_order.unwrap_or_default()
    }

    /// Whether the loading indicator is shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.sequencer.is_loading()
    }

    // ---------------------------------------------------------------------
    // Viewer
    // ---------------------------------------------------------------------

    /// Opens the viewer on `index` of the loaded collection.
    pub fn open_image(&mut self, index: usize) -> bool {
        let in_range = self
            .collection
            .as_ref()
            .is_some_and(|collection| index < collection.len());
        if !in_range {
            return false;
        }

        match self.viewer.as_mut() {
            Some(viewer) => viewer.show(index),
            None => self.viewer = Some(ViewerSession::open(index)),
        }
        self.stacking.bring_to_front(WindowKind::Viewer);
        true
    }

    pub fn close_viewer(&mut self) {
        if let Some(mut viewer) = self.viewer.take() {
            viewer.close();
            self.stacking.remove(WindowKind::Viewer);
        }
    }

    /// Moves the viewer by `offset` images, wrapping around.
    pub fn navigate(&mut self, offset: isize) -> Option<usize> {
        let len = self.collection.as_ref().map_or(0, ImageCollection::len);
        self.viewer.as_mut()?.navigate(offset, len)
    }

    /// Routes a pointer, touch or wheel event to the open viewer.
    pub fn viewer_input(&mut self, event: InputEvent) -> Effect {
        let Some(viewer) = self.viewer.as_mut() else {
            return Effect::None;
        };
        let effect = viewer.handle_input(event);
        if let Effect::Navigate(direction) = effect {
            self.navigate(direction.offset());
        }
        effect
    }

    /// Handles a key press while the viewer is open. Returns whether it was used.
    pub fn key(&mut self, key: Key) -> bool {
        if self.viewer.is_none() {
            return false;
        }
        match key.action() {
            Some(KeyAction::Navigate(direction)) => {
                self.navigate(direction.offset());
                true
            }
            Some(KeyAction::Close) => {
                self.close_viewer();
                true
            }
            None => false,
        }
    }

    /// Records the decoded size of the image shown in the viewer.
    pub fn set_natural_size(&mut self, size: Size) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.set_natural_size(size);
        }
    }

    /// Toggles between fitted and actual size.
    pub fn toggle_fit(&mut self, rendered: Size) -> bool {
        self.viewer
            .as_mut()
            .is_some_and(|viewer| viewer.toggle_fit(rendered))
    }

    /// Folder and filename shown in the viewer.
    #[must_use]
    pub fn current_image(&self) -> Option<(&str, &str)> {
        let collection = self.collection.as_ref()?;
        let entry = collection.get(self.viewer.as_ref()?.index())?;
        Some((collection.folder(), entry.filename()))
    }

    /// URL of the image shown in the viewer.
    #[must_use]
    pub fn current_image_url(&self) -> Option<String> {
        let (folder, filename) = self.current_image()?;
        Some(self.api.image_url(&image_path(folder, filename)))
    }

    /// Deletes the image shown in the viewer after asking `confirm`.
    ///
    /// Returns `None` without any request when the user declines.
    pub fn delete_current(&mut self, confirm: &impl Confirm) -> Option<Task> {
        let (folder, filename) = self.current_image()?;
        let (folder, filename) = (folder.to_string(), filename.to_string());

        if !confirm.confirm(DELETE_PROMPT) {
            log::debug!("Delete of {:?} declined", filename);
            return None;
        }

        let request = self.api.delete_image(&delete_path(&folder, &filename));
        Some(
            request
                .map(move |result| Message::DeleteCompleted {
                    folder,
                    filename,
                    result,
                })
                .boxed(),
        )
    }

    /// Downloads the image shown in the viewer.
    ///
    /// The outcome is available from [`Self::take_download`] once the task
    /// has been fed back.
    pub fn download_current(&mut self) -> Option<Task> {
        let (folder, filename) = self.current_image()?;
        let path = image_path(folder, filename);
        let filename = filename.to_string();
        let url = self.api.image_url(&path);

        let request = self.api.fetch_image(&path);
        Some(
            request
                .map(move |result| Message::DownloadCompleted {
                    filename,
                    url,
                    result,
                })
                .boxed(),
        )
    }

    /// Takes the last finished download, if any.
    pub fn take_download(&mut self) -> Option<DownloadOutcome> {
        self.download.take()
    }

    // ---------------------------------------------------------------------
    // Update
    // ---------------------------------------------------------------------

    /// Applies the result of a finished task. Returns follow-up tasks.
    pub fn update(&mut self, message: Message) -> Vec<Task> {
        let mut tasks = Vec::new();
        match message {
            Message::FoldersLoaded(outcome) => self.handle_folders_loaded(outcome),
            Message::ImagesLoaded(load) => {
                let settlement = self.sequencer.settle(load, self.sort_order());
                self.handle_settlement(settlement);
                self.grid.set_loading(self.sequencer.is_loading());
            }
            Message::DeleteCompleted {
                folder,
                filename,
                result,
            } => {
                tasks.extend(self.handle_delete_completed(folder, filename, result));
            }
            Message::DownloadCompleted {
                filename,
                url,
                result,
            } => self.handle_download_completed(filename, url, result),
            Message::Notification(message) => self.notifications.handle_message(&message),
        }
        tasks
    }

    fn handle_folders_loaded(&mut self, load: FolderLoad) {
        let result = match load.outcome {
            Outcome::Aborted => return,
            Outcome::Completed(result) => result,
        };
        if !self.sequencer.folders_settled(load.token) {
            return;
        }

        match result {
            Ok(folders) => {
                log::debug!("Loaded {} folders", folders.len());
                self.folders.set_folders(folders);
                self.notifications.clear_load_errors();
            }
            Err(err) => {
                log::warn!("Failed to load folders: {}", err);
                self.notifications
                    .push(Notification::error("notification-folders-load-error"));
            }
        }
    }

    fn handle_settlement(&mut self, settlement: Settlement) {
        match settlement {
            Settlement::Apply(collection) => {
                let same_folder = self
                    .collection
                    .as_ref()
                    .is_some_and(|old| old.folder() == collection.folder());
                if !same_folder {
                    self.close_viewer();
                }

                self.grid.collection_replaced(collection.len());
                self.notifications.clear_load_errors();
                let shown = self.shown_filename();
                self.collection = Some(collection);
                self.follow_viewer(shown);
            }
            Settlement::Failed(err) => {
                self.notifications
                    .push(Notification::error("notification-images-load-error"));
                self.grid.load_failed(err);
            }
            Settlement::Discarded | Settlement::Aborted => {}
        }
    }

    fn handle_delete_completed(
        &mut self,
        folder: String,
        filename: String,
        result: crate::application::port::ApiResult<()>,
    ) -> Option<Task> {
        if let Err(err) = result {
            log::warn!("Failed to delete {}/{}: {}", folder, filename, err);
            self.notifications.push(
                Notification::error("notification-delete-error").with_arg("error", err.to_string()),
            );
            return None;
        }
        log::info!("Deleted {}/{}", folder, filename);

        let shown = self.shown_filename();
        let remaining = self
            .collection
            .as_mut()
            .filter(|collection| collection.folder() == folder)
            .map(|collection| {
                if let Some(index) = collection.position(&filename) {
                    collection.remove(index);
                }
                collection.len()
            });
        if let Some(len) = remaining {
            self.grid.collection_changed(len);
            self.follow_viewer(shown);
        }

        self.notifications
            .push(Notification::success("notification-image-deleted"));

        let reload = self.current_folder.clone().unwrap_or(folder);
        self.select_folder(&reload)
    }

    fn handle_download_completed(
        &mut self,
        filename: String,
        url: String,
        result: crate::application::port::ApiResult<Vec<u8>>,
    ) {
        let outcome = match result {
            Ok(bytes) => {
                log::info!("Downloaded {} ({} bytes)", filename, bytes.len());
                DownloadOutcome::Saved { filename, bytes }
            }
            Err(err) => {
                log::warn!("Download failed, falling back to direct link: {}", err);
                self.notifications.push(
                    Notification::warning("notification-download-fallback").with_arg("url", &url),
                );
                DownloadOutcome::DirectLink { filename, url }
            }
        };
        self.download = Some(outcome);
    }

    fn shown_filename(&self) -> Option<String> {
        self.current_image()
            .map(|(_, filename)| filename.to_string())
    }

    /// Re-targets the viewer after the collection changed under it.
    ///
    /// The viewer stays on `shown` if it survived. Otherwise it shows the
    /// image now at its old index (clamped) with a fresh viewport, and closes
    /// when nothing is left.
    fn follow_viewer(&mut self, shown: Option<String>) {
        let Some(collection) = self.collection.as_ref().filter(|c| !c.is_empty()) else {
            self.close_viewer();
            return;
        };
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };

        match shown.and_then(|filename| collection.position(&filename)) {
            Some(index) if index == viewer.index() => {}
            Some(index) => viewer.show(index),
            None => viewer.show(viewer.index().min(collection.len() - 1)),
        }
    }

    // ---------------------------------------------------------------------
    // Windows
    // ---------------------------------------------------------------------

    /// Rectangle to create `kind` with on `screen`.
    #[must_use]
    pub fn window_rect(&self, kind: WindowKind, screen: Size) -> Rect {
        let default = kind.default_size();
        window::ensure_on_screen(
            self.window_state.rect(kind),
            default.width,
            default.height,
            screen,
        )
    }

    /// Records a finished drag or resize and persists it.
    pub fn window_moved(&mut self, kind: WindowKind, rect: Rect) -> Rect {
        let rect = window::constrain_resize(kind, rect);
        self.window_state.set_rect(kind, rect);
        if let Some(key) = self.window_state.save_to(self.data_dir.clone()) {
            self.notifications.push(Notification::warning(key));
        }
        rect
    }

    /// Raises `kind` (mouse down anywhere in it).
    pub fn focus(&mut self, kind: WindowKind) -> u32 {
        self.stacking.bring_to_front(kind)
    }

    #[must_use]
    pub fn stacking(&self) -> &Stacking {
        &self.stacking
    }

    #[must_use]
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn sidebar_mut(&mut self) -> &mut Sidebar {
        &mut self.sidebar
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    /// Shows the next page of thumbnails.
    pub fn load_more(&mut self) -> bool {
        let len = self.collection.as_ref().map_or(0, ImageCollection::len);
        self.grid.load_more(len)
    }

    #[must_use]
    pub fn grid_view(&self) -> GridView {
        self.grid.view(self.collection.as_ref())
    }

    /// Whether the host should request an animation frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.grid.needs_frame()
            || self
                .viewer
                .as_ref()
                .is_some_and(|viewer| viewer.engine().needs_frame())
    }

    /// Paint tick for the grid.
    pub fn on_grid_frame<R>(&mut self, paint: impl FnOnce(&GridView) -> R) -> Option<R> {
        self.grid.on_animation_frame(self.collection.as_ref(), paint)
    }

    /// Paint tick for the viewer.
    pub fn on_viewer_frame<R>(&mut self, paint: impl FnOnce(&ViewportState) -> R) -> Option<R> {
        self.viewer
            .as_mut()?
            .engine_mut()
            .on_animation_frame(paint)
    }

    #[must_use]
    pub fn transform(&self) -> Option<Transform> {
        self.viewer.as_ref().map(ViewerSession::transform)
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn collection(&self) -> Option<&ImageCollection> {
        self.collection.as_ref()
    }

    #[must_use]
    pub fn current_folder(&self) -> Option<&str> {
        self.current_folder.as_deref()
    }

    #[must_use]
    pub fn folders(&self) -> &FolderList {
        &self.folders
    }

    #[must_use]
    pub fn viewer(&self) -> Option<&ViewerSession> {
        self.viewer.as_ref()
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::test_utils::{assert_abs_diff_eq, ScriptedApi};
    use crate::ui::geometry::Point;
    use crate::ui::gesture::{Direction, HitTarget};
    use crate::ui::grid::GridStatus;
    use std::cell::RefCell;
    use std::time::Instant;
    use tempfile::{tempdir, TempDir};

    fn controller(api: &Arc<ScriptedApi>, dir: &TempDir) -> GalleryController {
        let flags = Flags {
            data_dir: Some(dir.path().join("data")),
            config_dir: Some(dir.path().join("config")),
        };
        GalleryController::new(api.clone(), Config::default(), flags)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    async fn load(
        gallery: &mut GalleryController,
        api: &ScriptedApi,
        folder: &str,
        images: &[&str],
    ) {
        let task = gallery.select_folder(folder).expect("task");
        api.respond(folder, Ok(names(images)));
        let followups = gallery.update(task.await);
        assert!(followups.is_empty());
    }

    fn filenames(gallery: &GalleryController) -> Vec<String> {
        gallery
            .collection()
            .map(|c| c.iter().map(|e| e.filename().to_string()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn last_requested_folder_wins_in_any_arrival_order() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);

        let a = gallery.select_folder("A").expect("task");
        let b = gallery.select_folder("B").expect("task");
        let c = gallery.select_folder("C").expect("task");

        api.respond("C", Ok(names(&["c.png"])));
        gallery.update(c.await);
        api.respond("A", Ok(names(&["a.png"])));
        gallery.update(a.await);
        api.respond("B", Ok(names(&["b.png"])));
        gallery.update(b.await);

        assert_eq!(gallery.collection().map(ImageCollection::folder), Some("C"));
        assert_eq!(filenames(&gallery), names(&["c.png"]));
        assert!(!gallery.is_loading());
    }

    #[tokio::test]
    async fn superseded_request_keeps_indicator_and_raises_no_toast() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);

        let a = gallery.select_folder("A").expect("task");
        let _b = gallery.select_folder("B").expect("task");
        gallery.update(a.await);

        assert!(gallery.is_loading());
        assert_eq!(gallery.grid_view().status, GridStatus::Loading);
        assert!(!gallery.notifications().has_notifications());
    }

    #[tokio::test]
    async fn failed_load_keeps_prior_collection_and_shows_error() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "A", &["a.png"]).await;

        let task = gallery.select_folder("B").expect("task");
        api.respond("B", Err(ApiError::Malformed("expected an array".into())));
        gallery.update(task.await);

        assert_eq!(gallery.collection().map(ImageCollection::folder), Some("A"));
        assert!(matches!(gallery.grid_view().status, GridStatus::Error { .. }));
        assert!(gallery
            .notifications()
            .contains_key("notification-images-load-error"));
        assert!(!gallery.is_loading());

        load(&mut gallery, &api, "B", &["b.png"]).await;
        assert!(!gallery
            .notifications()
            .contains_key("notification-images-load-error"));
    }

    #[tokio::test]
    async fn opening_twice_brings_gallery_to_front() {
        let api = Arc::new(ScriptedApi::new().with_folders(Ok(names(&["Alice", "Bob"]))));
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);

        let (outcome, tasks) = gallery.open(None);
        assert_eq!(outcome, OpenOutcome::Created);
        assert_eq!(tasks.len(), 1);
        for task in tasks {
            gallery.update(task.await);
        }
        assert_eq!(gallery.folders().items().count(), 2);

        let (outcome, tasks) = gallery.open(None);
        assert_eq!(outcome, OpenOutcome::BroughtToFront);
        assert!(tasks.is_empty());
        assert_eq!(gallery.stacking().front(), Some(WindowKind::Gallery));
    }

    #[tokio::test]
    async fn open_follows_character_when_no_folder_is_loaded() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);

        let (_, tasks) = gallery.open(Some("Alice"));
        assert_eq!(tasks.len(), 2);
        assert_eq!(api.listed(), names(&["Alice"]));
        assert_eq!(gallery.folders().active(), Some("Alice"));
    }

    #[tokio::test]
    async fn character_events_are_ignored_while_closed() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);

        assert!(gallery.on_character_loaded(Some("Alice")).is_none());
        assert!(api.listed().is_empty());
    }

    #[tokio::test]
    async fn close_aborts_in_flight_request_silently() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);

        let (_, mut tasks) = gallery.open(Some("Alice"));
        gallery.close();
        assert!(!gallery.is_loading());

        let images = tasks.pop().expect("image task");
        gallery.update(images.await);

        assert!(gallery.collection().is_none());
        assert!(!gallery.notifications().has_notifications());
        assert!(!gallery.needs_frame());
    }

    #[tokio::test]
    async fn refresh_without_folder_loads_folder_list() {
        let api = Arc::new(ScriptedApi::new().with_folders(Ok(names(&["x"]))));
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);

        let task = gallery.refresh().expect("task");
        gallery.update(task.await);
        assert!(gallery.folders().is_loaded());
        assert!(api.listed().is_empty());
    }

    #[tokio::test]
    async fn folder_list_failure_raises_toast() {
        let api = Arc::new(
            ScriptedApi::new().with_folders(Err(ApiError::Transport("refused".into()))),
        );
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);

        let task = gallery.load_folders();
        gallery.update(task.await);
        assert!(!gallery.folders().is_loaded());
        assert!(gallery
            .notifications()
            .contains_key("notification-folders-load-error"));
    }

    #[tokio::test]
    async fn deleting_only_image_closes_viewer_and_reloads() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "A", &["only.png"]).await;
        assert!(gallery.open_image(0));

        let task = gallery.delete_current(&|_: &str| true).expect("task");
        let followups = gallery.update(task.await);

        assert_eq!(api.deleted(), names(&["user/images/A/only.png"]));
        assert!(gallery.viewer().is_none());
        assert_eq!(followups.len(), 1);
        assert_eq!(api.listed(), names(&["A", "A"]));
        assert!(gallery
            .notifications()
            .contains_key("notification-image-deleted"));
    }

    #[tokio::test]
    async fn deleting_last_index_clamps_viewer() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "A", &["a.png", "b.png", "c.png"]).await;
        assert!(gallery.open_image(2));

        let task = gallery.delete_current(&|_: &str| true).expect("task");
        gallery.update(task.await);

        assert_eq!(gallery.collection().map(ImageCollection::len), Some(2));
        assert_eq!(gallery.viewer().map(ViewerSession::index), Some(1));
    }

    #[tokio::test]
    async fn deleting_middle_image_shows_successor_with_fresh_viewport() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "A", &["a.png", "b.png", "c.png"]).await;
        assert!(gallery.open_image(1));
        assert_eq!(gallery.current_image(), Some(("A", "b.png")));

        gallery.set_natural_size(Size::new(4000.0, 2000.0));
        let viewer = gallery.viewer.as_mut().expect("viewer open");
        viewer.engine_mut().set_scale(3.0);
        viewer.engine_mut().set_translate(40.0, 0.0);

        let task = gallery.delete_current(&|_: &str| true).expect("task");
        let reload = gallery.update(task.await);

        assert_eq!(gallery.current_image(), Some(("A", "a.png")));
        let viewer = gallery.viewer().expect("viewer open");
        assert_eq!(viewer.index(), 1);
        assert_abs_diff_eq!(viewer.engine().state().scale(), 1.0);
        assert_abs_diff_eq!(viewer.engine().state().translate_x(), 0.0);
        assert_abs_diff_eq!(viewer.engine().state().translate_y(), 0.0);
        assert!(viewer.natural_size().is_none());

        // The background reload brings a new image ahead of the shown one.
        let mut reload = reload.into_iter();
        let task = reload.next().expect("reload task");
        api.respond("A", Ok(names(&["a.png", "c.png", "d.png"])));
        gallery.update(task.await);

        assert_eq!(filenames(&gallery), names(&["d.png", "c.png", "a.png"]));
        assert_eq!(gallery.current_image(), Some(("A", "a.png")));
        assert_eq!(gallery.viewer().map(ViewerSession::index), Some(2));
    }

    #[tokio::test]
    async fn reload_keeps_viewport_of_unmoved_image() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "A", &["a.png", "b.png"]).await;
        assert!(gallery.open_image(0));
        gallery
            .viewer
            .as_mut()
            .expect("viewer open")
            .engine_mut()
            .set_scale(2.0);

        load(&mut gallery, &api, "A", &["a.png", "b.png"]).await;

        let viewer = gallery.viewer().expect("viewer open");
        assert_eq!(viewer.index(), 0);
        assert_abs_diff_eq!(viewer.engine().state().scale(), 2.0);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "A", &["a.png"]).await;
        gallery.open_image(0);

        let prompt = RefCell::new(String::new());
        let declined = gallery.delete_current(&|p: &str| {
            prompt.borrow_mut().push_str(p);
            false
        });

        assert!(declined.is_none());
        assert!(api.deleted().is_empty());
        assert_eq!(prompt.into_inner(), DELETE_PROMPT);
        assert!(!gallery.notifications().has_notifications());
    }

    #[tokio::test]
    async fn failed_delete_keeps_entry() {
        let api = Arc::new(ScriptedApi::new().with_delete_result(Err(ApiError::Status {
            code: 500,
            message: "boom".into(),
        })));
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "A", &["a.png", "b.png"]).await;
        gallery.open_image(0);

        let task = gallery.delete_current(&|_: &str| true).expect("task");
        let followups = gallery.update(task.await);

        assert!(followups.is_empty());
        assert_eq!(gallery.collection().map(ImageCollection::len), Some(2));
        assert!(gallery.viewer().is_some());
        assert!(gallery
            .notifications()
            .contains_key("notification-delete-error"));
    }

    #[tokio::test]
    async fn download_falls_back_to_direct_link() {
        let api = Arc::new(
            ScriptedApi::new().with_fetch_result(Err(ApiError::Transport("reset".into()))),
        );
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "My Folder", &["a b.png"]).await;
        gallery.open_image(0);

        let task = gallery.download_current().expect("task");
        gallery.update(task.await);

        assert_eq!(
            gallery.take_download(),
            Some(DownloadOutcome::DirectLink {
                filename: "a b.png".into(),
                url: "http://gallery.test/user/images/My%20Folder/a%20b.png".into(),
            })
        );
        assert!(gallery.take_download().is_none());
    }

    #[tokio::test]
    async fn download_returns_bytes() {
        let api = Arc::new(ScriptedApi::new().with_fetch_result(Ok(vec![1, 2, 3])));
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "A", &["a.png"]).await;
        gallery.open_image(0);

        let task = gallery.download_current().expect("task");
        gallery.update(task.await);

        assert_eq!(
            gallery.take_download(),
            Some(DownloadOutcome::Saved {
                filename: "a.png".into(),
                bytes: vec![1, 2, 3],
            })
        );
    }

    #[tokio::test]
    async fn swipe_navigates_and_keys_wrap() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(&mut gallery, &api, "A", &["a.png", "b.png", "c.png"]).await;
        gallery.open_image(0);

        gallery.viewer_input(InputEvent::TouchStart {
            touches: vec![Point::new(200.0, 100.0)],
            target: HitTarget::Image,
            at: Instant::now(),
        });
        gallery.viewer_input(InputEvent::TouchMove {
            touches: vec![Point::new(160.0, 100.0)],
        });
        let effect = gallery.viewer_input(InputEvent::TouchEnd { remaining: vec![] });

        assert_eq!(effect, Effect::Navigate(Direction::Next));
        assert_eq!(gallery.viewer().map(ViewerSession::index), Some(1));
        let transform = gallery.transform().expect("viewer open");
        assert_abs_diff_eq!(transform.translate_x, 0.0);

        assert!(gallery.key(Key::ArrowLeft));
        assert!(gallery.key(Key::ArrowLeft));
        assert_eq!(gallery.viewer().map(ViewerSession::index), Some(2));

        assert!(!gallery.key(Key::Other));
        assert!(gallery.key(Key::Escape));
        assert!(gallery.viewer().is_none());
        assert!(!gallery.key(Key::ArrowRight));
    }

    #[tokio::test]
    async fn toggle_sort_resorts_locally_and_persists() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        load(
            &mut gallery,
            &api,
            "A",
            &["2023-01-01.png", "2024-06-01.png"],
        )
        .await;
        assert_eq!(filenames(&gallery)[0], "2024-06-01.png");
        gallery.open_image(0);

        assert_eq!(gallery.toggle_sort_order(), SortOrder::Oldest);

        assert_eq!(filenames(&gallery)[0], "2023-01-01.png");
        assert_eq!(gallery.viewer().map(ViewerSession::index), Some(1));
        assert_eq!(api.listed().len(), 1);

        let (saved, warning) = config::load_with_override(Some(dir.path().join("config")));
        assert!(warning.is_none());
        assert_eq!(saved.display.sort_order, Some(SortOrder::Oldest));
    }

    #[tokio::test]
    async fn window_rect_is_persisted_and_restored_on_screen() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);

        let stored = gallery.window_moved(WindowKind::Viewer, Rect::new(500.0, 900.0, 200.0, 800.0));
        assert_abs_diff_eq!(stored.width, 300.0);

        let reopened = controller(&api, &dir);
        let rect = reopened.window_rect(WindowKind::Viewer, Size::new(1024.0, 768.0));
        assert!(rect.fits_within(Size::new(1024.0, 768.0)));
        assert_abs_diff_eq!(rect.width, 300.0);
        assert_abs_diff_eq!(rect.height, 768.0);
        assert_abs_diff_eq!(rect.top, 0.0);
        assert_abs_diff_eq!(rect.left, 724.0);
    }

    #[tokio::test]
    async fn grid_frames_coalesce() {
        let api = Arc::new(ScriptedApi::new());
        let dir = tempdir().expect("temp dir");
        let mut gallery = controller(&api, &dir);
        let images: Vec<String> = (0..30).map(|i| format!("img{i}.png")).collect();
        let refs: Vec<&str> = images.iter().map(String::as_str).collect();
        load(&mut gallery, &api, "A", &refs).await;

        assert!(gallery.load_more());
        assert!(!gallery.load_more());

        let mut paints = 0;
        let shown = gallery.on_grid_frame(|view| {
            paints += 1;
            view.items.len()
        });
        assert_eq!(shown, Some(30));
        assert!(gallery.on_grid_frame(|_| ()).is_none());
        assert_eq!(paints, 1);
    }
}
