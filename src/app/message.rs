// SPDX-License-Identifier: MPL-2.0
use crate::application::port::ApiResult;
use crate::application::{FolderLoad, ImageLoad};
use crate::ui::notifications;
use futures_util::future::BoxFuture;
use std::path::PathBuf;

/// Slash command that opens the gallery window.
pub const OPEN_COMMAND: &str = "/gallery";

/// Menu entry label for [`OPEN_COMMAND`].
pub const MENU_LABEL: &str = "Image Gallery";

/// Prompt shown before an image is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this image?";

/// Pending work handed to the embedding runtime. Its output goes back
/// through [`super::GalleryController::update`].
pub type Task = BoxFuture<'static, Message>;

/// Results of asynchronous work, fed back into the controller.
#[derive(Debug, Clone)]
pub enum Message {
    FoldersLoaded(FolderLoad),
    ImagesLoaded(ImageLoad),
    DeleteCompleted {
        folder: String,
        filename: String,
        result: ApiResult<()>,
    },
    DownloadCompleted {
        filename: String,
        url: String,
        result: ApiResult<Vec<u8>>,
    },
    Notification(notifications::NotificationMessage),
}

/// What the host should do with a finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Bytes fetched; save them under `filename`.
    Saved { filename: String, bytes: Vec<u8> },
    /// Fetch failed; hand `url` to the platform instead.
    DirectLink { filename: String, url: String },
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Runtime flags passed from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional data directory override (window state).
    pub data_dir: Option<PathBuf>,
    /// Optional config directory override (`settings.toml`).
    pub config_dir: Option<PathBuf>,
}
