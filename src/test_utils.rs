// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.
//! It also provides [`ScriptedApi`], an in-memory [`ImageApi`] whose listing
//! responses are released by the test in any order.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::application::port::{ApiResult, ImageApi};
use crate::error::ApiError;
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;
use std::sync::Mutex;
use tokio::sync::oneshot;

type Pending = (String, oneshot::Sender<ApiResult<Vec<String>>>);

/// Fake image API.
///
/// Image listings stay pending until [`ScriptedApi::respond`] releases them.
/// Folder listings, deletes and fetches answer immediately with the configured
/// result.
pub struct ScriptedApi {
    pending: Mutex<Vec<Pending>>,
    folders: Mutex<ApiResult<Vec<String>>>,
    delete_result: Mutex<ApiResult<()>>,
    fetch_result: Mutex<ApiResult<Vec<u8>>>,
    deleted: Mutex<Vec<String>>,
    listed: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            folders: Mutex::new(Ok(Vec::new())),
            delete_result: Mutex::new(Ok(())),
            fetch_result: Mutex::new(Ok(Vec::new())),
            deleted: Mutex::new(Vec::new()),
            listed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_folders(self, folders: ApiResult<Vec<String>>) -> Self {
        *self.folders.lock().unwrap() = folders;
        self
    }

    pub fn with_delete_result(self, result: ApiResult<()>) -> Self {
        *self.delete_result.lock().unwrap() = result;
        self
    }

    pub fn with_fetch_result(self, result: ApiResult<Vec<u8>>) -> Self {
        *self.fetch_result.lock().unwrap() = result;
        self
    }

    /// Releases the oldest pending listing of `folder`.
    pub fn respond(&self, folder: &str, result: ApiResult<Vec<String>>) {
        let mut pending = self.pending.lock().unwrap();
        let index = pending
            .iter()
            .position(|(f, _)| f == folder)
            .unwrap_or_else(|| panic!("no pending listing for {folder}"));
        let (_, sender) = pending.remove(index);
        let _ = sender.send(result);
    }

    /// Paths passed to `delete_image`, in call order.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    /// Folders passed to `list_images`, in call order.
    pub fn listed(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageApi for ScriptedApi {
    fn list_folders(&self) -> BoxFuture<'static, ApiResult<Vec<String>>> {
        future::ready(self.folders.lock().unwrap().clone()).boxed()
    }

    fn list_images(&self, folder: &str) -> BoxFuture<'static, ApiResult<Vec<String>>> {
        let (sender, receiver) = oneshot::channel();
        self.pending.lock().unwrap().push((folder.to_string(), sender));
        self.listed.lock().unwrap().push(folder.to_string());
        receiver
            .map(|result| {
                result.unwrap_or_else(|_| Err(ApiError::Transport("response dropped".into())))
            })
            .boxed()
    }

    fn delete_image(&self, path: &str) -> BoxFuture<'static, ApiResult<()>> {
        self.deleted.lock().unwrap().push(path.to_string());
        future::ready(self.delete_result.lock().unwrap().clone()).boxed()
    }

    fn fetch_image(&self, _path: &str) -> BoxFuture<'static, ApiResult<Vec<u8>>> {
        future::ready(self.fetch_result.lock().unwrap().clone()).boxed()
    }

    fn image_url(&self, path: &str) -> String {
        format!("http://gallery.test/{path}")
    }
}
