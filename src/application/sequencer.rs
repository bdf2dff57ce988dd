// SPDX-License-Identifier: MPL-2.0
//! Ordering of folder and image listing requests.
//!
//! Every image-list request gets a fresh [`RequestToken`] and becomes the
//! current one, aborting whatever request was in flight before it. When a
//! response comes back it is applied only if its token is still current, so
//! requesting folders A, B and C back-to-back can only ever publish C,
//! whatever order the responses arrive in.
//!
//! Aborted requests are not failures: they settle as [`Settlement::Aborted`]
//! and never produce error UI.

use super::port::{ApiResult, ImageApi};
use crate::config::SortOrder;
use crate::error::ApiError;
use crate::media::{sort_images, ImageCollection};
use futures_util::future::{abortable, AbortHandle, Aborted, BoxFuture};
use futures_util::FutureExt;

/// Marker of one listing request. Tokens are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// How a request future finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The server answered (successfully or not).
    Completed(ApiResult<T>),
    /// The request was canceled before it finished.
    Aborted,
}

impl<T> From<Result<ApiResult<T>, Aborted>> for Outcome<T> {
    fn from(result: Result<ApiResult<T>, Aborted>) -> Self {
        match result {
            Ok(completed) => Outcome::Completed(completed),
            Err(Aborted) => Outcome::Aborted,
        }
    }
}

/// A settled image-list request, ready to be handed back to the sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoad {
    pub token: RequestToken,
    pub folder: String,
    pub outcome: Outcome<Vec<String>>,
}

/// A settled folder-list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderLoad {
    pub token: RequestToken,
    pub outcome: Outcome<Vec<String>>,
}

/// What the caller should do with a settled [`ImageLoad`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The response is current: replace the collection with this one.
    Apply(ImageCollection),
    /// The current request failed: surface the error, keep prior state.
    Failed(ApiError),
    /// A newer request superseded this one: drop silently.
    Discarded,
    /// The request was canceled: drop silently.
    Aborted,
}

/// Issues listing requests and decides which responses are authoritative.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next_id: u64,
    current: Option<RequestToken>,
    in_flight: Option<(RequestToken, AbortHandle)>,
    folders_in_flight: Option<(RequestToken, AbortHandle)>,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading the folder list, aborting a previous folder request.
    pub fn request_folders(&mut self, api: &dyn ImageApi) -> BoxFuture<'static, FolderLoad> {
        let token = self.next_token();
        if let Some((previous, handle)) = self.folders_in_flight.take() {
            log::debug!("Folder request {:?} superseded by {:?}", previous, token);
            handle.abort();
        }
        let (request, handle) = abortable(api.list_folders());
        self.folders_in_flight = Some((token, handle));
        log::debug!("Folder request {:?} issued", token);
        request
            .map(move |result| FolderLoad {
                token,
                outcome: result.into(),
            })
            .boxed()
    }

    /// Retires a completed folder request.
    ///
    /// Returns `false` when `token` is no longer the latest folder request;
    /// its response must then be dropped. The newer request keeps its abort
    /// handle.
    pub fn folders_settled(&mut self, token: RequestToken) -> bool {
        match self.folders_in_flight {
            Some((current, _)) if current == token => {
                self.folders_in_flight = None;
                true
            }
            _ => {
                log::debug!("Discarding stale folder response {:?}", token);
                false
            }
        }
    }

    fn next_token(&mut self) -> RequestToken {
        let token = RequestToken(self.next_id);
        self.next_id += 1;
        token
    }

    /// Starts loading the images of `folder`.
    ///
    /// The returned token becomes current and any in-flight image request is
    /// aborted. The future always resolves; feed it to [`Self::settle`].
    pub fn request_images(
        &mut self,
        api: &dyn ImageApi,
        folder: &str,
    ) -> (RequestToken, BoxFuture<'static, ImageLoad>) {
        let token = self.next_token();

        if let Some((previous, handle)) = self.in_flight.take() {
            log::debug!("Request {:?} superseded by {:?}", previous, token);
            handle.abort();
        }

        let (request, handle) = abortable(api.list_images(folder));
        self.current = Some(token);
        self.in_flight = Some((token, handle));
        log::debug!("Request {:?} issued for folder {:?}", token, folder);

        let folder = folder.to_string();
        let load = request
            .map(move |result| ImageLoad {
                token,
                folder,
                outcome: result.into(),
            })
            .boxed();
        (token, load)
    }

    /// Classifies a finished request and retires its token.
    ///
    /// Successful current responses are sorted with `order` before they are
    /// returned.
    pub fn settle(&mut self, load: ImageLoad, order: SortOrder) -> Settlement {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|(token, _)| *token == load.token)
        {
            self.in_flight = None;
        }

        let result = match load.outcome {
            Outcome::Aborted => {
                log::debug!("Request {:?} aborted", load.token);
                return Settlement::Aborted;
            }
            Outcome::Completed(result) => result,
        };

        if self.current != Some(load.token) {
            log::debug!("Discarding stale response for {:?}", load.token);
            return Settlement::Discarded;
        }
        self.current = None;

        match result {
            Ok(names) => {
                log::debug!(
                    "Applying {} images for folder {:?}",
                    names.len(),
                    load.folder
                );
                Settlement::Apply(ImageCollection::new(
                    load.folder,
                    sort_images(names, order),
                ))
            }
            Err(err) => {
                log::warn!("Failed to load images for {:?}: {}", load.folder, err);
                Settlement::Failed(err)
            }
        }
    }

    /// Token of the authoritative outstanding request, if any.
    #[must_use]
    pub fn current(&self) -> Option<RequestToken> {
        self.current
    }

    /// Whether the loading indicator should be visible.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.current.is_some()
    }

    /// Aborts every outstanding request and clears the current token.
    pub fn cancel_all(&mut self) {
        if let Some((token, handle)) = self.in_flight.take() {
            log::debug!("Canceling request {:?}", token);
            handle.abort();
        }
        if let Some((token, handle)) = self.folders_in_flight.take() {
            log::debug!("Canceling folder request {:?}", token);
            handle.abort();
        }
        self.current = None;
    }
}
