// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the remote image API.
//!
//! Listing and delete calls are JSON `POST`s under `/api/images/`; image
//! bytes are plain `GET`s of the encoded image path. Timeouts are enforced by
//! the underlying `reqwest` client.

use crate::application::port::{parse_string_list, ApiResult, ImageApi};
use crate::config::ServerConfig;
use crate::error::ApiError;
use futures_util::future::BoxFuture;
use futures_util::{FutureExt, StreamExt};
use serde::Serialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("StGallery/", env!("CARGO_PKG_VERSION"));

/// Longest server error body kept in [`ApiError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct ListRequest<'a> {
    folder: &'a str,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    path: &'a str,
}

/// [`ImageApi`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpImageApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageApi {
    /// Builds the adapter from the `[server]` settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be created
    /// (for example when the TLS backend fails to initialise).
    pub fn new(config: &ServerConfig) -> ApiResult<Self> {
        Self::with_base_url(config.base_url(), config.request_timeout())
    }

    /// Builds the adapter for an explicit server and timeout.
    ///
    /// # Errors
    ///
    /// See [`HttpImageApi::new`].
    pub fn with_base_url(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn post_list<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> BoxFuture<'static, ApiResult<Vec<String>>> {
        let request = self.client.post(self.url(endpoint)).json(body);
        async move {
            let response = request.send().await.map_err(transport_error)?;
            let response = check_status(response).await?;
            let bytes = response.bytes().await.map_err(transport_error)?;
            parse_string_list(&bytes)
        }
        .boxed()
    }
}

impl ImageApi for HttpImageApi {
    fn list_folders(&self) -> BoxFuture<'static, ApiResult<Vec<String>>> {
        self.post_list("api/images/folders", &serde_json::json!({}))
    }

    fn list_images(&self, folder: &str) -> BoxFuture<'static, ApiResult<Vec<String>>> {
        self.post_list("api/images/list", &ListRequest { folder })
    }

    fn delete_image(&self, path: &str) -> BoxFuture<'static, ApiResult<()>> {
        let request = self
            .client
            .post(self.url("api/images/delete"))
            .json(&DeleteRequest { path });
        async move {
            let response = request.send().await.map_err(transport_error)?;
            check_status(response).await?;
            Ok(())
        }
        .boxed()
    }

    fn fetch_image(&self, path: &str) -> BoxFuture<'static, ApiResult<Vec<u8>>> {
        let request = self.client.get(self.url(path));
        async move {
            let response = request.send().await.map_err(transport_error)?;
            let response = check_status(response).await?;

            let mut bytes = Vec::with_capacity(
                response
                    .content_length()
                    .and_then(|len| usize::try_from(len).ok())
                    .unwrap_or(0),
            );
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(transport_error)?;
                bytes.extend_from_slice(&chunk);
            }
            Ok(bytes)
        }
        .boxed()
    }

    fn image_url(&self, path: &str) -> String {
        self.url(path)
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), &body))
}

fn status_error(code: u16, body: &str) -> ApiError {
    ApiError::Status {
        code,
        message: body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}
