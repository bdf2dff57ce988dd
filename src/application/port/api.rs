// SPDX-License-Identifier: MPL-2.0
//! Remote image API port definition.
//!
//! This module defines the [`ImageApi`] trait through which the gallery talks
//! to the image server. The HTTP adapter lives in
//! [`crate::infrastructure::http`]; tests substitute in-memory fakes.

use crate::error::ApiError;
use futures_util::future::BoxFuture;

/// Result of a single API call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Port for the remote image store.
///
/// Every method returns an owned, `'static` future so callers can hand it to
/// a runtime, wrap it in an abort handle, or drop it. Dropping the future
/// abandons the request.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the controller keeps them behind an
/// `Arc` and clones that into every task.
///
/// # Example
///
/// ```ignore
/// use st_gallery::application::port::ImageApi;
///
/// async fn print_folders(api: &dyn ImageApi) {
///     match api.list_folders().await {
///         Ok(folders) => folders.iter().for_each(|f| println!("{f}")),
///         Err(e) => eprintln!("Failed to list folders: {e}"),
///     }
/// }
/// ```
pub trait ImageApi: Send + Sync {
    /// Lists the folder names, in server order.
    fn list_folders(&self) -> BoxFuture<'static, ApiResult<Vec<String>>>;

    /// Lists the image filenames of `folder`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Malformed`] when the body is not an array of
    /// strings.
    fn list_images(&self, folder: &str) -> BoxFuture<'static, ApiResult<Vec<String>>>;

    /// Deletes the image at the relative `path` (`user/images/<folder>/<file>`).
    fn delete_image(&self, path: &str) -> BoxFuture<'static, ApiResult<()>>;

    /// Fetches the bytes served at the encoded image `path`.
    fn fetch_image(&self, path: &str) -> BoxFuture<'static, ApiResult<Vec<u8>>>;

    /// Absolute URL for `path`, used as the direct-link fallback.
    fn image_url(&self, path: &str) -> String;
}

/// Decodes a listing body, requiring an array of strings.
///
/// # Errors
///
/// Returns [`ApiError::Malformed`] for invalid JSON, non-array bodies or
/// arrays holding anything other than strings.
pub fn parse_string_list(body: &[u8]) -> ApiResult<Vec<String>> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ApiError::Malformed(e.to_string()))?;

    let serde_json::Value::Array(items) = value else {
        return Err(ApiError::Malformed(format!(
            "expected an array, got {}",
            json_kind(&value)
        )));
    };

    items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::String(s) => Ok(s),
            other => Err(ApiError::Malformed(format!(
                "expected string entries, got {}",
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
