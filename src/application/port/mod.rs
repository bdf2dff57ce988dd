// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! Infrastructure adapters implement these traits; the application layer and
//! the controller only see the trait.
//!
//! # Available Ports
//!
//! - [`api`]: Remote image store (folder/image listing, delete, fetch)
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` so adapters can be shared across tasks
//! - Methods return boxed futures with [`crate::error::ApiError`] failures
//! - No `async fn` in traits; callers wrap the futures into tasks

pub mod api;

pub use api::{parse_string_list, ApiResult, ImageApi};
