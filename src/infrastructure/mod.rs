// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`http`]: Remote image API over HTTP (implements [`ImageApi`])
//!
//! [`ImageApi`]: crate::application::port::ImageApi

pub mod http;

pub use http::HttpImageApi;
