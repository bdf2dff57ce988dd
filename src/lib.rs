// SPDX-License-Identifier: MPL-2.0
//! `st_gallery` is a headless client for a remote image gallery.
//!
//! It lists folders and images over a small JSON API, keeps the grid free of
//! stale or out-of-order responses, and turns pointer, touch and wheel input
//! into pan, zoom and swipe navigation for the image viewer. A GUI shell
//! embeds [`app::GalleryController`] and paints what it exposes.

#![doc(html_root_url = "https://docs.rs/st_gallery/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod ui;

#[cfg(test)]
mod test_utils;
