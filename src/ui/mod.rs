// SPDX-License-Identifier: MPL-2.0
//! Headless user interface state.
//!
//! Nothing in here draws. Each component keeps the state a view needs and
//! exposes a render model; the embedding shell paints it on animation frames
//! and feeds input back as plain events ("state down, messages up").
//!
//! # Components
//!
//! - [`grid`] - Paginated thumbnail grid with loading and error states
//! - [`folders`] - Folder sidebar model
//! - [`viewer`] - Open viewer session (index, viewport, keyboard)
//! - [`gesture`] - Pointer/touch/wheel interpretation into viewport intents
//! - [`window`] - Window placement, stacking and sidebar width
//! - [`notifications`] - Toast notification system for user feedback
//!
//! # Shared Infrastructure
//!
//! - [`state`] - Reusable state management (zoom, viewport, drag)
//! - [`render`] - Per-frame render coalescing
//! - [`geometry`] - Points and sizes

pub mod folders;
pub mod geometry;
pub mod gesture;
pub mod grid;
pub mod notifications;
pub mod render;
pub mod state;
pub mod viewer;
pub mod window;
