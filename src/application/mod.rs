// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`sequencer`]: Race-safe ordering of listing requests
//!
//! # Dependency Rule
//!
//! - Application layer depends on the media model (entries, sorting)
//! - Infrastructure layer implements application layer ports
//! - The controller in [`crate::app`] drives the application services

pub mod port;
pub mod sequencer;

pub use sequencer::{FolderLoad, ImageLoad, Outcome, RequestSequencer, RequestToken, Settlement};
