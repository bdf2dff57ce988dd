// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Viewer pan/zoom state, separated from the controller so the gesture layer
//! and tests can drive it directly.

pub mod drag;
pub mod viewport;
pub mod zoom;

// Re-export commonly used types for convenience
pub use drag::DragState;
pub use viewport::{Transform, ViewportEngine, ViewportState};
pub use zoom::{clamp_scale, Scale};
