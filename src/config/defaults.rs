// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Base URL of the image API when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default request timeout handed to the HTTP client (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Grid Defaults
// ==========================================================================

/// Number of thumbnails added to the grid per page.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Minimum grid page size.
pub const MIN_PAGE_SIZE: usize = 1;

/// Maximum grid page size.
pub const MAX_PAGE_SIZE: usize = 500;

// ==========================================================================
// Viewport Defaults
// ==========================================================================

/// Smallest allowed viewport scale.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed viewport scale.
pub const MAX_SCALE: f64 = 5.0;

/// Scale change per wheel notch.
pub const WHEEL_SCALE_STEP: f64 = 0.1;

/// Scale used by the double-tap / double-click zoom.
pub const DOUBLE_TAP_SCALE: f64 = 2.0;

/// Distance from 1.0 within which the image counts as fitted (unzoomed).
///
/// Shared by double-tap zoom, the fit toggle and swipe detection.
pub const FITTED_TOLERANCE: f64 = 0.05;

/// Horizontal displacement that turns a touch drag into a swipe.
pub const SWIPE_THRESHOLD: f64 = 30.0;

/// Maximum delay between two taps to count as a double-tap (in milliseconds).
pub const DOUBLE_TAP_DELAY_MS: u64 = 300;

// ==========================================================================
// Window Defaults
// ==========================================================================

/// Width and height below which a stored window size is ignored.
pub const MIN_PERSISTED_DIMENSION: f64 = 100.0;

/// Default gallery window size.
pub const GALLERY_DEFAULT_WIDTH: f64 = 800.0;
pub const GALLERY_DEFAULT_HEIGHT: f64 = 600.0;

/// Minimum gallery window size while resizing.
pub const GALLERY_MIN_WIDTH: f64 = 400.0;
pub const GALLERY_MIN_HEIGHT: f64 = 300.0;

/// Default viewer window size.
pub const VIEWER_DEFAULT_WIDTH: f64 = 600.0;
pub const VIEWER_DEFAULT_HEIGHT: f64 = 700.0;

/// Minimum viewer window size while resizing.
pub const VIEWER_MIN_WIDTH: f64 = 300.0;
pub const VIEWER_MIN_HEIGHT: f64 = 300.0;

/// Initial folder sidebar width.
pub const DEFAULT_SIDEBAR_WIDTH: f64 = 200.0;

/// Folder sidebar widths are accepted only strictly between these bounds.
pub const SIDEBAR_MIN_WIDTH: f64 = 100.0;
pub const SIDEBAR_MAX_WIDTH: f64 = 400.0;

/// First z-index handed out when a window is brought to the front.
pub const BASE_Z_INDEX: u32 = 2000;
