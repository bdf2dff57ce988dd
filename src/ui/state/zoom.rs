// SPDX-License-Identifier: MPL-2.0
//! Viewport scale bounds.
//!
//! [`Scale`] is the only way the viewport stores a zoom factor, so the
//! `MIN_SCALE..=MAX_SCALE` bound holds after every operation.

pub use crate::config::{DOUBLE_TAP_SCALE, FITTED_TOLERANCE, MAX_SCALE, MIN_SCALE};

/// Clamps `value` to the allowed scale range.
///
/// NaN maps to the identity scale. Idempotent.
#[must_use]
pub fn clamp_scale(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(MIN_SCALE, MAX_SCALE)
}

/// Zoom factor, guaranteed to be within the valid range (0.1–5).
///
/// This type ensures that scale values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Scale(f64);

impl Scale {
    /// The identity scale (image shown at its fitted size).
    pub const FITTED: Scale = Scale(1.0);

    /// Creates a new scale, clamping the value to the valid range.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(clamp_scale(value))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the image is shown at (about) its fitted size.
    #[must_use]
    pub fn is_fitted(self) -> bool {
        (self.0 - 1.0).abs() <= FITTED_TOLERANCE
    }

    /// Whether the image is not zoomed in beyond the fitted tolerance.
    ///
    /// Single-finger drags are horizontal-only and can swipe in this range.
    #[must_use]
    pub fn is_unzoomed(self) -> bool {
        self.0 <= 1.0 + FITTED_TOLERANCE
    }

    /// Adds `delta`, clamping the result.
    #[must_use]
    pub fn offset_by(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }

    /// Multiplies by `factor`, clamping the result.
    #[must_use]
    pub fn times(self, factor: f64) -> Self {
        Self::new(self.0 * factor)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::FITTED
    }
}
