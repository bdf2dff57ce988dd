// SPDX-License-Identifier: MPL-2.0
//! Viewport transform state and the engine that mutates it.
//!
//! The engine is the only writer of [`ViewportState`]. Each mutation
//! validates its input, updates the state and schedules one coalesced render
//! through the embedded [`RenderScheduler`]. The host paints on the next
//! animation frame via [`ViewportEngine::on_animation_frame`], which receives
//! the state read-only.

use super::zoom::{Scale, DOUBLE_TAP_SCALE};
use crate::config::WHEEL_SCALE_STEP;
use crate::ui::geometry::{Point, Size};
use crate::ui::render::RenderScheduler;
use std::fmt;

/// Pan/zoom state of the open viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    scale: Scale,
    translate_x: f64,
    translate_y: f64,
    is_dragging: bool,
    pinch_origin_distance: f64,
    pinch_origin_scale: Scale,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: Scale::FITTED,
            translate_x: 0.0,
            translate_y: 0.0,
            is_dragging: false,
            pinch_origin_distance: 0.0,
            pinch_origin_scale: Scale::FITTED,
        }
    }
}

impl ViewportState {
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale.value()
    }

    #[must_use]
    pub fn translate_x(&self) -> f64 {
        self.translate_x
    }

    #[must_use]
    pub fn translate_y(&self) -> f64 {
        self.translate_y
    }

    #[must_use]
    pub fn translate(&self) -> Point {
        Point::new(self.translate_x, self.translate_y)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    #[must_use]
    pub fn pinch_origin_distance(&self) -> f64 {
        self.pinch_origin_distance
    }

    #[must_use]
    pub fn pinch_origin_scale(&self) -> f64 {
        self.pinch_origin_scale.value()
    }

    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.scale.is_fitted()
    }

    #[must_use]
    pub fn is_unzoomed(&self) -> bool {
        self.scale.is_unzoomed()
    }

    /// Transform to paint for this state.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform {
            translate_x: self.translate_x,
            translate_y: self.translate_y,
            scale: self.scale.value(),
            will_change: self.is_dragging || self.scale != Scale::FITTED,
        }
    }
}

/// Paintable transform, formatted as a CSS `transform` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    /// Hint that the transform is about to change again (drag or zoom).
    pub will_change: bool,
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Owns the viewport state of one open viewer.
#[derive(Debug, Clone, Default)]
pub struct ViewportEngine {
    state: ViewportState,
    render: RenderScheduler,
}

impl ViewportEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Sets the scale, clamped to the allowed range.
    pub fn set_scale(&mut self, scale: f64) {
        self.state.scale = Scale::new(scale);
        self.render.schedule();
    }

    /// Sets the translation. Non-finite components become 0.
    pub fn set_translate(&mut self, x: f64, y: f64) {
        self.state.translate_x = if x.is_finite() { x } else { 0.0 };
        self.state.translate_y = if y.is_finite() { y } else { 0.0 };
        self.render.schedule();
    }

    /// Returns to identity. Called whenever the displayed image changes.
    pub fn reset(&mut self) {
        self.state = ViewportState::default();
        self.render.schedule();
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        if self.state.is_dragging != dragging {
            self.state.is_dragging = dragging;
            self.render.schedule();
        }
    }

    /// Wheel zoom: scrolling down zooms out one step, anything else zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        let step = if delta_y > 0.0 {
            -WHEEL_SCALE_STEP
        } else {
            WHEEL_SCALE_STEP
        };
        self.state.scale = self.state.scale.offset_by(step);
        self.render.schedule();
    }

    /// Records the finger separation and scale a pinch starts from.
    pub fn begin_pinch(&mut self, distance: f64) {
        self.state.is_dragging = false;
        self.state.pinch_origin_distance = if distance.is_finite() { distance } else { 0.0 };
        self.state.pinch_origin_scale = self.state.scale;
    }

    /// Scales relative to the pinch origin. Ignored if the origin distance is 0.
    pub fn pinch_to(&mut self, distance: f64) {
        let origin = self.state.pinch_origin_distance;
        if origin <= 0.0 || !distance.is_finite() {
            return;
        }
        self.state.scale = self.state.pinch_origin_scale.times(distance / origin);
        self.render.schedule();
    }

    /// Double-tap / double-click zoom.
    ///
    /// From the fitted size this zooms to 2x in place; from any other scale it
    /// returns to fitted and recentres.
    pub fn toggle_zoom(&mut self) {
        if self.state.is_fitted() {
            self.state.scale = Scale::new(DOUBLE_TAP_SCALE);
        } else {
            self.state.scale = Scale::FITTED;
            self.state.translate_x = 0.0;
            self.state.translate_y = 0.0;
        }
        self.render.schedule();
    }

    /// Switches between the fitted size and one device pixel per image pixel.
    ///
    /// `rendered` is the letterboxed element size. Returns `false` (and
    /// changes nothing) when zooming in and either size is unknown.
    pub fn toggle_fit(&mut self, natural: Option<Size>, rendered: Size) -> bool {
        if self.state.is_fitted() {
            let Some(natural) = natural.filter(|n| n.is_usable()) else {
                return false;
            };
            if !rendered.is_usable() {
                return false;
            }
            let natural_ratio = natural.aspect_ratio();
            let painted_width = if rendered.aspect_ratio() > natural_ratio {
                rendered.height * natural_ratio
            } else {
                rendered.width
            };
            self.state.scale = Scale::new(natural.width / painted_width);
        } else {
            self.state.scale = Scale::FITTED;
        }
        self.state.translate_x = 0.0;
        self.state.translate_y = 0.0;
        self.render.schedule();
        true
    }

    /// Whether the host should request an animation frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.render.is_pending()
    }

    /// Paints the latest state if a render is pending.
    pub fn on_animation_frame<R>(&mut self, paint: impl FnOnce(&ViewportState) -> R) -> Option<R> {
        let state = &self.state;
        self.render.flush(|| paint(state))
    }

    /// Drops a pending frame (viewer closing).
    pub fn cancel_frame(&mut self) {
        self.render.cancel();
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.render.frames_rendered()
    }
}
