// SPDX-License-Identifier: MPL-2.0
//! Gesture recognition for the image viewer.
//!
//! Raw pointer, touch and wheel events go in; viewport mutations and
//! navigation intents come out. The recognizer is a small state machine:
//!
//! - `Idle` → `Dragging` on a primary pointer down or a single touch
//! - `Dragging` → `Pinching` when a second finger lands
//! - back to `Idle` when the last pointer or finger is released
//!
//! A touch drag that ends unzoomed with more than [`SWIPE_THRESHOLD`] units of
//! horizontal travel becomes a swipe: positive travel goes to the previous
//! image, negative to the next. Events that start on a navigation control are
//! left to the control and ignored here.

use crate::config::{DOUBLE_TAP_DELAY_MS, SWIPE_THRESHOLD};
use crate::ui::geometry::Point;
use crate::ui::state::{DragState, ViewportEngine};
use std::time::{Duration, Instant};

const DOUBLE_TAP_DELAY: Duration = Duration::from_millis(DOUBLE_TAP_DELAY_MS);

/// What the pointer was over when an interaction began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitTarget {
    #[default]
    Image,
    /// Previous/next buttons and other viewer controls.
    NavigationControl,
}

/// Low-level input delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Point, target: HitTarget },
    PointerMove { position: Point },
    PointerUp,
    DoubleClick { target: HitTarget },
    /// `touches` lists every finger currently down.
    TouchStart {
        touches: Vec<Point>,
        target: HitTarget,
        at: Instant,
    },
    TouchMove { touches: Vec<Point> },
    /// `remaining` lists the fingers still down after the release.
    TouchEnd { remaining: Vec<Point> },
    Wheel { delta_y: f64 },
}

/// Navigation direction relative to the current image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    #[must_use]
    pub fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Effects produced by gesture handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// A swipe completed; the viewer should show another image.
    Navigate(Direction),
}

/// Observable recognizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging,
    Pinching,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Idle,
    MouseDrag(DragState),
    TouchDrag(DragState),
    Pinching,
}

/// Turns input streams into viewport changes for one open viewer.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    mode: Mode,
    last_tap: Option<Instant>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self {
            mode: Mode::Idle,
            last_tap: None,
        }
    }
}

impl GestureRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        match self.mode {
            Mode::Idle => GestureState::Idle,
            Mode::MouseDrag(_) | Mode::TouchDrag(_) => GestureState::Dragging,
            Mode::Pinching => GestureState::Pinching,
        }
    }

    /// Handles one input event.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, event: InputEvent, engine: &mut ViewportEngine) -> Effect {
        match event {
            InputEvent::PointerDown { position, target } => {
                if target == HitTarget::Image {
                    self.start_drag(position, engine, false);
                }
                Effect::None
            }
            InputEvent::PointerMove { position } => {
                if let Mode::MouseDrag(drag) = self.mode {
                    if let Some(t) = drag.translate_for(position) {
                        engine.set_translate(t.x, t.y);
                    }
                }
                Effect::None
            }
            InputEvent::PointerUp => {
                if matches!(self.mode, Mode::MouseDrag(_)) {
                    self.end_interaction(engine);
                }
                Effect::None
            }
            InputEvent::DoubleClick { target } => {
                if target == HitTarget::Image {
                    engine.toggle_zoom();
                    self.end_interaction(engine);
                }
                Effect::None
            }
            InputEvent::TouchStart {
                touches,
                target,
                at,
            } => {
                if target == HitTarget::Image {
                    self.touch_start(&touches, at, engine);
                }
                Effect::None
            }
            InputEvent::TouchMove { touches } => {
                self.touch_move(&touches, engine);
                Effect::None
            }
            InputEvent::TouchEnd { remaining } => self.touch_end(&remaining, engine),
            InputEvent::Wheel { delta_y } => {
                engine.wheel(delta_y);
                Effect::None
            }
        }
    }

    fn start_drag(&mut self, position: Point, engine: &mut ViewportEngine, touch: bool) {
        let mut drag = DragState::default();
        drag.start(position, engine.state().translate());
        self.mode = if touch {
            Mode::TouchDrag(drag)
        } else {
            Mode::MouseDrag(drag)
        };
        engine.set_dragging(true);
    }

    fn end_interaction(&mut self, engine: &mut ViewportEngine) {
        self.mode = Mode::Idle;
        engine.set_dragging(false);
    }

    fn touch_start(&mut self, touches: &[Point], at: Instant, engine: &mut ViewportEngine) {
        match touches {
            [single] => {
                let is_double_tap = self.last_tap.is_some_and(|last| {
                    let gap = at.saturating_duration_since(last);
                    gap > Duration::ZERO && gap < DOUBLE_TAP_DELAY
                });

                if is_double_tap {
                    // Reset so a third tap does not toggle again.
                    self.last_tap = None;
                    engine.toggle_zoom();
                    self.end_interaction(engine);
                    return;
                }

                self.last_tap = Some(at);
                self.start_drag(*single, engine, true);
            }
            [first, second] => {
                self.mode = Mode::Pinching;
                engine.begin_pinch(first.distance(*second));
            }
            _ => {}
        }
    }

    fn touch_move(&mut self, touches: &[Point], engine: &mut ViewportEngine) {
        match (self.mode, touches) {
            (Mode::TouchDrag(drag), [single]) => {
                if let Some(t) = drag.translate_for(*single) {
                    // Unzoomed single-finger drags only move horizontally.
                    let y = if engine.state().is_unzoomed() { 0.0 } else { t.y };
                    engine.set_translate(t.x, y);
                }
            }
            (Mode::Pinching, [first, second]) => {
                engine.pinch_to(first.distance(*second));
            }
            _ => {}
        }
    }

    fn touch_end(&mut self, remaining: &[Point], engine: &mut ViewportEngine) -> Effect {
        match remaining {
            [] => {
                let was_active = self.mode != Mode::Idle;
                self.end_interaction(engine);
                if !was_active || !engine.state().is_unzoomed() {
                    return Effect::None;
                }

                let travel = engine.state().translate_x();
                let effect = if travel > SWIPE_THRESHOLD {
                    Effect::Navigate(Direction::Previous)
                } else if travel < -SWIPE_THRESHOLD {
                    Effect::Navigate(Direction::Next)
                } else {
                    Effect::None
                };
                engine.set_translate(0.0, engine.state().translate_y());
                effect
            }
            [single] => {
                // Lifting one finger of a pinch re-anchors a drag on the other.
                self.start_drag(*single, engine, true);
                Effect::None
            }
            [first, second] => {
                self.mode = Mode::Pinching;
                engine.begin_pinch(first.distance(*second));
                Effect::None
            }
            _ => Effect::None,
        }
    }
}
