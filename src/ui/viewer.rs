// SPDX-License-Identifier: MPL-2.0
//! Full-size image viewer session.
//!
//! One [`ViewerSession`] exists while the viewer window is open. It tracks
//! which image of the collection is shown and owns the viewport engine and
//! gesture recognizer for that image. Changing the image always resets the
//! viewport to identity.

use crate::ui::geometry::Size;
use crate::ui::gesture::{Direction, Effect, GestureRecognizer, InputEvent};
use crate::ui::state::{Transform, ViewportEngine};

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

/// What a key press asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Navigate(Direction),
    Close,
}

impl Key {
    #[must_use]
    pub fn action(self) -> Option<KeyAction> {
        match self {
            Key::ArrowLeft => Some(KeyAction::Navigate(Direction::Previous)),
            Key::ArrowRight => Some(KeyAction::Navigate(Direction::Next)),
            Key::Escape => Some(KeyAction::Close),
            Key::Other => None,
        }
    }
}

/// Index reached by moving `offset` steps from `index`, wrapping around.
///
/// Returns `None` for an empty collection.
#[must_use]
pub fn wrap_index(index: usize, offset: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = isize::try_from(len).ok()?;
    let index = isize::try_from(index).ok()?;
    usize::try_from((index + offset).rem_euclid(len)).ok()
}

/// State of the open viewer.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    index: usize,
    engine: ViewportEngine,
    recognizer: GestureRecognizer,
    natural_size: Option<Size>,
}

impl ViewerSession {
    /// Opens the viewer on `index`.
    #[must_use]
    pub fn open(index: usize) -> Self {
        let mut engine = ViewportEngine::new();
        engine.reset();
        Self {
            index,
            engine,
            recognizer: GestureRecognizer::new(),
            natural_size: None,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn engine(&self) -> &ViewportEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ViewportEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.engine.state().transform()
    }

    /// Shows the image at `index` with a fresh viewport.
    pub fn show(&mut self, index: usize) {
        self.index = index;
        self.natural_size = None;
        self.recognizer = GestureRecognizer::new();
        self.engine.reset();
    }

    /// Moves by `offset` images in a collection of `len`, wrapping around.
    ///
    /// Returns the new index, or `None` if the collection is empty.
    pub fn navigate(&mut self, offset: isize, len: usize) -> Option<usize> {
        let next = wrap_index(self.index, offset, len)?;
        self.show(next);
        Some(next)
    }

    /// Feeds one input event through the gesture recognizer.
    pub fn handle_input(&mut self, event: InputEvent) -> Effect {
        self.recognizer.handle(event, &mut self.engine)
    }

    /// Records the decoded size of the shown image.
    pub fn set_natural_size(&mut self, size: Size) {
        self.natural_size = Some(size).filter(|s| s.is_usable());
    }

    #[must_use]
    pub fn natural_size(&self) -> Option<Size> {
        self.natural_size
    }

    /// Fit toggle for the element currently rendered at `rendered`.
    pub fn toggle_fit(&mut self, rendered: Size) -> bool {
        self.engine.toggle_fit(self.natural_size, rendered)
    }

    /// Drops any pending paint; called when the viewer closes.
    pub fn close(&mut self) {
        self.engine.cancel_frame();
    }
}
