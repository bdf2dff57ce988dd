// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag interaction state for panning the viewer image.

use crate::ui::geometry::Point;

/// Manages grab-and-drag state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    /// Pointer position minus the translation at the moment the drag began.
    origin: Option<Point>,
}

impl DragState {
    /// Starts (or re-anchors) a drag at `pointer` with the current translation.
    pub fn start(&mut self, pointer: Point, translate: Point) {
        self.origin = Some(Point::new(pointer.x - translate.x, pointer.y - translate.y));
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.origin = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    /// Translation that keeps the grabbed point under `pointer`.
    #[must_use]
    pub fn translate_for(&self, pointer: Point) -> Option<Point> {
        let origin = self.origin?;
        Some(Point::new(pointer.x - origin.x, pointer.y - origin.y))
    }
}
