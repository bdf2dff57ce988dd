// SPDX-License-Identifier: MPL-2.0
//! Floating window geometry: placement, stacking and the sidebar splitter.

use crate::config::{
    BASE_Z_INDEX, DEFAULT_SIDEBAR_WIDTH, GALLERY_DEFAULT_HEIGHT, GALLERY_DEFAULT_WIDTH,
    GALLERY_MIN_HEIGHT, GALLERY_MIN_WIDTH, MIN_PERSISTED_DIMENSION, SIDEBAR_MAX_WIDTH,
    SIDEBAR_MIN_WIDTH, VIEWER_DEFAULT_HEIGHT, VIEWER_DEFAULT_WIDTH, VIEWER_MIN_HEIGHT,
    VIEWER_MIN_WIDTH,
};
use crate::ui::geometry::Size;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// The two floating windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    Gallery,
    Viewer,
}

impl WindowKind {
    #[must_use]
    pub fn default_size(self) -> Size {
        match self {
            WindowKind::Gallery => Size::new(GALLERY_DEFAULT_WIDTH, GALLERY_DEFAULT_HEIGHT),
            WindowKind::Viewer => Size::new(VIEWER_DEFAULT_WIDTH, VIEWER_DEFAULT_HEIGHT),
        }
    }

    /// Smallest size the user can resize the window to.
    #[must_use]
    pub fn min_size(self) -> Size {
        match self {
            WindowKind::Gallery => Size::new(GALLERY_MIN_WIDTH, GALLERY_MIN_HEIGHT),
            WindowKind::Viewer => Size::new(VIEWER_MIN_WIDTH, VIEWER_MIN_HEIGHT),
        }
    }
}

/// Window position and size in screen units.
///
/// Missing or `null` fields in stored JSON read as 0, which the placement
/// rules then replace with defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub top: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub left: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height: f64,
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl Rect {
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the rect lies entirely within `screen`.
    #[must_use]
    pub fn fits_within(&self, screen: Size) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.left + self.width <= screen.width
            && self.top + self.height <= screen.height
    }
}

/// Places a window so it is fully visible on `screen`.
///
/// Without a stored rect the default size is centred. Stored sizes that are
/// missing, non-finite or under the persisted floor fall back to the
/// defaults; everything is then clamped into the screen.
#[must_use]
pub fn ensure_on_screen(
    rect: Option<Rect>,
    default_width: f64,
    default_height: f64,
    screen: Size,
) -> Rect {
    let screen = Size::new(finite_or_zero(screen.width), finite_or_zero(screen.height));

    let Some(rect) = rect else {
        return clamp_to_screen(
            Rect::new(
                (screen.height - default_height) / 2.0,
                (screen.width - default_width) / 2.0,
                default_width,
                default_height,
            ),
            screen,
        );
    };

    let width = if usable_dimension(rect.width) {
        rect.width
    } else {
        default_width
    };
    let height = if usable_dimension(rect.height) {
        rect.height
    } else {
        default_height
    };

    clamp_to_screen(
        Rect::new(
            finite_or_zero(rect.top),
            finite_or_zero(rect.left),
            width,
            height,
        ),
        screen,
    )
}

fn usable_dimension(value: f64) -> bool {
    value.is_finite() && value >= MIN_PERSISTED_DIMENSION
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn clamp_to_screen(rect: Rect, screen: Size) -> Rect {
    let width = rect.width.min(screen.width).max(0.0);
    let height = rect.height.min(screen.height).max(0.0);
    let left = rect.left.max(0.0).min(screen.width - width).max(0.0);
    let top = rect.top.max(0.0).min(screen.height - height).max(0.0);
    Rect::new(top, left, width, height)
}

/// Applies the window's minimum size to a user resize.
#[must_use]
pub fn constrain_resize(kind: WindowKind, rect: Rect) -> Rect {
    let min = kind.min_size();
    Rect {
        width: rect.width.max(min.width),
        height: rect.height.max(min.height),
        ..rect
    }
}

/// Z-order of the floating windows.
///
/// Each call to [`Stacking::bring_to_front`] hands out a higher z-index than
/// any before it.
#[derive(Debug, Clone)]
pub struct Stacking {
    max_z: u32,
    z_indices: HashMap<WindowKind, u32>,
}

impl Default for Stacking {
    fn default() -> Self {
        Self {
            max_z: BASE_Z_INDEX,
            z_indices: HashMap::new(),
        }
    }
}

impl Stacking {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises `kind` above every other window and returns its z-index.
    pub fn bring_to_front(&mut self, kind: WindowKind) -> u32 {
        self.max_z = self.max_z.saturating_add(1);
        self.z_indices.insert(kind, self.max_z);
        self.max_z
    }

    #[must_use]
    pub fn z_index(&self, kind: WindowKind) -> Option<u32> {
        self.z_indices.get(&kind).copied()
    }

    /// The window currently on top, if any has been raised.
    #[must_use]
    pub fn front(&self) -> Option<WindowKind> {
        self.z_indices
            .iter()
            .max_by_key(|(_, z)| **z)
            .map(|(kind, _)| *kind)
    }

    pub fn remove(&mut self, kind: WindowKind) {
        self.z_indices.remove(&kind);
    }
}

/// Folder sidebar width, adjusted by dragging the splitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sidebar {
    width: f64,
    drag: Option<(f64, f64)>,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIDEBAR_WIDTH,
            drag: None,
        }
    }
}

impl Sidebar {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Starts a splitter drag at pointer `x`.
    pub fn begin_resize(&mut self, x: f64) {
        self.drag = Some((x, self.width));
    }

    /// Follows the pointer. Widths outside the open (min, max) range are
    /// rejected and the previous width is kept.
    pub fn resize_to(&mut self, x: f64) -> bool {
        let Some((start_x, start_width)) = self.drag else {
            return false;
        };
        let width = start_width + (x - start_x);
        if width > SIDEBAR_MIN_WIDTH && width < SIDEBAR_MAX_WIDTH {
            self.width = width;
            true
        } else {
            false
        }
    }

    pub fn end_resize(&mut self) {
        self.drag = None;
    }
}
