use std::collections::HashMap;

use crate::tile::TileKey;

pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 2.0;
pub const CONTRAST_MIN: f32 = 0.5;
pub const CONTRAST_MAX: f32 = 2.0;

/// 2-D vector in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Zoom/pan/contrast state of a single tile.
///
/// Invariants held after every mutating call:
/// - `zoom == 1.0` implies `pan == (0, 0)`
/// - `|pan.x| <= max_pan(zoom).x` and `|pan.y| <= max_pan(zoom).y`
#[derive(Clone, Debug)]
pub struct ViewportState {
    zoom: f32,
    pan: Vec2,
    contrast: f32,
    dragging: bool,
    /// Pointer position at the last begin_drag/drag_to call.
    last_pointer: Vec2,
    /// Last measured size of the tile's on-screen container.
    container: Vec2,
    /// Container size frozen for the duration of the current drag session,
    /// so an unrelated resize cannot shift the clamp bounds mid-drag.
    drag_container: Vec2,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            contrast: 1.0,
            dragging: false,
            last_pointer: Vec2::ZERO,
            container: Vec2::ZERO,
            drag_container: Vec2::ZERO,
        }
    }
}

impl ViewportState {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn container(&self) -> Vec2 {
        self.container
    }

    /// Record the tile's measured on-screen size. An active drag session
    /// keeps clamping against the snapshot taken at `begin_drag`; the new
    /// measurement takes effect from the next session.
    pub fn measure(&mut self, size: Vec2) {
        self.container = size;
    }

    /// Largest pan magnitude per axis that keeps the scaled image covering
    /// the container. Zero for an unmeasured container or `zoom <= 1`.
    pub fn max_pan(&self, zoom: f32) -> Vec2 {
        Self::max_pan_for(self.container, zoom)
    }

    fn max_pan_for(container: Vec2, zoom: f32) -> Vec2 {
        Vec2::new(
            ((container.x * zoom - container.x) / 2.0).max(0.0),
            ((container.y * zoom - container.y) / 2.0).max(0.0),
        )
    }

    /// Clamp `value` to the zoom range, then re-clamp pan so the invariants
    /// hold immediately. A resulting zoom of exactly 1 recenters the tile.
    pub fn set_zoom(&mut self, value: f32) {
        self.zoom = value.clamp(ZOOM_MIN, ZOOM_MAX);
        if self.zoom == 1.0 {
            self.pan = Vec2::ZERO;
        } else {
            let limit = self.max_pan(self.zoom);
            self.pan.x = self.pan.x.clamp(-limit.x, limit.x);
            self.pan.y = self.pan.y.clamp(-limit.y, limit.y);
        }
    }

    pub fn set_contrast(&mut self, value: f32) {
        self.contrast = value.clamp(CONTRAST_MIN, CONTRAST_MAX);
    }

    /// Start a drag session at `pointer`. Ignored if a session is already
    /// active.
    pub fn begin_drag(&mut self, pointer: Vec2) {
        if self.dragging {
            return;
        }
        self.dragging = true;
        self.last_pointer = pointer;
        self.drag_container = self.container;
    }

    /// Apply one pointer movement. The screen-space delta is divided by the
    /// zoom factor so the drag tracks the image content at any
    /// magnification, then pan is clamped against the session's container
    /// snapshot. With an unmeasured container only the origin advances.
    pub fn drag_to(&mut self, pointer: Vec2) {
        if !self.dragging {
            return;
        }
        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;

        let limit = Self::max_pan_for(self.drag_container, self.zoom);
        if self.drag_container.x > 0.0 {
            self.pan.x = (self.pan.x + delta.x / self.zoom).clamp(-limit.x, limit.x);
        }
        if self.drag_container.y > 0.0 {
            self.pan.y = (self.pan.y + delta.y / self.zoom).clamp(-limit.y, limit.y);
        }
    }

    /// End the drag session. Idempotent.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }
}

/// The controller-owned table of per-tile viewport state.
///
/// Entries live exactly as long as the image collection they belong to;
/// replacing the collection rebuilds the table from scratch.
#[derive(Debug, Default)]
pub struct ViewportTable {
    states: HashMap<TileKey, ViewportState>,
}

impl ViewportTable {
    /// Discard all state and create a fresh entry per key.
    pub fn reset(&mut self, keys: impl IntoIterator<Item = TileKey>) {
        self.states = keys
            .into_iter()
            .map(|k| (k, ViewportState::default()))
            .collect();
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn get(&self, key: &TileKey) -> Option<&ViewportState> {
        self.states.get(key)
    }

    pub fn get_mut(&mut self, key: &TileKey) -> Option<&mut ViewportState> {
        self.states.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
