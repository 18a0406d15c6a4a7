use crate::tile::TileKey;
use crate::viewport::{Vec2, ViewportTable};

/// Viewport-wide pointer tracking.
///
/// A drag that starts over one tile keeps tracking after the pointer leaves
/// that tile's bounds, so movement and release are observed at the scope of
/// the whole viewport and dispatched here to every tile with an active
/// session. The GUI layer attaches its input subscription only while
/// `is_active` can become true (at least one tile exists) and detaches it
/// when the collection empties or the viewport goes away.
#[derive(Debug, Default)]
pub struct DragController {
    /// Keys with an active drag session, in start order.
    dragging: Vec<TileKey>,
}

impl DragController {
    /// Start a session for `key` at `pointer`. A key that is already
    /// dragging, or has no viewport entry, is left untouched.
    pub fn begin(&mut self, key: &TileKey, pointer: Vec2, table: &mut ViewportTable) {
        let Some(state) = table.get_mut(key) else {
            return;
        };
        if state.is_dragging() {
            return;
        }
        state.begin_drag(pointer);
        self.dragging.push(key.clone());
    }

    /// Apply one pointer-move event: exactly one `drag_to` per dragging
    /// tile, in session start order.
    pub fn pointer_moved(&mut self, pointer: Vec2, table: &mut ViewportTable) {
        for key in &self.dragging {
            if let Some(state) = table.get_mut(key) {
                state.drag_to(pointer);
            }
        }
    }

    /// End every active session.
    pub fn pointer_released(&mut self, table: &mut ViewportTable) {
        for key in self.dragging.drain(..) {
            if let Some(state) = table.get_mut(&key) {
                state.end_drag();
            }
        }
    }

    /// Drop all sessions without touching viewport state. Used when the
    /// table itself is being rebuilt.
    pub fn clear(&mut self) {
        self.dragging.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.dragging.is_empty()
    }
}
