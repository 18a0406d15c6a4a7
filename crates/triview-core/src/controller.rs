use tracing::debug;

use crate::drag::DragController;
use crate::error::Result;
use crate::midpoint::{Axis, MidpointCoordinator, MidpointVector, VolumeShape};
use crate::tile::{ImageTile, TileGrid, TileKey};
use crate::viewport::{Vec2, ViewportState, ViewportTable};

/// Owner of everything derived from the currently displayed image
/// collection: the grouped tile grid, the per-tile viewport table, the
/// active drag sessions, the midpoint vector and the regeneration
/// backpressure flag.
///
/// One instance per viewer session; nothing here is ambient module state,
/// so independent instances (and tests) cannot interfere.
#[derive(Debug, Default)]
pub struct ViewerController {
    images: Vec<ImageTile>,
    grid: TileGrid,
    viewports: ViewportTable,
    drag: DragController,
    midpoints: MidpointCoordinator,
    loading: bool,
    error: Option<String>,
}

impl ViewerController {
    pub fn new() -> Self {
        Self::default()
    }

    // -- image collection -------------------------------------------------

    /// Adopt a new collection wholesale. All per-tile viewport state and
    /// drag sessions derived from the previous collection are discarded.
    pub fn replace_collection(&mut self, tiles: Vec<ImageTile>) {
        self.grid = TileGrid::group(&tiles);
        self.viewports.reset(self.grid.keys());
        self.drag.clear();
        self.images = tiles;
        debug!(tiles = self.images.len(), "image collection replaced");
    }

    pub fn clear_collection(&mut self) {
        self.replace_collection(Vec::new());
    }

    pub fn images(&self) -> &[ImageTile] {
        &self.images
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn has_tiles(&self) -> bool {
        !self.grid.is_empty()
    }

    // -- viewport + drag --------------------------------------------------

    pub fn viewport(&self, key: &TileKey) -> Option<&ViewportState> {
        self.viewports.get(key)
    }

    pub fn viewport_mut(&mut self, key: &TileKey) -> Option<&mut ViewportState> {
        self.viewports.get_mut(key)
    }

    pub fn measure_tile(&mut self, key: &TileKey, size: Vec2) {
        if let Some(state) = self.viewports.get_mut(key) {
            state.measure(size);
        }
    }

    pub fn begin_tile_drag(&mut self, key: &TileKey, pointer: Vec2) {
        self.drag.begin(key, pointer, &mut self.viewports);
    }

    pub fn pointer_moved(&mut self, pointer: Vec2) {
        self.drag.pointer_moved(pointer, &mut self.viewports);
    }

    pub fn pointer_released(&mut self) {
        self.drag.pointer_released(&mut self.viewports);
    }

    pub fn drag_active(&self) -> bool {
        self.drag.is_active()
    }

    // -- midpoints --------------------------------------------------------

    pub fn midpoints(&self) -> &MidpointCoordinator {
        &self.midpoints
    }

    pub fn set_shape(&mut self, shape: VolumeShape) {
        self.midpoints.initialize(shape);
    }

    pub fn set_axis_midpoint(&mut self, axis: Axis, value: i64) -> Result<usize> {
        self.midpoints.update_axis(axis, value)
    }

    // -- regeneration boundary --------------------------------------------

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Arm a regeneration request. Returns the midpoint snapshot to send,
    /// or `None` when a request is already in flight (re-entrant triggers
    /// are ignored, never queued) or no shape is known yet.
    pub fn begin_regenerate(&mut self) -> Option<MidpointVector> {
        if self.loading {
            debug!("regenerate ignored, request already in flight");
            return None;
        }
        let vector = self.midpoints.current_vector()?;
        self.loading = true;
        self.error = None;
        Some(vector)
    }

    /// Complete the in-flight regeneration. Success replaces the collection
    /// and reinitializes all viewport state; failure records one user-facing
    /// message and leaves the collection and viewport table untouched. The
    /// loading flag clears on both paths.
    pub fn finish_regenerate(&mut self, result: Result<Vec<ImageTile>>) {
        self.loading = false;
        match result {
            Ok(tiles) => self.replace_collection(tiles),
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
