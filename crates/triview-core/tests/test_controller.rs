use triview_core::controller::ViewerController;
use triview_core::error::TriviewError;
use triview_core::midpoint::{Axis, VolumeShape};
use triview_core::tile::{ImageTile, TileKey};
use triview_core::viewport::Vec2;

fn tiles() -> Vec<ImageTile> {
    vec![
        ImageTile::new("Axial", "CT", "u1"),
        ImageTile::new("Axial", "ROI", "u2"),
        ImageTile::new("Sagittal", "CT", "u3"),
    ]
}

fn ready_controller() -> ViewerController {
    let mut c = ViewerController::new();
    c.replace_collection(tiles());
    c.set_shape(VolumeShape::from_dims(&[100, 120, 80]).unwrap());
    c
}

#[test]
fn test_replace_collection_builds_viewport_table() {
    let c = ready_controller();
    assert!(c.has_tiles());
    assert!(c.viewport(&TileKey::new("Axial", "CT")).is_some());
    assert!(c.viewport(&TileKey::new("Axial", "ROI")).is_some());
    assert!(c.viewport(&TileKey::new("Sagittal", "CT")).is_some());
    assert!(c.viewport(&TileKey::new("Coronal", "CT")).is_none());
}

#[test]
fn test_replace_collection_discards_viewport_state() {
    let mut c = ready_controller();
    let key = TileKey::new("Axial", "CT");
    c.measure_tile(&key, Vec2::new(200.0, 200.0));
    c.viewport_mut(&key).unwrap().set_zoom(2.0);

    c.replace_collection(tiles());
    assert_eq!(c.viewport(&key).unwrap().zoom(), 1.0);
}

#[test]
fn test_begin_regenerate_requires_shape() {
    let mut c = ViewerController::new();
    c.replace_collection(tiles());
    assert_eq!(c.begin_regenerate(), None);
    assert!(!c.is_loading());
}

#[test]
fn test_begin_regenerate_snapshots_midpoints() {
    let mut c = ready_controller();
    c.set_axis_midpoint(Axis::Coronal, 10).unwrap();
    assert_eq!(c.begin_regenerate(), Some([50, 10, 40]));
    assert!(c.is_loading());
}

#[test]
fn test_second_trigger_while_loading_is_noop() {
    let mut c = ready_controller();
    assert!(c.begin_regenerate().is_some());
    // Back-to-back trigger: ignored, not queued.
    assert_eq!(c.begin_regenerate(), None);
    assert!(c.is_loading());
}

#[test]
fn test_trigger_allowed_again_after_completion() {
    let mut c = ready_controller();
    c.begin_regenerate().unwrap();
    c.finish_regenerate(Ok(tiles()));
    assert!(c.begin_regenerate().is_some());
}

#[test]
fn test_regenerate_success_replaces_collection() {
    let mut c = ready_controller();
    let key = TileKey::new("Axial", "CT");
    c.measure_tile(&key, Vec2::new(200.0, 200.0));
    c.viewport_mut(&key).unwrap().set_zoom(1.5);

    c.begin_regenerate().unwrap();
    c.finish_regenerate(Ok(vec![
        ImageTile::new("Axial", "CT", "u1-v2"),
        ImageTile::new("Coronal", "CT", "u4"),
    ]));

    assert!(!c.is_loading());
    assert_eq!(c.error_message(), None);
    assert_eq!(c.grid().url(&key), Some("u1-v2"));
    // Fresh viewport state for the new collection.
    assert_eq!(c.viewport(&key).unwrap().zoom(), 1.0);
    assert!(c.viewport(&TileKey::new("Sagittal", "CT")).is_none());
}

#[test]
fn test_regenerate_failure_leaves_state_untouched() {
    let mut c = ready_controller();
    let key = TileKey::new("Axial", "CT");
    c.measure_tile(&key, Vec2::new(200.0, 200.0));
    c.viewport_mut(&key).unwrap().set_zoom(1.5);

    c.begin_regenerate().unwrap();
    c.finish_regenerate(Err(TriviewError::Network("connection reset".to_string())));

    assert!(!c.is_loading());
    assert_eq!(c.images(), &tiles()[..]);
    assert_eq!(c.viewport(&key).unwrap().zoom(), 1.5);
    // Exactly one user-facing message.
    assert_eq!(c.error_message(), Some("network error: connection reset"));
}

#[test]
fn test_new_attempt_clears_previous_error() {
    let mut c = ready_controller();
    c.begin_regenerate().unwrap();
    c.finish_regenerate(Err(TriviewError::Network("boom".to_string())));
    assert!(c.error_message().is_some());

    c.begin_regenerate().unwrap();
    assert_eq!(c.error_message(), None);
}

#[test]
fn test_drag_dispatch_routes_to_active_tile_only() {
    let mut c = ready_controller();
    let dragged = TileKey::new("Axial", "CT");
    let other = TileKey::new("Sagittal", "CT");
    c.measure_tile(&dragged, Vec2::new(200.0, 200.0));
    c.measure_tile(&other, Vec2::new(200.0, 200.0));
    c.viewport_mut(&dragged).unwrap().set_zoom(2.0);
    c.viewport_mut(&other).unwrap().set_zoom(2.0);

    c.begin_tile_drag(&dragged, Vec2::ZERO);
    assert!(c.drag_active());
    c.pointer_moved(Vec2::new(10.0, 0.0));
    c.pointer_released();

    assert!(!c.drag_active());
    assert_eq!(c.viewport(&dragged).unwrap().pan().x, 5.0);
    assert_eq!(c.viewport(&other).unwrap().pan(), Vec2::ZERO);
}

#[test]
fn test_pointer_moves_dispatch_one_update_each() {
    let mut c = ready_controller();
    let key = TileKey::new("Axial", "CT");
    c.measure_tile(&key, Vec2::new(200.0, 200.0));
    c.viewport_mut(&key).unwrap().set_zoom(2.0);

    c.begin_tile_drag(&key, Vec2::ZERO);
    // Out past the 100-unit bound, then back. Each move must reach the
    // viewport state on its own for the clamp to eat the overshoot.
    c.pointer_moved(Vec2::new(300.0, 0.0));
    c.pointer_moved(Vec2::new(200.0, 0.0));
    c.pointer_released();

    assert_eq!(c.viewport(&key).unwrap().pan().x, 50.0);
}

#[test]
fn test_drag_on_unknown_key_ignored() {
    let mut c = ready_controller();
    c.begin_tile_drag(&TileKey::new("Coronal", "CT"), Vec2::ZERO);
    assert!(!c.drag_active());
}

#[test]
fn test_clear_collection_drops_sessions() {
    let mut c = ready_controller();
    let key = TileKey::new("Axial", "CT");
    c.measure_tile(&key, Vec2::new(200.0, 200.0));
    c.begin_tile_drag(&key, Vec2::ZERO);
    assert!(c.drag_active());

    c.clear_collection();
    assert!(!c.has_tiles());
    assert!(!c.drag_active());
}
