use triview_core::midpoint::VolumeShape;
use triview_core::tile::ImageTile;

#[test]
fn test_tile_deserializes_type_field() {
    let json = r#"{"view": "Axial", "type": "ROI", "url": "/static/axial_roi.png"}"#;
    let tile: ImageTile = serde_json::from_str(json).unwrap();
    assert_eq!(tile.view, "Axial");
    assert_eq!(tile.kind, "ROI");
    assert_eq!(tile.url, "/static/axial_roi.png");
}

#[test]
fn test_tile_serializes_back_to_type() {
    let tile = ImageTile::new("Sagittal", "CT", "u");
    let json = serde_json::to_string(&tile).unwrap();
    assert!(json.contains("\"type\":\"CT\""));
    assert!(!json.contains("kind"));
}

#[test]
fn test_images_payload_order_preserved() {
    let json = r#"[
        {"view": "Axial", "type": "CT", "url": "u1"},
        {"view": "Axial", "type": "ROI", "url": "u2"},
        {"view": "Sagittal", "type": "CT", "url": "u3"}
    ]"#;
    let tiles: Vec<ImageTile> = serde_json::from_str(json).unwrap();
    assert_eq!(tiles.len(), 3);
    assert_eq!(tiles[0].url, "u1");
    assert_eq!(tiles[2].view, "Sagittal");
}

#[test]
fn test_shape_payload_round_trip() {
    let dims: Vec<usize> = serde_json::from_str("[100, 120, 80]").unwrap();
    let shape = VolumeShape::from_dims(&dims).unwrap();
    assert_eq!(shape.0, [100, 120, 80]);
}
