use triview_core::tile::{ImageTile, TileGrid, TileKey};

fn tiles() -> Vec<ImageTile> {
    vec![
        ImageTile::new("Axial", "CT", "u1"),
        ImageTile::new("Axial", "ROI", "u2"),
        ImageTile::new("Sagittal", "CT", "u3"),
    ]
}

#[test]
fn test_group_by_view_then_kind() {
    let grid = TileGrid::group(&tiles());

    assert_eq!(grid.views().len(), 2);
    assert_eq!(grid.views()[0].view, "Axial");
    assert_eq!(
        grid.views()[0].entries,
        vec![
            ("CT".to_string(), "u1".to_string()),
            ("ROI".to_string(), "u2".to_string()),
        ]
    );
    assert_eq!(grid.views()[1].view, "Sagittal");
    assert_eq!(
        grid.views()[1].entries,
        vec![("CT".to_string(), "u3".to_string())]
    );
}

#[test]
fn test_grouping_is_pure_and_order_stable() {
    let input = tiles();
    let first = TileGrid::group(&input);
    let second = TileGrid::group(&input);
    assert_eq!(first, second);
}

#[test]
fn test_first_seen_order_preserved() {
    let input = vec![
        ImageTile::new("Coronal", "ROI", "a"),
        ImageTile::new("Axial", "CT", "b"),
        ImageTile::new("Coronal", "CT", "c"),
    ];
    let grid = TileGrid::group(&input);
    assert_eq!(grid.views()[0].view, "Coronal");
    assert_eq!(grid.views()[1].view, "Axial");
    // Within Coronal, ROI was seen before CT.
    assert_eq!(grid.views()[0].entries[0].0, "ROI");
    assert_eq!(grid.views()[0].entries[1].0, "CT");
}

#[test]
fn test_duplicate_key_last_write_wins() {
    let input = vec![
        ImageTile::new("Axial", "CT", "old"),
        ImageTile::new("Axial", "ROI", "roi"),
        ImageTile::new("Axial", "CT", "new"),
    ];
    let grid = TileGrid::group(&input);
    assert_eq!(grid.tile_count(), 2);
    assert_eq!(grid.url(&TileKey::new("Axial", "CT")), Some("new"));
    // Overwriting does not reorder: CT keeps its first-seen position.
    assert_eq!(grid.views()[0].entries[0].0, "CT");
}

#[test]
fn test_compound_key_immune_to_separator_collisions() {
    let input = vec![
        ImageTile::new("a-b", "c", "u1"),
        ImageTile::new("a", "b-c", "u2"),
    ];
    let grid = TileGrid::group(&input);
    assert_eq!(grid.tile_count(), 2);
    assert_eq!(grid.url(&TileKey::new("a-b", "c")), Some("u1"));
    assert_eq!(grid.url(&TileKey::new("a", "b-c")), Some("u2"));
}

#[test]
fn test_empty_collection() {
    let grid = TileGrid::group(&[]);
    assert!(grid.is_empty());
    assert_eq!(grid.tile_count(), 0);
    assert!(grid.keys().is_empty());
}

#[test]
fn test_keys_in_display_order() {
    let grid = TileGrid::group(&tiles());
    assert_eq!(
        grid.keys(),
        vec![
            TileKey::new("Axial", "CT"),
            TileKey::new("Axial", "ROI"),
            TileKey::new("Sagittal", "CT"),
        ]
    );
}
