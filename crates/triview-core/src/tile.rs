use serde::{Deserialize, Serialize};
use tracing::debug;

/// One slice image as delivered by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTile {
    /// Anatomical plane (sagittal, coronal, axial).
    pub view: String,
    /// Image category within the view (base scan, ROI overlay, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl ImageTile {
    pub fn new(
        view: impl Into<String>,
        kind: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            view: view.into(),
            kind: kind.into(),
            url: url.into(),
        }
    }

    pub fn key(&self) -> TileKey {
        TileKey {
            view: self.view.clone(),
            kind: self.kind.clone(),
        }
    }
}

/// Compound identity of a tile within a collection.
///
/// Used instead of a concatenated `view-kind` string so separator characters
/// appearing in the data can never collide two distinct tiles.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    pub view: String,
    pub kind: String,
}

impl TileKey {
    pub fn new(view: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            kind: kind.into(),
        }
    }
}

impl std::fmt::Display for TileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.view, self.kind)
    }
}

/// Tiles of one anatomical plane, in first-seen kind order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewGroup {
    pub view: String,
    /// (kind, url) pairs.
    pub entries: Vec<(String, String)>,
}

/// Nested view -> kind -> url mapping derived from a flat tile collection.
///
/// Grouping is pure and order-stable: views appear in first-seen order, kinds
/// within a view in first-seen order. A later tile with an already-present
/// (view, kind) pair silently replaces the earlier url.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileGrid {
    views: Vec<ViewGroup>,
}

impl TileGrid {
    pub fn group(tiles: &[ImageTile]) -> Self {
        let mut views: Vec<ViewGroup> = Vec::new();

        for tile in tiles {
            let view_idx = match views.iter().position(|g| g.view == tile.view) {
                Some(i) => i,
                None => {
                    views.push(ViewGroup {
                        view: tile.view.clone(),
                        entries: Vec::new(),
                    });
                    views.len() - 1
                }
            };
            let group = &mut views[view_idx];

            match group.entries.iter().position(|(k, _)| *k == tile.kind) {
                Some(i) => {
                    debug!(
                        view = %tile.view,
                        kind = %tile.kind,
                        "duplicate tile key, keeping later url"
                    );
                    group.entries[i].1 = tile.url.clone();
                }
                None => group.entries.push((tile.kind.clone(), tile.url.clone())),
            }
        }

        Self { views }
    }

    pub fn views(&self) -> &[ViewGroup] {
        &self.views
    }

    pub fn url(&self, key: &TileKey) -> Option<&str> {
        self.views
            .iter()
            .find(|g| g.view == key.view)
            .and_then(|g| g.entries.iter().find(|(k, _)| *k == key.kind))
            .map(|(_, url)| url.as_str())
    }

    /// All tile keys in display order.
    pub fn keys(&self) -> Vec<TileKey> {
        self.views
            .iter()
            .flat_map(|g| {
                g.entries
                    .iter()
                    .map(|(kind, _)| TileKey::new(g.view.clone(), kind.clone()))
            })
            .collect()
    }

    pub fn tile_count(&self) -> usize {
        self.views.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
