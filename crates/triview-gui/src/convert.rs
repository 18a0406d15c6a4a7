use rayon::prelude::*;

use triview_core::client::ApiClient;
use triview_core::error::{Result, TriviewError};
use triview_core::tile::ImageTile;

use crate::messages::TilePixmap;

/// Fetch and decode every tile of a collection, in parallel.
pub fn fetch_tile_pixmaps(client: &ApiClient, tiles: &[ImageTile]) -> Result<Vec<TilePixmap>> {
    tiles
        .par_iter()
        .map(|tile| {
            let bytes = client.fetch_image(&tile.url)?;
            decode_tile(tile.clone(), &bytes)
        })
        .collect()
}

/// Decode PNG (or any supported) image bytes into RGBA8 pixels.
pub fn decode_tile(tile: ImageTile, bytes: &[u8]) -> Result<TilePixmap> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| TriviewError::Decode(format!("{}: {e}", tile.key())))?
        .into_rgba8();
    let (w, h) = decoded.dimensions();
    Ok(TilePixmap {
        tile,
        size: [w as usize, h as usize],
        rgba: decoded.into_raw(),
    })
}

/// Convert a decoded pixmap to an egui image for texture upload.
pub fn pixmap_to_color_image(pixmap: &TilePixmap) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(pixmap.size, &pixmap.rgba)
}

/// Scale pixel values around mid-gray. Alpha is untouched.
pub fn apply_contrast(rgba: &[u8], contrast: f32) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| {
            let adjust = |v: u8| ((v as f32 - 128.0) * contrast + 128.0).clamp(0.0, 255.0) as u8;
            [adjust(px[0]), adjust(px[1]), adjust(px[2]), px[3]]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::apply_contrast;

    #[test]
    fn contrast_one_is_identity() {
        let rgba = [10u8, 128, 250, 255];
        assert_eq!(apply_contrast(&rgba, 1.0), rgba.to_vec());
    }

    #[test]
    fn contrast_spreads_around_mid_gray() {
        let rgba = [64u8, 128, 192, 200];
        let out = apply_contrast(&rgba, 2.0);
        assert_eq!(out, vec![0, 128, 255, 200]);
    }
}
