use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;

use triview_core::config::ClientConfig;
use triview_core::controller::ViewerController;
use triview_core::tile::TileKey;

use crate::convert::{apply_contrast, pixmap_to_color_image};
use crate::messages::{TilePixmap, WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::UIState;
use crate::worker;

const CONFIG_FILE: &str = "triview.toml";

/// A tile texture plus the contrast it was uploaded with, so the texture is
/// only rebuilt when the slider actually moved.
pub struct TileTexture {
    pub handle: egui::TextureHandle,
    pub contrast: f32,
}

pub struct TriviewApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub controller: ViewerController,
    pub ui_state: UIState,
    /// Decoded pixels per tile, kept so contrast changes can re-upload.
    pixmaps: HashMap<TileKey, TilePixmap>,
    textures: HashMap<TileKey, TileTexture>,
    pub show_about: bool,
}

impl TriviewApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let config = ClientConfig::load_or_default(Path::new(CONFIG_FILE));
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone(), config);

        // Session establishment happens up front; everything else waits for
        // the LoggedIn result.
        let _ = cmd_tx.send(WorkerCommand::Login);

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            controller: ViewerController::new(),
            ui_state: UIState::default(),
            pixmaps: HashMap::new(),
            textures: HashMap::new(),
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::LoggedIn => {
                    self.ui_state.logged_in = true;
                }
                WorkerResult::UploadComplete { tiles } => {
                    self.ui_state.upload_in_flight = false;
                    self.adopt_tiles(ctx, tiles);
                    self.ui_state
                        .add_log(format!("{} tiles displayed", self.textures.len()));
                }
                WorkerResult::ShapeReady { shape } => {
                    self.controller.set_shape(shape);
                    self.ui_state.add_log(format!(
                        "Volume shape {}x{}x{}",
                        shape.0[0], shape.0[1], shape.0[2]
                    ));
                }
                WorkerResult::RegenerateComplete { tiles } => {
                    let images = tiles.iter().map(|t| t.tile.clone()).collect();
                    self.controller.finish_regenerate(Ok(images));
                    self.load_textures(ctx, tiles);
                    self.ui_state.add_log("Slices regenerated".into());
                }
                WorkerResult::RegenerateFailed { error } => {
                    // Prior collection, textures and viewport state stay put.
                    self.controller.finish_regenerate(Err(error));
                }
                WorkerResult::ArraySaved { path } => {
                    self.ui_state
                        .add_log(format!("Array saved: {}", path.display()));
                }
                WorkerResult::DicomFolderSelected { path } => {
                    self.ui_state.dicom_dir = Some(path);
                }
                WorkerResult::NiftiFolderSelected { path } => {
                    self.ui_state.nifti_dir = Some(path);
                }
                WorkerResult::LoggedOut => {
                    self.ui_state.logged_in = false;
                    self.controller.clear_collection();
                    self.pixmaps.clear();
                    self.textures.clear();
                    self.ui_state.add_log("Logged out".into());
                }
                WorkerResult::Error { message } => {
                    self.ui_state.upload_in_flight = false;
                    self.ui_state.last_error = Some(message.clone());
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Replace the displayed collection and its textures wholesale.
    fn adopt_tiles(&mut self, ctx: &egui::Context, tiles: Vec<TilePixmap>) {
        let images = tiles.iter().map(|t| t.tile.clone()).collect();
        self.controller.replace_collection(images);
        self.load_textures(ctx, tiles);
    }

    fn load_textures(&mut self, ctx: &egui::Context, tiles: Vec<TilePixmap>) {
        self.pixmaps.clear();
        self.textures.clear();
        for pixmap in tiles {
            let key = pixmap.tile.key();
            let handle = ctx.load_texture(
                key.to_string(),
                pixmap_to_color_image(&pixmap),
                egui::TextureOptions::LINEAR,
            );
            self.textures.insert(
                key.clone(),
                TileTexture {
                    handle,
                    contrast: 1.0,
                },
            );
            self.pixmaps.insert(key, pixmap);
        }
    }

    /// Texture for a tile, re-uploaded when its contrast setting moved.
    pub fn texture_for(
        &mut self,
        ctx: &egui::Context,
        key: &TileKey,
        contrast: f32,
    ) -> Option<&egui::TextureHandle> {
        let texture = self.textures.get_mut(key)?;
        if (texture.contrast - contrast).abs() > f32::EPSILON {
            let pixmap = self.pixmaps.get(key)?;
            let adjusted = TilePixmap {
                tile: pixmap.tile.clone(),
                size: pixmap.size,
                rgba: apply_contrast(&pixmap.rgba, contrast),
            };
            texture.handle = ctx.load_texture(
                key.to_string(),
                pixmap_to_color_image(&adjusted),
                egui::TextureOptions::LINEAR,
            );
            texture.contrast = contrast;
        }
        Some(&texture.handle)
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for TriviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Triview")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Triview");
                        ui.label("Tri-planar DICOM + ROI slice viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
