use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use triview_core::client::ApiClient;
use triview_core::config::ClientConfig;
use triview_core::midpoint::MidpointVector;

use crate::convert::fetch_tile_pixmaps;
use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the network worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    config: ClientConfig,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("triview-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, config);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    config: ClientConfig,
) {
    let client = ApiClient::from_config(&config);

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Login => {
                handle_login(&client, &config, &tx, &ctx);
            }
            WorkerCommand::Upload {
                dicom_dir,
                nifti_dir,
                midpoints,
            } => {
                handle_upload(
                    &client,
                    dicom_dir.as_deref(),
                    nifti_dir.as_deref(),
                    midpoints,
                    &tx,
                    &ctx,
                );
            }
            WorkerCommand::Regenerate { midpoints } => {
                handle_regenerate(&client, midpoints, &tx, &ctx);
            }
            WorkerCommand::DownloadArray { dir } => {
                handle_download_array(&client, &dir, &tx, &ctx);
            }
            WorkerCommand::Logout => match client.logout() {
                Ok(()) => send(&tx, &ctx, WorkerResult::LoggedOut),
                Err(e) => send_error(&tx, &ctx, format!("Logout failed: {e}")),
            },
        }
    }
}

fn handle_login(
    client: &ApiClient,
    config: &ClientConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match client.login(&config.username, &config.password) {
        Ok(()) => {
            send_log(tx, ctx, format!("Logged in to {}", client.base_url()));
            send(tx, ctx, WorkerResult::LoggedIn);
        }
        Err(e) => send_error(tx, ctx, format!("Login failed: {e}")),
    }
}

fn handle_upload(
    client: &ApiClient,
    dicom_dir: Option<&Path>,
    nifti_dir: Option<&Path>,
    midpoints: Option<MidpointVector>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let dicom_files = dicom_dir.map(list_files).unwrap_or_default();
    let nifti_files = nifti_dir.map(list_files).unwrap_or_default();
    send_log(
        tx,
        ctx,
        format!(
            "Uploading {} DICOM and {} ROI files...",
            dicom_files.len(),
            nifti_files.len()
        ),
    );

    let images = match client.upload(&dicom_files, &nifti_files, midpoints) {
        Ok(images) => images,
        Err(e) => {
            send_error(tx, ctx, format!("Upload failed: {e}"));
            return;
        }
    };

    match fetch_tile_pixmaps(client, &images) {
        Ok(tiles) => {
            send_log(tx, ctx, format!("Received {} slice images", tiles.len()));
            send(tx, ctx, WorkerResult::UploadComplete { tiles });
        }
        Err(e) => {
            send_error(tx, ctx, format!("Failed to fetch slice images: {e}"));
            return;
        }
    }

    // Midpoint controls stay disabled until this succeeds.
    match client.volume_shape() {
        Ok(shape) => send(tx, ctx, WorkerResult::ShapeReady { shape }),
        Err(e) => send_error(tx, ctx, format!("Volume shape unavailable: {e}")),
    }
}

fn handle_regenerate(
    client: &ApiClient,
    midpoints: MidpointVector,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    send_log(
        tx,
        ctx,
        format!(
            "Regenerating at midpoints {},{},{}...",
            midpoints[0], midpoints[1], midpoints[2]
        ),
    );

    let result = client
        .regenerate(midpoints)
        .and_then(|images| fetch_tile_pixmaps(client, &images));

    match result {
        Ok(tiles) => send(tx, ctx, WorkerResult::RegenerateComplete { tiles }),
        Err(e) => send(tx, ctx, WorkerResult::RegenerateFailed { error: e }),
    }
}

fn handle_download_array(
    client: &ApiClient,
    dir: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match client.download_array(dir) {
        Ok(path) => send(tx, ctx, WorkerResult::ArraySaved { path }),
        Err(e) => send_error(tx, ctx, format!("Array download failed: {e}")),
    }
}

/// Regular files directly inside `dir`, sorted by name. The server rebuilds
/// series order itself, sorting just keeps uploads deterministic.
fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}
