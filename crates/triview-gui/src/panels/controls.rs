use triview_core::midpoint::Axis;

use crate::app::TriviewApp;
use crate::messages::{WorkerCommand, WorkerResult};

pub fn show(ctx: &egui::Context, app: &mut TriviewApp) {
    egui::SidePanel::left("controls")
        .resizable(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);

            if !app.ui_state.logged_in {
                ui.label("Logging in...");
                return;
            }

            upload_section(ui, app);
            ui.separator();
            midpoint_section(ui, app);
            ui.separator();
            action_section(ui, app);
        });
}

fn upload_section(ui: &mut egui::Ui, app: &mut TriviewApp) {
    ui.strong("Volume");

    if ui.button("Select DICOM folder...").clicked() {
        pick_folder(app, true);
    }
    folder_label(ui, app.ui_state.dicom_dir.as_deref());

    if ui.button("Select ROI folder...").clicked() {
        pick_folder(app, false);
    }
    folder_label(ui, app.ui_state.nifti_dir.as_deref());

    ui.add_space(4.0);

    let can_upload = !app.ui_state.upload_in_flight && !app.controller.is_loading();
    if ui
        .add_enabled(can_upload, egui::Button::new("Upload"))
        .clicked()
    {
        // Validated before anything touches the network.
        if !app.ui_state.has_selection() {
            app.ui_state.last_error = Some("Select a DICOM or ROI folder first".to_string());
            return;
        }
        app.ui_state.last_error = None;
        app.ui_state.upload_in_flight = true;
        app.send_command(WorkerCommand::Upload {
            dicom_dir: app.ui_state.dicom_dir.clone(),
            nifti_dir: app.ui_state.nifti_dir.clone(),
            midpoints: app.controller.midpoints().current_vector(),
        });
    }
}

fn midpoint_section(ui: &mut egui::Ui, app: &mut TriviewApp) {
    ui.strong("Midpoints");

    let Some(shape) = app.controller.midpoints().shape() else {
        ui.add_enabled(false, egui::Label::new("Upload a volume to enable sliders"));
        return;
    };

    for axis in Axis::ALL {
        let max = shape.dim(axis) as i64 - 1;
        let mut value = app.controller.midpoints().midpoint(axis) as i64;
        ui.horizontal(|ui| {
            ui.label(format!("{axis}"));
            if ui
                .add(egui::Slider::new(&mut value, 0..=max).integer())
                .changed()
            {
                // Unreachable while the shape guard above holds.
                if let Err(e) = app.controller.set_axis_midpoint(axis, value) {
                    tracing::debug!("midpoint update rejected: {e}");
                }
            }
        });
    }
}

fn action_section(ui: &mut egui::Ui, app: &mut TriviewApp) {
    let ready = app.controller.has_tiles()
        && app.controller.midpoints().is_initialized()
        && !app.controller.is_loading()
        && !app.ui_state.upload_in_flight;

    if ui
        .add_enabled(ready, egui::Button::new("Regenerate slices"))
        .clicked()
    {
        // begin_regenerate arms the loading flag; a second click while a
        // request is in flight returns None and nothing is sent.
        if let Some(midpoints) = app.controller.begin_regenerate() {
            app.send_command(WorkerCommand::Regenerate { midpoints });
        }
    }

    if app.controller.is_loading() || app.ui_state.upload_in_flight {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Processing, please wait...");
        });
    }
}

fn folder_label(ui: &mut egui::Ui, dir: Option<&std::path::Path>) {
    match dir {
        Some(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ui.small(name);
        }
        None => {
            ui.small("none selected");
        }
    }
}

fn pick_folder(app: &TriviewApp, dicom: bool) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            let result = if dicom {
                WorkerResult::DicomFolderSelected { path }
            } else {
                WorkerResult::NiftiFolderSelected { path }
            };
            let _ = result_tx.send(result);
        }
    });
}
