use crate::app::TriviewApp;
use crate::messages::WorkerCommand;

pub fn show(ctx: &egui::Context, app: &mut TriviewApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add_enabled(
                        app.controller.has_tiles(),
                        egui::Button::new("Download Array..."),
                    )
                    .clicked()
                {
                    ui.close();
                    pick_download_dir(app);
                }

                ui.separator();

                if ui
                    .add_enabled(app.ui_state.logged_in, egui::Button::new("Logout"))
                    .clicked()
                {
                    ui.close();
                    app.send_command(WorkerCommand::Logout);
                }

                let quit_shortcut =
                    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        if ctx.input_mut(|i| {
            i.consume_shortcut(&egui::KeyboardShortcut::new(
                egui::Modifiers::COMMAND,
                egui::Key::Q,
            ))
        }) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn pick_download_dir(app: &TriviewApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            let _ = cmd_tx.send(WorkerCommand::DownloadArray { dir });
        }
    });
}
