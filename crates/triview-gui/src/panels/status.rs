use crate::app::TriviewApp;

pub fn show(ctx: &egui::Context, app: &mut TriviewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Busy indicator — indeterminate, network requests have no progress.
        if app.controller.is_loading() {
            ui.add(egui::ProgressBar::new(0.0).text("Regenerating...").animate(true));
        } else if app.ui_state.upload_in_flight {
            ui.add(egui::ProgressBar::new(0.0).text("Uploading...").animate(true));
        } else {
            // Invisible placeholder — same height, no animation
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Regeneration failures come from the controller, everything else
        // from the UI state.
        let error = app
            .controller
            .error_message()
            .map(str::to_string)
            .or_else(|| app.ui_state.last_error.clone());
        if let Some(error) = error {
            ui.colored_label(egui::Color32::LIGHT_RED, error);
        }

        // Log area — fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.add_space(2.0);
    });
}
