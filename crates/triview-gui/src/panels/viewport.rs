use triview_core::tile::TileKey;
use triview_core::viewport::{Vec2, CONTRAST_MAX, CONTRAST_MIN, ZOOM_MAX, ZOOM_MIN};

use crate::app::TriviewApp;

const TILE_SIZE: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut TriviewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if !app.controller.has_tiles() {
            show_placeholder(ui, app);
            return;
        }

        // Pointer tracking happens at viewport scope, not per tile: a drag
        // that starts over one tile keeps following the pointer anywhere in
        // the window. Subscribed only while tiles exist.
        track_pointer(ctx, app);

        let groups = app.controller.grid().views().to_vec();
        egui::ScrollArea::both().show(ui, |ui| {
            for group in &groups {
                ui.heading(&group.view);
                ui.horizontal_wrapped(|ui| {
                    for (kind, _) in &group.entries {
                        let key = TileKey::new(group.view.clone(), kind.clone());
                        show_tile(ui, app, &key, kind);
                    }
                });
                ui.add_space(12.0);
            }
        });
    });
}

fn track_pointer(ctx: &egui::Context, app: &mut TriviewApp) {
    if !app.controller.drag_active() {
        return;
    }
    // Each pointer event goes to the controller individually, in arrival
    // order. The pan math is stateful and clamp-dependent, so collapsing
    // the frame's moves into one delta would change the result whenever a
    // bound is hit mid-frame.
    let events = ctx.input(|i| i.events.clone());
    for event in &events {
        match event {
            egui::Event::PointerMoved(pos) => {
                app.controller.pointer_moved(Vec2::new(pos.x, pos.y));
            }
            egui::Event::PointerButton {
                button: egui::PointerButton::Primary,
                pressed: false,
                ..
            }
            | egui::Event::PointerGone => {
                app.controller.pointer_released();
            }
            _ => {}
        }
    }
}

fn show_tile(ui: &mut egui::Ui, app: &mut TriviewApp, key: &TileKey, kind: &str) {
    ui.vertical(|ui| {
        ui.label(kind);

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(TILE_SIZE, TILE_SIZE), egui::Sense::click_and_drag());
        app.controller
            .measure_tile(key, Vec2::new(rect.width(), rect.height()));

        handle_zoom(ui, &response, app, key);

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                app.controller
                    .begin_tile_drag(key, Vec2::new(pos.x, pos.y));
            }
        }

        if response.double_clicked() {
            if let Some(state) = app.controller.viewport_mut(key) {
                state.set_zoom(1.0);
            }
        }

        draw_tile(ui, app, key, rect);
        tile_sliders(ui, app, key);
    });
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut TriviewApp, key: &TileKey) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    if let Some(state) = app.controller.viewport_mut(key) {
        let zoom_factor = (scroll_delta * 0.005).exp();
        state.set_zoom(state.zoom() * zoom_factor);
    }
}

fn draw_tile(ui: &mut egui::Ui, app: &mut TriviewApp, key: &TileKey, rect: egui::Rect) {
    let painter = ui.painter().with_clip_rect(rect);
    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(30));

    let Some(state) = app.controller.viewport(key) else {
        return;
    };
    let zoom = state.zoom();
    let pan = state.pan();
    let contrast = state.contrast();

    let Some(texture) = app.texture_for(ui.ctx(), key, contrast) else {
        return;
    };

    let scaled = rect.size() * zoom;
    let center = rect.center() + egui::vec2(pan.x, pan.y);
    let img_rect = egui::Rect::from_center_size(center, scaled);
    painter.image(
        texture.id(),
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn tile_sliders(ui: &mut egui::Ui, app: &mut TriviewApp, key: &TileKey) {
    let Some(state) = app.controller.viewport(key) else {
        return;
    };
    let mut zoom = state.zoom();
    let mut contrast = state.contrast();

    ui.horizontal(|ui| {
        ui.label("Zoom");
        if ui
            .add(egui::Slider::new(&mut zoom, ZOOM_MIN..=ZOOM_MAX).fixed_decimals(1))
            .changed()
        {
            if let Some(state) = app.controller.viewport_mut(key) {
                state.set_zoom(zoom);
            }
        }
    });
    ui.horizontal(|ui| {
        ui.label("Contrast");
        if ui
            .add(egui::Slider::new(&mut contrast, CONTRAST_MIN..=CONTRAST_MAX).fixed_decimals(1))
            .changed()
        {
            if let Some(state) = app.controller.viewport_mut(key) {
                state.set_contrast(contrast);
            }
        }
    });
}

fn show_placeholder(ui: &mut egui::Ui, app: &TriviewApp) {
    let text = if !app.ui_state.logged_in {
        "Connecting to server..."
    } else if app.ui_state.upload_in_flight {
        "Uploading volume..."
    } else {
        "Upload a DICOM series to begin"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
