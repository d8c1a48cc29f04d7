// src/gui/components/export_bar.rs

use eframe::egui;
use tracing::{debug, info};

use crate::{
    config::options::ExportFormat,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    {
        let export = &mut app.state.options.export;

        // --- Format + Include headers ---
        let prev_fmt = export.format;
        ui.horizontal(|ui| {
            ui.label("Format:");
            ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
            ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");

            ui.separator();
            if ui.checkbox(&mut export.include_headers, "Include headers").changed() {
                info!(include_headers = export.include_headers, "UI: Include headers changed");
            }
        });

        if export.format != prev_fmt {
            info!(format = ?export.format, "UI: Export format changed");
            if !app.out_path_dirty {
                app.out_path_text = export.out_path().to_string_lossy().into_owned();
            }
        }
    }

    // --- Output field ---
    ui.horizontal(|ui| {
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text).font(egui::TextStyle::Monospace))
            .changed()
        {
            app.out_path_dirty = true;
            debug!(text = %app.out_path_text, "UI: out_path_text changed (dirty)");
        }
    });

    // --- Actions (Copy / Export) ---
    ui.horizontal(|ui| {
        if ui.button("Copy").clicked() {
            let ctx = ui.ctx().clone();
            actions::copy(app, &ctx);
        }
        if ui.button("Export").clicked() {
            actions::export(app);
        }

        ui.separator();
        ui.label(format!("Status: {}", app.status_text()));
    });
}
