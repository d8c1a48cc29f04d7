// src/gui/actions/copy.rs
use eframe::egui;
use tracing::{debug, error, info};

use crate::{csv, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let txt = {
        let Some(view) = app.view() else {
            app.status("Nothing to copy (no data loaded)");
            debug!("Copy: Clicked, but there's no table");
            return;
        };
        if view.is_empty() {
            app.status("Nothing to copy");
            debug!("Copy: Clicked, but the view is empty");
            return;
        }

        info!(rows = view.len(), format = ?app.state.options.export.format, "Copy");
        csv::to_export_string(&app.state.options.export, view.records())
    };

    match txt {
        Ok(txt) => {
            ui_ctx.copy_text(txt);
            app.status("Copied to clipboard");
        }
        Err(e) => {
            error!(error = %e, "Copy: Error");
            app.status(format!("Copy error: {e}"));
        }
    }
}
