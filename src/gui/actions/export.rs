// src/gui/actions/export.rs
use tracing::{debug, error, info};

use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        info!(path = %app.state.options.export.out_path().display(), "Export: Out path set");
        app.out_path_dirty = false;
    }

    let status_msg = match app.view() {
        None => {
            debug!("Export: Clicked, but there's no table");
            "Nothing to export (no data loaded)".to_string()
        }
        Some(view) if view.is_empty() => {
            debug!("Export: Clicked, but the view is empty");
            "Nothing to export".to_string()
        }
        Some(view) => {
            let export = &app.state.options.export;
            info!(rows = view.len(), format = ?export.format, headers = export.include_headers, "Export: Begin");

            match file::write_export(export, view.records()) {
                Ok(path) => format!("Exported {} rows to {}", view.len(), path.display()),
                Err(e) => {
                    error!(error = %e, "Export: Error");
                    format!("Export error: {e}")
                }
            }
        }
    };

    // mutate app only after the view borrows are gone
    app.status(status_msg);
}
