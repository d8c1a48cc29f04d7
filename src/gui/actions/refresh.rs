// src/gui/actions/refresh.rs
use tracing::{error, info};

use crate::gui::{app::App, progress::GuiProgress};

/// Re-fetch regardless of cache state. On failure the table on screen stays.
pub fn refresh(app: &mut App) {
    let Some(pipeline) = &app.pipeline else {
        app.status("Refresh unavailable: no HTTP client");
        return;
    };

    info!(url = pipeline.url(), "Refresh: Begin");
    let mut prog = GuiProgress::new(app.status.clone());

    match pipeline.refresh(&mut prog) {
        Ok(entry) => {
            info!(rows = entry.row_count(), "Refresh: OK");
            app.install_table(entry);
        }
        Err(e) => {
            error!(error = %e, "Refresh: Error");
            app.last_error = Some(e.to_string());
            let kept = if app.table.is_some() { " (showing previous data)" } else { "" };
            app.status(format!("Error: {e}{kept}"));
        }
    }
}
