// src/gui/components/change_table.rs
use eframe::egui::{self, Align, Color32, Layout, RichText};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::gui::app::App;
use crate::view;

const HEADERS: [&str; 7] = [
    "coin_symbol",
    "percent_change_1h",
    "percent_change_24h",
    "percent_change_7d",
    "positive_percent_change_1h",
    "positive_percent_change_24h",
    "positive_percent_change_7d",
];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.strong("Table of % price change");

    let Some(v) = app.view() else { return };
    let rows = view::change_rows(&v);
    let max_h = ui.available_height().max(120.0);

    TableBuilder::new(ui)
        .id_salt("change_table")
        .striped(true)
        .max_scroll_height(max_h)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(TableColumn::auto().resizable(true).at_least(60.0), HEADERS.len())
        .header(22.0, |mut header| {
            for h in HEADERS {
                header.col(|ui| { ui.label(RichText::new(h).strong()); });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| { ui.label(r.symbol.as_str()); });
                for pct in [r.pct_1h, r.pct_24h, r.pct_7d] {
                    row.col(|ui| { ui.label(RichText::new(format!("{pct:.2}")).monospace()); });
                }
                for flag in [r.positive_1h, r.positive_24h, r.positive_7d] {
                    row.col(|ui| {
                        let color = if flag { Color32::from_rgb(0x2E, 0xA0, 0x43) } else { Color32::from_rgb(0xD7, 0x3A, 0x49) };
                        ui.label(RichText::new(flag.to_string()).color(color));
                    });
                }
            });
        });
}
