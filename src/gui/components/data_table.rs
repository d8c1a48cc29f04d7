// src/gui/components/data_table.rs
//
// Price table for the current view. Purely a view over `app.view()`.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::Column;
use crate::gui::app::App;

const COL_WIDTHS: [f32; 8] = [90.0, 70.0, 140.0, 90.0, 90.0, 90.0, 110.0, 140.0];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.strong("Price data of selected cryptocurrency");

    let Some(view) = app.view() else {
        match &app.last_error {
            Some(e) => ui.colored_label(ui.visuals().error_fg_color, format!("No data: {e}")),
            None => ui.label("No data loaded yet."),
        };
        return;
    };
    ui.label(view.dimension_text());

    // Ensure scroll bars allocate space (not floating over content)
    ui.style_mut().spacing.scroll.floating = false;

    let mut table = TableBuilder::new(ui)
        .id_salt("price_table")
        .striped(true)
        .max_scroll_height(280.0)
        .cell_layout(Layout::left_to_right(Align::Center));
    for w in COL_WIDTHS {
        table = table.column(TableColumn::initial(w).resizable(true).clip(true).at_least(40.0));
    }

    table
        .header(22.0, |mut header| {
            for col in Column::ALL {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    ui.label(RichText::new(col.name()).strong());
                });
            }
        })
        .body(|body| {
            body.rows(20.0, view.len(), |mut row| {
                let Some(rec) = view.row(row.index()) else { return };
                for col in Column::ALL {
                    row.col(|ui| {
                        let text = rec.cell(col);
                        if col.is_numeric() {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.label(RichText::new(text).monospace());
                            });
                        } else {
                            ui.label(text);
                        }
                    });
                }
            });
        });
}
