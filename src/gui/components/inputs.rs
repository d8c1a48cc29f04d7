// src/gui/components/inputs.rs
//
// Left input panel: currency, symbol multiselect, top-N, timeframe, sort,
// and the Refresh button. Selection changes are applied directly to `app`.
// The symbol list keeps ctrl/shift range behavior.

use eframe::egui;
use tracing::{debug, info};

use crate::config::consts::{TOP_N_MAX, TOP_N_MIN};
use crate::config::options::{CurrencyUnit, Timeframe};
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Input Options");
    ui.add_space(4.0);

    if ui.button("Refresh").on_hover_text("Fetch the listing again").clicked() {
        actions::refresh(app);
    }
    ui.separator();

    currency(ui, app);
    ui.separator();

    let view = &mut app.state.options.view;

    ui.label("Display Top N Coins");
    let before = view.top_n();
    ui.add(egui::Slider::new(view.top_n_mut(), TOP_N_MIN..=TOP_N_MAX));
    if view.top_n() != before {
        let n = view.top_n();
        view.set_top_n(n);
        debug!(top_n = view.top_n(), "UI: Top N changed");
    }

    ui.add_space(4.0);
    let prev_tf = view.timeframe;
    egui::ComboBox::from_label("Percent change time frame")
        .selected_text(view.timeframe.label())
        .show_ui(ui, |ui| {
            for tf in Timeframe::ALL {
                ui.selectable_value(&mut view.timeframe, tf, tf.label());
            }
        });
    if view.timeframe != prev_tf {
        info!(timeframe = view.timeframe.label(), "UI: Timeframe changed");
    }

    ui.horizontal(|ui| {
        ui.label("Sort values?");
        ui.selectable_value(&mut view.sort_values, true, "Yes");
        ui.selectable_value(&mut view.sort_values, false, "No");
    });

    ui.separator();
    symbol_list(ui, app);
}

fn currency(ui: &mut egui::Ui, app: &mut App) {
    let unit = &mut app.state.options.view.currency;
    let prev = *unit;
    egui::ComboBox::from_label("Currency for price")
        .selected_text(unit.label())
        .show_ui(ui, |ui| {
            for c in CurrencyUnit::ALL {
                ui.selectable_value(unit, c, c.label());
            }
        });
    if *unit != prev {
        info!(currency = unit.label(), "UI: Currency changed");
    }
    if !unit.is_backed() {
        ui.colored_label(
            ui.visuals().warn_fg_color,
            "Only USD quotes are scraped; values are shown in USD.",
        );
    }
}

fn symbol_list(ui: &mut egui::Ui, app: &mut App) {
    ui.strong("Cryptocurrency");

    ui.horizontal(|ui| {
        if ui.button("All").clicked() {
            app.state.gui.selected_symbols = app.symbols.clone();
            app.rebuild_view();
        }
        if ui.button("None").clicked() {
            app.state.gui.selected_symbols.clear();
            app.rebuild_view();
        }
        ui.label(format!("{}/{}", app.state.gui.selected_symbols.len(), app.symbols.len()));
    });

    egui::ScrollArea::vertical()
        .id_salt("symbols_panel_scroll")
        .show(ui, |ui| {
            let w = ui.available_width();
            ui.set_min_width(w);
            let mut changed = false;

            for (idx, sym) in app.symbols.iter().enumerate() {
                let is_selected = app.state.gui.selected_symbols.contains(sym);
                let resp = ui.selectable_label(is_selected, sym.as_str());
                if !resp.clicked() {
                    continue;
                }

                let modifiers = ui.input(|i| i.modifiers);
                let gui = &mut app.state.gui;
                let range = |last: usize| if last <= idx { last..=idx } else { idx..=last };

                match (modifiers.ctrl || modifiers.command, modifiers.shift, gui.last_clicked) {
                    // ctrl+shift: add range
                    (true, true, Some(last)) => {
                        for s in &app.symbols[range(last)] {
                            if !gui.selected_symbols.contains(s) { gui.selected_symbols.push(s.clone()); }
                        }
                    }
                    // ctrl: toggle
                    (true, _, _) => {
                        if is_selected {
                            gui.selected_symbols.retain(|x| x != sym);
                        } else {
                            gui.selected_symbols.push(sym.clone());
                        }
                    }
                    // shift: replace with range
                    (false, true, Some(last)) => {
                        gui.selected_symbols = app.symbols[range(last)].to_vec();
                    }
                    _ => {
                        gui.selected_symbols = vec![sym.clone()];
                    }
                }
                gui.last_clicked = Some(idx);
                changed = true;
            }

            if changed {
                app.rebuild_view();
                debug!(selected = app.state.gui.selected_symbols.len(), "UI: Symbol selection changed");
            }
        });
}
