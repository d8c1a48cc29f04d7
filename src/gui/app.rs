// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex, PoisonError},
};

use eframe::egui;
use tracing::{error, info};

use crate::{
    config::{
        consts::{SOURCE_URL, TOP_N_MAX},
        options::SymbolFilter,
        state::AppState,
    },
    scrape::Pipeline,
    store::CachedTable,
    view::{self, CoinView},
};

use super::{components, progress::GuiProgress};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Crypto Price App",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // `None` only if the HTTP client could not be built
    pub pipeline: Option<Pipeline>,

    // last good table; survives failed refreshes
    pub table: Option<Arc<CachedTable>>,
    pub symbols: Vec<String>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    pub status: Arc<Mutex<String>>,
    pub last_error: Option<String>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let out_path_text = state.options.export.out_path().to_string_lossy().into();

        let (pipeline, status) = match Pipeline::from_options(&state.options.source) {
            Ok(p) => (Some(p), "Idle".to_string()),
            Err(e) => {
                error!(error = %e, "Init: HTTP client unavailable");
                (None, format!("Error: {e}"))
            }
        };

        let mut app = Self {
            state,
            pipeline,
            table: None,
            symbols: Vec::new(),
            out_path_text,
            out_path_dirty: false,
            status: Arc::new(Mutex::new(status)),
            last_error: None,
        };

        info!(url = %app.state.options.source.url, "Init: initial load");
        app.initial_load();
        app
    }

    /// Test/offline constructor: no network, table supplied directly.
    pub fn with_table(state: AppState, table: Arc<CachedTable>) -> Self {
        let out_path_text = state.options.export.out_path().to_string_lossy().into();
        let mut app = Self {
            state,
            pipeline: None,
            table: None,
            symbols: Vec::new(),
            out_path_text,
            out_path_dirty: false,
            status: Arc::new(Mutex::new("Ready".to_string())),
            last_error: None,
        };
        app.install_table(table);
        app
    }

    fn initial_load(&mut self) {
        let Some(pipeline) = &self.pipeline else { return };
        let mut prog = GuiProgress::new(self.status.clone());
        match pipeline.load(&mut prog) {
            Ok(entry) => self.install_table(entry),
            Err(e) => {
                error!(error = %e, "Init: initial load failed");
                self.last_error = Some(e.to_string());
                self.status(format!("Error: {e}"));
            }
        }
    }

    /// Swap in a new table. A narrowed selection keeps the symbols the new
    /// table still has; otherwise everything is selected.
    pub fn install_table(&mut self, entry: Arc<CachedTable>) {
        let keep_all = self.table.is_none() || self.state.options.view.symbols == SymbolFilter::All;
        self.symbols = view::sorted_symbols(&entry.table);
        if keep_all {
            self.state.gui.selected_symbols = self.symbols.clone();
        } else {
            let symbols = &self.symbols;
            self.state.gui.selected_symbols.retain(|s| symbols.contains(s));
        }
        self.state.gui.last_clicked = None;
        self.table = Some(entry);
        self.last_error = None;
        self.rebuild_view();
    }

    /// Mirror GUI selection → options.view.symbols
    pub fn rebuild_view(&mut self) {
        let sel = &self.state.gui.selected_symbols;
        self.state.options.view.symbols = if !self.symbols.is_empty() && sel.len() == self.symbols.len() {
            SymbolFilter::All
        } else {
            let mut v = sel.clone();
            v.sort_unstable();
            v.dedup();
            SymbolFilter::Only(v)
        };
        let top_n = self.state.options.view.top_n();
        self.state.options.view.set_top_n(top_n);
    }

    /// Current filtered view, if a table is loaded.
    pub fn view(&self) -> Option<CoinView<'_>> {
        self.table.as_ref().map(|t| CoinView::new(&t.table, &self.state.options.view))
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = msg.into();
    }

    pub fn status_text(&self) -> String {
        self.status.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

pub fn about_text() -> String {
    format!(
        "Retrieves prices for the top {TOP_N_MAX} cryptocurrencies listed on CoinMarketCap. \
         Quotes are in USD."
    )
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("inputs")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                components::inputs::draw(ui, self);
            });

        egui::SidePanel::right("chart")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                components::bar_chart::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Crypto Price App");
            ui.label(about_text());
            ui.hyperlink_to("Data source: CoinMarketCap", SOURCE_URL);
            ui.separator();

            components::data_table::draw(ui, self);

            ui.separator();

            components::export_bar::draw(ui, self);

            ui.separator();

            components::change_table::draw(ui, self);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CoinRecord, CoinTable};
    use crate::store::CacheKey;
    use chrono::Utc;

    fn entry(symbols: &[&str]) -> Arc<CachedTable> {
        let records = symbols
            .iter()
            .map(|s| CoinRecord {
                coin_name: s.to_lowercase(),
                coin_symbol: s.to_string(),
                market_cap: 0.0,
                percent_change_1h: 0.0,
                percent_change_24h: 0.0,
                percent_change_7d: 0.0,
                price: 0.0,
                volume_24h: 0.0,
            })
            .collect();
        Arc::new(CachedTable {
            key: CacheKey { url: "https://x.test/".into(), bucket: 0 },
            table: CoinTable::from_records(records),
            fetched_at: Utc::now(),
        })
    }

    #[test]
    fn new_table_selects_every_symbol() {
        let app = App::with_table(AppState::default(), entry(&["ETH", "BTC", "ETH"]));
        assert_eq!(app.symbols, ["BTC", "ETH"]);
        assert_eq!(app.state.options.view.symbols, SymbolFilter::All);
        assert_eq!(app.view().map(|v| v.len()), Some(3));
    }

    #[test]
    fn partial_selection_filters_the_view() {
        let mut app = App::with_table(AppState::default(), entry(&["BTC", "ETH", "SOL"]));
        app.state.gui.selected_symbols = vec!["SOL".into(), "BTC".into()];
        app.rebuild_view();

        assert_eq!(
            app.state.options.view.symbols,
            SymbolFilter::Only(vec!["BTC".into(), "SOL".into()])
        );
        let view = app.view().unwrap();
        let shown: Vec<&str> = view.records().map(|r| r.coin_symbol.as_str()).collect();
        assert_eq!(shown, ["BTC", "SOL"]);
    }

    #[test]
    fn refresh_keeps_a_narrowed_selection() {
        let mut app = App::with_table(AppState::default(), entry(&["BTC", "ETH", "SOL"]));
        app.state.gui.selected_symbols = vec!["SOL".into(), "ETH".into()];
        app.rebuild_view();

        app.install_table(entry(&["BTC", "SOL", "ADA"]));
        assert_eq!(app.state.gui.selected_symbols, ["SOL"]);
        assert_eq!(app.state.options.view.symbols, SymbolFilter::Only(vec!["SOL".into()]));
    }

    #[test]
    fn refresh_with_everything_selected_picks_up_new_symbols() {
        let mut app = App::with_table(AppState::default(), entry(&["BTC", "ETH"]));
        app.install_table(entry(&["BTC", "ETH", "ADA"]));
        assert_eq!(app.state.gui.selected_symbols, ["ADA", "BTC", "ETH"]);
        assert_eq!(app.state.options.view.symbols, SymbolFilter::All);
    }

    #[test]
    fn about_names_source_and_scope() {
        let text = about_text();
        assert!(text.contains("CoinMarketCap"));
        assert!(text.contains("top 100"));
    }
}
