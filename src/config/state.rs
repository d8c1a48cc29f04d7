// src/config/state.rs
use super::consts::{WINDOW_H, WINDOW_W};
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Symbols ticked in the left panel
    pub selected_symbols: Vec<String>,

    pub window_w: f32,
    pub window_h: f32,

    /// Anchor for shift-click range selection in the symbol list
    pub last_clicked: Option<usize>,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            selected_symbols: Vec::new(),
            window_w: WINDOW_W,
            window_h: WINDOW_H,
            last_clicked: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
