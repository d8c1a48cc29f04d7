// src/gui/progress.rs
use std::sync::{Arc, Mutex, PoisonError};

use crate::progress::{Progress, Stage};

/// Writes load progress into the shared status line.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    url: String,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, url: String::new() }
    }

    fn set_status(&self, msg: impl Into<String>) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = msg.into();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, url: &str) {
        self.url = url.to_string();
        self.set_status(format!("Loading {url}"));
    }
    fn stage(&mut self, stage: Stage) {
        self.set_status(format!("{}…", stage.label()));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(msg);
    }
    fn finish(&mut self, rows: Option<usize>) {
        match rows {
            Some(n) => self.set_status(format!("Loaded {n} coins from {}", self.url)),
            None => self.set_status("Load failed"),
        }
    }
}
