// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use coin_scrape::config::consts::{WINDOW_H, WINDOW_W};
use coin_scrape::{gui, log};
use eframe::egui::ViewportBuilder;

fn main() {
    if let Err(e) = log::init(log::LogTarget::default_file()) {
        eprintln!("Logging disabled: {e}");
    }

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Crypto Price App")
            .with_inner_size([WINDOW_W, WINDOW_H]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        eprintln!("GUI failed: {e}");
        std::process::exit(1);
    }
}
