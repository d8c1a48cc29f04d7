// src/lib.rs

pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod specs;

pub mod csv;
pub mod file;
pub mod gui;
pub mod log;
pub mod progress;
pub mod scrape;
pub mod store;
pub mod view;

#[cfg(feature = "cli")]
pub mod cli;
