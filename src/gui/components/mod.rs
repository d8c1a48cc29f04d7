// src/gui/components/mod.rs
pub mod bar_chart;
pub mod change_table;
pub mod data_table;
pub mod export_bar;
pub mod inputs;
