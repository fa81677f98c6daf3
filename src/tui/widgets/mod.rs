//! TUI widgets

pub mod help;
pub mod product_table;
pub mod spinner;
pub mod trend_modal;
