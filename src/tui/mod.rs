//! Terminal dashboard

pub mod app;
pub mod loader;
pub mod theme;
pub mod widgets;

pub use app::run;
