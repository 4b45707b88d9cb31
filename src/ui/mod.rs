mod app;
mod strip;
mod theme;

pub use app::DayStripApp;
pub use theme::{setup_fonts, setup_theme};
