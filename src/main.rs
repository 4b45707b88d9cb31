#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod config;
mod schedule;
mod timeline;
mod ui;

use eframe::egui;

use config::Settings;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load_or_default();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([settings.window_width, settings.window_height])
        .with_min_inner_size([300.0, 100.0])
        .with_always_on_top()
        .with_decorations(false)
        .with_title("Daystrip");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Daystrip",
        options,
        Box::new(|cc| Ok(Box::new(ui::DayStripApp::new(cc, settings)))),
    )
}
