#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use phase_timeline::app::TimelineApp;
use phase_timeline::config::AppSettings;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = AppSettings::default_path();
    let settings = AppSettings::load(&settings_path);
    log::info!("Settings from {}", settings_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Phase Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Phase Timeline",
        options,
        Box::new(move |cc| Ok(Box::new(TimelineApp::new(cc, settings, settings_path)))),
    )
}
