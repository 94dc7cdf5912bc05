use clap::Parser;
use eframe::egui;

use prelims_browser::app::PrelimsApp;
use prelims_browser::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();
    let config = AppConfig::parse();
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Prelims Question Bank",
        options,
        Box::new(|cc| Ok(Box::new(PrelimsApp::new(cc, config)))),
    )
}
