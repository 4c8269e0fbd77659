#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod effects;

use std::path::Path;

use capture_logging::LogDestination;

fn main() -> eframe::Result<()> {
    capture_logging::initialize(LogDestination::File, Path::new("./capture.log"));

    let mut settings = capture_engine::CaptureSettings::default();
    if let Ok(url) = std::env::var("WEBDRIVER_URL") {
        settings.webdriver_url = url;
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([520.0, 460.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Chat Image Capture",
        options,
        Box::new(move |_cc| Ok(Box::new(app::CaptureApp::new(settings)))),
    )
}
