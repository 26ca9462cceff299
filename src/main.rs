mod app;
mod convert;
mod utils;

use app::RawBatchApp;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

fn main() {
    init_logging();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([760.0, 680.0])
            .with_min_inner_size([520.0, 480.0]),
        ..Default::default()
    };

    if let Err(err) = eframe::run_native(
        "RAW to JPEG Converter",
        options,
        Box::new(|cc| Box::new(RawBatchApp::new(cc))),
    ) {
        log::error!("ui terminated with error: {err}");
    }
}
