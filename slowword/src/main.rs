//! SlowWord - A minimal word processor for the Slow Computer
//!
//! Pick a font and size, type, drop in one picture, save as PDF.

mod app;
mod document;
mod export;
mod prefs;
mod preview;

use app::SlowWordApp;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("slowWord starting");

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([800.0, 600.0])
        .with_title("slowWord");

    if let Some(pos) = slowcore::cascade_position() {
        viewport = viewport.with_position(pos);
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "slowWord",
        options,
        Box::new(|cc| {
            slowcore::SlowTheme::default().apply(&cc.egui_ctx);
            Box::new(SlowWordApp::new(cc))
        }),
    )
}
