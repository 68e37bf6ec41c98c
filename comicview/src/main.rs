//! comicView — a comic folder viewer with per-folder reading progress

mod app;
mod gesture;
mod library;
mod loader;
mod pages;
mod progress;
mod session;

use app::ComicViewApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let initial_folder = args.get(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 800.0])
            .with_title("comicView"),
        ..Default::default()
    };

    eframe::run_native(
        "comicView",
        options,
        Box::new(|cc| Box::new(ComicViewApp::new(cc, initial_folder))),
    )
}
