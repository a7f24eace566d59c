mod app;
mod ui;

use app::DrugRatioApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 400.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Drug Ratio Viewer",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can decode the rendered PNG.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DrugRatioApp::default()))
        }),
    )
}
