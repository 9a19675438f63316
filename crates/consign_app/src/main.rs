mod app;
mod effects;
mod logging;
mod ui;

use app::ConsignApp;

fn main() -> anyhow::Result<()> {
    logging::initialize();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Consign",
        options,
        Box::new(|cc| Box::new(ConsignApp::new(cc))),
    )
    .map_err(|err| anyhow::anyhow!("failed to start ui: {err}"))
}
