mod app;
mod plots;

use app::WorkbenchApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("starting signal workbench");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Signal Workbench"),
        ..Default::default()
    };

    eframe::run_native(
        "signal-workbench",
        options,
        Box::new(|cc| Box::new(WorkbenchApp::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!(e.to_string()))
}
