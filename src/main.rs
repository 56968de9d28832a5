use eframe::egui;
use portfolio_ranker::app::PortfolioApp;
use portfolio_ranker::config::AppConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio Simulator",
        options,
        Box::new(|_cc| Ok(Box::new(PortfolioApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
