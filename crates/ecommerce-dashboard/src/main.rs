mod bootstrap;
mod report;

use anyhow::{Context, Result};
use dashboard_core::error::DashboardError;
use dashboard_core::settings::Settings;
use dashboard_data::compute;
use dashboard_runtime::{CsvDatasetSource, DatasetCache};
use dashboard_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(
        &settings.log_level,
        settings.log_file.as_deref(),
        !settings.is_report(),
    )?;

    tracing::info!("E-Commerce Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, View: {}, Theme: {}, Top: {}",
        settings.data_path.display(),
        settings.view,
        settings.theme,
        settings.top
    );

    let cache = DatasetCache::new(CsvDatasetSource::new(&settings.data_path));
    let dataset = cache
        .get()
        .with_context(|| format!("loading transactions from {}", settings.data_path.display()))?;

    let bounds = dataset
        .date_bounds()
        .ok_or_else(|| DashboardError::EmptyDataset(settings.data_path.display().to_string()))?;
    let range = settings.resolve_range(bounds)?;

    if settings.is_report() {
        let snapshot = compute(&dataset, &range, settings.top_k());
        let rendered = if settings.wants_json() {
            report::render_json(&snapshot).map_err(DashboardError::from)?
        } else {
            report::render_text(&snapshot)
        };
        println!("{rendered}");
        return Ok(());
    }

    tracing::info!("Starting interactive dashboard for {}", range);
    let app = App::new(&settings.theme, dataset, range, settings.top_k());

    app.run()
        .await
        .map_err(|e| DashboardError::Terminal(e.to_string()))?;

    Ok(())
}
