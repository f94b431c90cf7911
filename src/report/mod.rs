//! Report generation: plan the grid, draw it, save it as PDF.

pub mod figure;
pub mod palette;
pub mod pdf;
pub mod render;

use log::info;

use crate::{
    data::{dataset::Dataset, locale::DecimalSeparator},
    report::{figure::Figure, pdf::compose_and_save},
    utils::{config::ReportConfig, error::Result},
};

/// Runs the whole pipeline once and returns the number of panels written.
pub fn generate_report(config: &ReportConfig) -> Result<usize> {
    let decimal = DecimalSeparator::from_env()?;
    generate_report_with(config, decimal)
}

/// Same as [`generate_report`] with an explicit decimal mark instead of the host locale.
pub fn generate_report_with(config: &ReportConfig, decimal: DecimalSeparator) -> Result<usize> {
    let dataset = Dataset::load(&config.input_path, decimal)?;
    let figure = Figure::plan(&dataset, config)?;
    info!(
        "Planned {}x{} grid, {} legend entries",
        figure.rows,
        figure.cols,
        figure.legend_entries().len()
    );
    compose_and_save(&figure, config)?;
    Ok(figure.panels.len())
}
