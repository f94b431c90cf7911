//! Draws a planned `Figure` with plotters.
//!
//! The page is a legend band on top of a `rows x 2` grid. Everything is drawn on
//! an SVG backend; `pdf` turns the document into the final page.

use log::debug;
use plotters::{coord::Shift, prelude::*};

use crate::{
    report::figure::{Curve, Figure, Panel},
    utils::{
        config::ReportConfig,
        error::{ReportError, Result},
    },
};

const FONT_FAMILY: &str = "sans-serif";
const GRID_COLOUR: RGBColor = RGBColor(0xD3, 0xD3, 0xD3);
const PAGE_PADDING: u32 = 20;
const LEGEND_SAMPLE_PX: i32 = 48;

/// Renders the whole page and returns the SVG document.
pub fn render_svg(figure: &Figure, config: &ReportConfig) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, config.figure_size).into_drawing_area();
        root.fill(&WHITE).map_err(ReportError::render)?;

        let (legend_area, grid_area) = root.split_vertically(config.legend_band);
        let grid_area = grid_area.margin(0, PAGE_PADDING, PAGE_PADDING, PAGE_PADDING);
        let cells = grid_area.split_evenly((figure.rows, figure.cols));

        for (cell, panel) in cells.iter().zip(&figure.panels) {
            render_panel(cell, panel, figure, config)?;
        }
        draw_legend(&legend_area, figure.legend_entries(), config)?;

        root.present().map_err(ReportError::render)?;
    }
    debug!("rendered {} panels into {} bytes of SVG", figure.panels.len(), svg.len());
    Ok(svg)
}

/// Draws one grid cell: log2 thread axis with the dataset-wide ticks, then one
/// line plus markers per non-empty curve.
pub fn render_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    figure: &Figure,
    config: &ReportConfig,
) -> Result<()> {
    let font = config.font_size;
    let ticks: Vec<f64> = figure.x_ticks.iter().map(|&t| f64::from(t)).collect();
    let (y_lo, y_hi) = y_axis_range(panel);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(font / 2)
        .x_label_area_size(font * 3)
        .y_label_area_size(font * 5);
    if let Some(key) = &panel.key {
        builder.caption(key.title(), (FONT_FAMILY, font));
    }

    let mut chart = builder
        .build_cartesian_2d(
            x_axis_range(figure)
                .log_scale()
                .base(2.0)
                .with_key_points(ticks),
            y_lo..y_hi,
        )
        .map_err(ReportError::render)?;

    chart
        .configure_mesh()
        .x_desc("threads")
        .y_desc(config.y_label())
        .x_label_formatter(&|x: &f64| format!("{:.0}", x))
        .bold_line_style(GRID_COLOUR.stroke_width(1))
        .light_line_style(TRANSPARENT.stroke_width(0))
        .label_style((FONT_FAMILY, font))
        .axis_desc_style((FONT_FAMILY, font))
        .draw()
        .map_err(ReportError::render)?;

    for curve in panel.curves.iter().filter(|c| !c.points.is_empty()) {
        let colour = curve.style.colour;
        chart
            .draw_series(LineSeries::new(
                curve.points.iter().map(|&(t, r)| (f64::from(t), r)),
                colour.stroke_width(config.line_width),
            ))
            .map_err(ReportError::render)?;

        let plot = chart.plotting_area();
        for &(t, r) in &curve.points {
            plot.draw(&curve.style.marker.element::<DB, _>(
                (f64::from(t), r),
                config.marker_size,
                colour,
            ))
            .map_err(ReportError::render)?;
        }
    }

    Ok(())
}

/// Shared legend centred in the band, filled column by column.
pub fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[Curve],
    config: &ReportConfig,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let font = config.font_size as i32;
    let columns = config.legend_columns.max(1);
    let rows = entries.len().div_ceil(columns);
    let (width, height) = area.dim_in_pixel();

    let column_width = (width as i32 / columns as i32).min(font * 30);
    let row_height = font * 3 / 2;
    let left = (width as i32 - column_width * columns as i32) / 2;
    let top = (height as i32 - row_height * rows as i32).max(0) / 2;
    let text_style = TextStyle::from((FONT_FAMILY, config.font_size)).color(&BLACK);

    for (i, curve) in entries.iter().enumerate() {
        let x = left + (i / rows) as i32 * column_width;
        let y = top + (i % rows) as i32 * row_height + row_height / 2;
        let colour = curve.style.colour;

        area.draw(&PathElement::new(
            vec![(x, y), (x + LEGEND_SAMPLE_PX, y)],
            colour.stroke_width(config.line_width),
        ))
        .map_err(ReportError::render)?;
        area.draw(&curve.style.marker.element::<DB, _>(
            (x + LEGEND_SAMPLE_PX / 2, y),
            config.marker_size,
            colour,
        ))
        .map_err(ReportError::render)?;
        area.draw(&Text::new(
            curve.label(),
            (x + LEGEND_SAMPLE_PX + font / 2, y - font / 2),
            text_style.clone(),
        ))
        .map_err(ReportError::render)?;
    }

    Ok(())
}

/// Thread range padded by a factor of 1.25 on each side so end markers stay visible.
fn x_axis_range(figure: &Figure) -> std::ops::Range<f64> {
    let (lo, hi) = figure.thread_range();
    let lo = f64::from(lo.max(1));
    let hi = f64::from(hi.max(1));
    (lo / 1.25)..(hi * 1.25)
}

fn y_axis_range(panel: &Panel) -> (f64, f64) {
    match panel.result_range() {
        None => (0.0, 1.0),
        Some((lo, hi)) => {
            let span = (hi - lo).max(hi.abs() * 0.1).max(1e-6);
            (lo - span * 0.05, hi + span * 0.05)
        }
    }
}
