//! Fixed report parameters.
//!
//! The generator has no CLI and reads no settings from the environment: the
//! binary always runs with `ReportConfig::default()`. Tests and benches build
//! their own values.

use std::path::PathBuf;

use crate::report::palette::PaletteOverflow;

pub const INPUT_FILE: &str = "out/results_channel_producer_consumer_montecarlo.csv";
pub const OUTPUT_FILE: &str = "out/channel-producer-consumer-monte-carlo.pdf";

/// Keep in sync with `ChannelProducerConsumerMonteCarloBenchmark.APPROXIMATE_BATCH_SIZE`.
pub const APPROX_BATCH_SIZE: u64 = 100_000;

pub const GRID_COLUMNS: usize = 2;

// 20x15 in at 100 dpi
const FIGURE_WIDTH_PX: u32 = 2000;
const FIGURE_HEIGHT_PX: u32 = 1500;
const LEGEND_BAND_PX: u32 = 140;
const FONT_SIZE_PX: u32 = 21;
const LINE_WIDTH_PX: u32 = 3;
const MARKER_SIZE_PX: i32 = 6;
const LEGEND_COLUMNS: usize = 2;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub approx_batch_size: u64,
    /// Whole page in pixels, legend band included.
    pub figure_size: (u32, u32),
    pub legend_band: u32,
    pub font_size: u32,
    pub line_width: u32,
    pub marker_size: i32,
    pub legend_columns: usize,
    pub palette_overflow: PaletteOverflow,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(INPUT_FILE),
            output_path: PathBuf::from(OUTPUT_FILE),
            approx_batch_size: APPROX_BATCH_SIZE,
            figure_size: (FIGURE_WIDTH_PX, FIGURE_HEIGHT_PX),
            legend_band: LEGEND_BAND_PX,
            font_size: FONT_SIZE_PX,
            line_width: LINE_WIDTH_PX,
            marker_size: MARKER_SIZE_PX,
            legend_columns: LEGEND_COLUMNS,
            palette_overflow: PaletteOverflow::default(),
        }
    }
}

impl ReportConfig {
    /// Same defaults, different input and output files.
    pub fn with_paths(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input.into(),
            output_path: output.into(),
            ..Self::default()
        }
    }

    pub fn y_label(&self) -> String {
        format!("send and receive ~{} msgs time (ms)", self.approx_batch_size)
    }
}
