//! Plot generator for the channel producer/consumer "monte carlo" benchmark.
//!
//! Reads `out/results_channel_producer_consumer_montecarlo.csv` and writes a
//! one-page PDF with one panel per (dispatcher type, balancing) pair and one
//! curve per (channel, select) pair, result time against thread count.

pub mod data;
pub mod report;
pub mod utils;

pub use report::{generate_report, generate_report_with};
pub use utils::{config::ReportConfig, error::ReportError};
