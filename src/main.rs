//! # Channel producer/consumer plot generator
//!
//! Turns the monte carlo producer/consumer benchmark results into a PDF chart.
//!
//! ## Input
//! - `out/results_channel_producer_consumer_montecarlo.csv` with columns
//!   `threads,result,dispatcherType,withBalancing,channel,withSelect`.
//!   Decimal mark follows the host locale (`LC_ALL`, `LC_NUMERIC`, `LANG`).
//!
//! ## Output
//! - `out/channel-producer-consumer-monte-carlo.pdf`: one row of panels per
//!   dispatcher type, one column per balancing value, shared legend on top.
//!
//! Run from the benchmarks directory. Set `RUST_LOG=debug` for per-panel detail.

use std::error::Error;

use channel_pc_plots::{ReportConfig, generate_report};
use env_logger::Env;
use log::{error, info};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("=== PRODUCER/CONSUMER PLOTS START ===");

    let config = ReportConfig::default();
    match generate_report(&config) {
        Ok(panels) => {
            info!(
                "=== DONE: {} panels -> {} ===",
                panels,
                config.output_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Report generation failed: {}", e);
            Err(e.into())
        }
    }
}
