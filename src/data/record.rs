//! One row of the benchmark results CSV.

use serde::Deserialize;

use crate::{
    data::locale::DecimalSeparator,
    utils::error::{ReportError, Result},
};

pub const COL_THREADS: &str = "threads";
pub const COL_RESULT: &str = "result";
pub const COL_DISPATCHER: &str = "dispatcherType";
pub const COL_BALANCING: &str = "withBalancing";
pub const COL_CHANNEL: &str = "channel";
pub const COL_SELECT: &str = "withSelect";

/// Header columns the loader insists on; order in the file does not matter.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_THREADS,
    COL_RESULT,
    COL_DISPATCHER,
    COL_BALANCING,
    COL_CHANNEL,
    COL_SELECT,
];

/// Row as it sits in the file. Numbers stay text until the decimal mark is known.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    threads: String,
    result: String,
    #[serde(rename = "dispatcherType")]
    dispatcher_type: String,
    #[serde(rename = "withBalancing")]
    with_balancing: String,
    channel: String,
    #[serde(rename = "withSelect")]
    with_select: String,
}

/// Benchmark measurement: `result` is the time in ms to push ~batch size messages
/// through `channel` with `threads` producers/consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub threads: u32,
    pub result: f64,
    pub dispatcher_type: String,
    pub with_balancing: String,
    pub channel: String,
    pub with_select: String,
}

impl RawRecord {
    pub(crate) fn into_row(self, line: u64, decimal: DecimalSeparator) -> Result<ResultRow> {
        let threads = self
            .threads
            .trim()
            .parse::<u32>()
            .map_err(|_| ReportError::InvalidValue {
                line,
                column: COL_THREADS,
                value: self.threads.clone(),
            })?;
        let result = decimal
            .parse_f64(&self.result)
            .ok_or_else(|| ReportError::InvalidValue {
                line,
                column: COL_RESULT,
                value: self.result.clone(),
            })?;

        Ok(ResultRow {
            threads,
            result,
            dispatcher_type: self.dispatcher_type,
            with_balancing: self.with_balancing,
            channel: self.channel,
            with_select: self.with_select,
        })
    }
}

impl ResultRow {
    pub fn matches(&self, dispatcher: &str, balancing: &str, channel: &str, select: &str) -> bool {
        self.dispatcher_type == dispatcher
            && self.with_balancing == balancing
            && self.channel == channel
            && self.with_select == select
    }
}
