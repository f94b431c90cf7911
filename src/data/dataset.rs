//! In-memory table of benchmark results with first-appearance distinct queries.

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, Trim};
use log::{debug, info};

use crate::{
    data::{
        locale::DecimalSeparator,
        record::{REQUIRED_COLUMNS, RawRecord, ResultRow},
    },
    utils::error::{ReportError, Result},
};

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<ResultRow>,
}

impl Dataset {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    /// Loads the results CSV; any missing file, column or bad value aborts the load.
    pub fn load(path: impl AsRef<Path>, decimal: DecimalSeparator) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
        let dataset = Self::from_reader(file, decimal)?;
        info!(
            "Loaded {} rows from {} ({} dispatcher types, {} thread counts)",
            dataset.len(),
            path.display(),
            dataset.dispatcher_types().len(),
            dataset.threads().len()
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R, decimal: DecimalSeparator) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ReportError::MissingColumn { column });
            }
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let raw: RawRecord = record.deserialize(Some(&headers))?;
            rows.push(raw.into_row(line, decimal)?);
        }
        debug!("parsed {} rows with decimal mark {:?}", rows.len(), decimal.as_char());

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn threads(&self) -> Vec<u32> {
        distinct(self.rows.iter().map(|r| &r.threads))
    }

    pub fn dispatcher_types(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|r| &r.dispatcher_type))
    }

    pub fn balancing_values(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|r| &r.with_balancing))
    }

    pub fn channels(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|r| &r.channel))
    }

    pub fn select_modes(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|r| &r.with_select))
    }

    /// Rows matching all four categorical keys, in input order.
    pub fn matching<'a>(
        &'a self,
        dispatcher: &'a str,
        balancing: &'a str,
        channel: &'a str,
        select: &'a str,
    ) -> impl Iterator<Item = &'a ResultRow> + 'a {
        self.rows
            .iter()
            .filter(move |r| r.matches(dispatcher, balancing, channel, select))
    }
}

/// Distinct values in order of first appearance.
fn distinct<'a, T>(values: impl Iterator<Item = &'a T>) -> Vec<T>
where
    T: PartialEq + Clone + 'a,
{
    let mut seen: Vec<T> = Vec::new();
    for value in values {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
threads,result,dispatcherType,withBalancing,channel,withSelect
1,120,FORK_JOIN,true,RENDEZVOUS,false
2,65,FORK_JOIN,true,RENDEZVOUS,false
1,99.5,DEFAULT,false,BUFFERED_16,true
4,40,FORK_JOIN,false,RENDEZVOUS,false
";

    fn sample() -> Dataset {
        Dataset::from_reader(SAMPLE.as_bytes(), DecimalSeparator::Point).unwrap()
    }

    #[test]
    fn loads_rows_in_order() {
        let data = sample();
        assert_eq!(data.len(), 4);
        assert_eq!(data.rows()[2].result, 99.5);
        assert_eq!(data.rows()[2].dispatcher_type, "DEFAULT");
    }

    #[test]
    fn distinct_values_keep_first_appearance() {
        let data = sample();
        assert_eq!(data.threads(), vec![1, 2, 4]);
        assert_eq!(data.dispatcher_types(), vec!["FORK_JOIN", "DEFAULT"]);
        assert_eq!(data.balancing_values(), vec!["true", "false"]);
        assert_eq!(data.channels(), vec!["RENDEZVOUS", "BUFFERED_16"]);
        assert_eq!(data.select_modes(), vec!["false", "true"]);
    }

    #[test]
    fn matching_filters_on_all_keys() {
        let data = sample();
        let hits: Vec<_> = data
            .matching("FORK_JOIN", "true", "RENDEZVOUS", "false")
            .map(|r| (r.threads, r.result))
            .collect();
        assert_eq!(hits, vec![(1, 120.0), (2, 65.0)]);
        assert_eq!(data.matching("DEFAULT", "true", "RENDEZVOUS", "false").count(), 0);
    }

    #[test]
    fn column_order_and_extra_columns_do_not_matter() {
        let csv = "withSelect,channel,note,withBalancing,dispatcherType,result,threads\n\
                   false,RENDEZVOUS,x,true,A,12.5,16\n";
        let data = Dataset::from_reader(csv.as_bytes(), DecimalSeparator::Point).unwrap();
        assert_eq!(data.rows()[0].threads, 16);
        assert_eq!(data.rows()[0].result, 12.5);
        assert_eq!(data.rows()[0].dispatcher_type, "A");
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "threads,result,dispatcherType,withBalancing,channel\n1,2,A,true,R\n";
        let err = Dataset::from_reader(csv.as_bytes(), DecimalSeparator::Point).unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn { column: "withSelect" }));
    }

    #[test]
    fn comma_decimals_need_quoting() {
        let csv = "threads,result,dispatcherType,withBalancing,channel,withSelect\n\
                   2,\"65,75\",A,true,R,false\n";
        let data = Dataset::from_reader(csv.as_bytes(), DecimalSeparator::Comma).unwrap();
        assert_eq!(data.rows()[0].result, 65.75);
    }

    #[test]
    fn bad_number_reports_file_line() {
        let csv = "threads,result,dispatcherType,withBalancing,channel,withSelect\n\
                   1,10,A,true,R,false\n\
                   2,fast,A,true,R,false\n";
        let err = Dataset::from_reader(csv.as_bytes(), DecimalSeparator::Point).unwrap_err();
        match err {
            ReportError::InvalidValue { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "result");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Dataset::load("does/not/exist.csv", DecimalSeparator::Point).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn header_only_gives_empty_dataset() {
        let csv = "threads,result,dispatcherType,withBalancing,channel,withSelect\n";
        let data = Dataset::from_reader(csv.as_bytes(), DecimalSeparator::Point).unwrap();
        assert!(data.is_empty());
        assert!(data.dispatcher_types().is_empty());
    }
}
