use std::fmt;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::PlotError;

/// Location of the benchmark results table, relative to the working directory.
pub const BENCHMARK_RESULTS_PATH: &str = "../test/dsp_benchmark.csv";

/// Field separator used by the benchmark results table.
pub const FIELD_DELIMITER: u8 = b'\t';

/// One timing measurement from the benchmark results table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(rename = "Task")]
    pub task: String,

    #[serde(rename = "Implementation")]
    pub implementation: String,

    #[serde(rename = "Execution time [us]")]
    pub execution_time_us: f64,
}

impl BenchmarkRecord {
    pub fn new(task: impl Into<String>, implementation: impl Into<String>, execution_time_us: f64) -> Self {
        Self {
            task: task.into(),
            implementation: implementation.into(),
            execution_time_us,
        }
    }
}

impl fmt::Display for BenchmarkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: {}us", self.task, self.implementation, self.execution_time_us)
    }
}

/// Loads every record of the tab-delimited results table at `path`.
///
/// The first row must name the `Task`, `Implementation` and `Execution time [us]` columns. Any
/// structural or numeric problem fails the whole load; no partial result is returned.
#[tracing::instrument(level = "debug")]
pub fn load_benchmark_results(path: &Path) -> Result<Vec<BenchmarkRecord>, PlotError> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(true)
        .from_path(path)
        .map_err(|source| PlotError::Read { path: path.to_path_buf(), source })?;

    let records = deserialize_records(reader)?;
    tracing::debug!(path=%path.display(), "loaded {} benchmark records.", records.len());
    Ok(records)
}

/// Parses benchmark records from any reader using the same table layout as
/// [`load_benchmark_results`].
pub fn read_benchmark_results<R: io::Read>(rdr: R) -> Result<Vec<BenchmarkRecord>, PlotError> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(true)
        .from_reader(rdr);

    deserialize_records(reader)
}

fn deserialize_records<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<BenchmarkRecord>, PlotError> {
    tracing::trace!("loading records from benchmark table...");
    let mut records = vec![];
    for result in reader.deserialize() {
        let record: BenchmarkRecord = result?;
        records.push(record);
    }
    Ok(records)
}

// /////////////////////////////////////////////////////
// // Unit Tests ///////////////////////////////////////
