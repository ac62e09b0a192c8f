use std::path::PathBuf;

use thiserror::Error;

/// Set of errors occurring while loading, drawing or showing the benchmark box-plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The results table could not be opened at its expected location.
    #[error("failed to read benchmark results from {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row of the results table did not match the expected columns or types.
    #[error("could not parse benchmark results")]
    Parse(#[from] csv::Error),

    #[error("failed to draw benchmark chart")]
    Render(#[source] anyhow::Error),

    #[error("benchmark chart viewer failed")]
    Viewer(#[from] minifb::Error),
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::Path;

    use super::*;
    use crate::benchmark::{load_benchmark_results, read_benchmark_results};
    use claim::*;

    #[test]
    fn test_read_error_cause_reported_once() {
        let err = assert_err!(load_benchmark_results(Path::new("no/such/dsp_benchmark.csv")));
        let message = err.to_string();
        let cause = assert_some!(err.source()).to_string();

        assert_eq!(message, "failed to read benchmark results from no/such/dsp_benchmark.csv");
        assert!(!message.contains(&cause), "cause repeated in message: {message}");

        let report = format!("{:?}", anyhow::Error::from(err));
        assert_eq!(report.matches(&cause).count(), 1, "report: {report}");
    }

    #[test]
    fn test_parse_error_cause_reported_once() {
        let table = "Task\tImplementation\tExecution time [us]\nFFT\tImplA\tN/A\n";
        let err = assert_err!(read_benchmark_results(table.as_bytes()));
        let cause = assert_some!(err.source()).to_string();

        assert_eq!(err.to_string(), "could not parse benchmark results");
        let report = format!("{:?}", anyhow::Error::from(err));
        assert_eq!(report.matches(&cause).count(), 1, "report: {report}");
    }
}
