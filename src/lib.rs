pub mod benchmark;
pub mod box_plot;
pub mod chart;
pub mod error;
pub mod tracing;
pub mod viewer;

use std::path::Path;

pub use benchmark::{load_benchmark_results, BenchmarkRecord, BENCHMARK_RESULTS_PATH};
pub use box_plot::{BoxCell, BoxPlot, BoxStats};
pub use error::PlotError;

pub type PlotResult<T> = Result<T, PlotError>;

/// Loads the results table from `path` and groups it for plotting.
pub fn build_box_plot(path: &Path) -> PlotResult<BoxPlot> {
    let records = load_benchmark_results(path)?;
    Ok(BoxPlot::from_records(&records))
}

/// Loads the benchmark results from their fixed location, then shows the grouped box-plot until
/// the window is closed.
pub fn run() -> PlotResult<()> {
    let plot = build_box_plot(Path::new(BENCHMARK_RESULTS_PATH))?;
    viewer::show(&plot)
}
