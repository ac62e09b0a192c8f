use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use claim::*;
use dsp_bench_plot::{build_box_plot, load_benchmark_results, BenchmarkRecord, BoxPlot};
use pretty_assertions::assert_eq;

fn fixture_path() -> Result<PathBuf> {
    let base_path = std::env::current_dir()?;
    Ok(base_path.join("tests/data/dsp_benchmark.csv"))
}

fn write_table(rows: &[&str]) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "Task\tImplementation\tExecution time [us]")?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    file.flush()?;
    Ok(file)
}

#[test]
fn test_load_benchmark_fixture() -> Result<()> {
    once_cell::sync::Lazy::force(&dsp_bench_plot::tracing::TEST_TRACING);
    let main_span = tracing::info_span!("test_load_benchmark_fixture");
    let _main_span_guard = main_span.enter();

    let records = load_benchmark_results(&fixture_path()?)?;
    assert_eq!(records.len(), 18);
    assert_eq!(records[0], BenchmarkRecord::new("zscore", "naive", 1532.0));
    assert_eq!(records[17], BenchmarkRecord::new("magspec", "dsp", 1176.0));

    let plot = BoxPlot::from_records(&records);
    assert_eq!(
        plot.tasks(),
        &["zscore".to_string(), "energy".to_string(), "magspec".to_string()]
    );
    assert_eq!(plot.implementations(), &["naive".to_string(), "dsp".to_string()]);
    assert_eq!(plot.cells().len(), 6);

    let energy_dsp = assert_some!(plot.cell("energy", "dsp"));
    assert_eq!(energy_dsp.values, vec![97.0, 101.0, 99.0]);
    let stats = assert_some!(energy_dsp.stats.as_ref());
    assert_eq!(stats.median, 99.0);
    assert_eq!(stats.count, 3);
    Ok(())
}

#[test]
fn test_happy_path_one_category_per_task_and_hue_per_implementation() -> Result<()> {
    let table = write_table(&["FFT\tImplA\t120.5", "FFT\tImplB\t98.3"])?;

    let plot = build_box_plot(table.path())?;
    assert_eq!(plot.tasks(), &["FFT".to_string()]);
    assert_eq!(plot.implementations(), &["ImplA".to_string(), "ImplB".to_string()]);
    assert_eq!(assert_some!(plot.cell("FFT", "ImplA")).values, vec![120.5]);
    assert_eq!(assert_some!(plot.cell("FFT", "ImplB")).values, vec![98.3]);
    Ok(())
}

#[test]
fn test_grouping_has_no_cross_contamination() -> Result<()> {
    let table = write_table(&[
        "A\tX\t1", "B\tY\t40", "A\tY\t20", "B\tX\t30", "A\tX\t2", "A\tY\t21", "B\tX\t31", "B\tY\t41",
    ])?;

    let plot = build_box_plot(table.path())?;
    assert_eq!(plot.cells().len(), 4);

    for (task, implementation, expected) in [
        ("A", "X", vec![1.0, 2.0]),
        ("A", "Y", vec![20.0, 21.0]),
        ("B", "X", vec![30.0, 31.0]),
        ("B", "Y", vec![40.0, 41.0]),
    ] {
        let cell = assert_some!(plot.cell(task, implementation));
        assert_eq!(cell.values, expected, "cell ({}, {})", task, implementation);
    }
    Ok(())
}

#[test]
fn test_rebuilding_from_unchanged_file_is_identical() -> Result<()> {
    let path = fixture_path()?;
    let first = build_box_plot(&path)?;
    let second = build_box_plot(&path)?;
    assert_eq!(first, second);
    assert_eq!(first.value_range(), second.value_range());
    Ok(())
}

#[test]
fn test_non_numeric_time_rejected_before_plotting() -> Result<()> {
    let table = write_table(&["FFT\tImplA\t120.5", "FFT\tImplB\tN/A"])?;
    let err = assert_err!(build_box_plot(table.path()));
    assert!(matches!(err, dsp_bench_plot::PlotError::Parse(_)), "unexpected error: {err:?}");
    Ok(())
}
