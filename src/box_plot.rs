use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use itertools::{Itertools, MinMaxResult};

use crate::benchmark::BenchmarkRecord;

/// Share of a task's category slot covered by its implementation boxes.
pub const GROUP_WIDTH: f64 = 0.8;

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

const DODGE_SHRINK: f64 = 0.98;

/// Benchmark records grouped into one box per `(task, implementation)` pair.
///
/// Tasks form the x-axis categories and implementations the hue within each category, both in
/// order of first appearance in the records.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlot {
    tasks: Vec<String>,
    implementations: Vec<String>,
    cells: Vec<BoxCell>,
}

/// The records of a single `(task, implementation)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxCell {
    pub task: usize,
    pub implementation: usize,
    pub values: Vec<f64>,
    pub stats: Option<BoxStats>,
}

/// Box-plot summary of a set of measurements.
///
/// Quartiles interpolate linearly between closest ranks. Whiskers extend to the most extreme
/// measurement within `1.5 * IQR` of the box; anything further out is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarizes the finite values; `None` if there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|lhs, rhs| lhs.total_cmp(rhs));

        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|v| low_fence <= *v)
            .filter(|v| *v <= q1)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .filter(|v| q3 <= *v)
            .unwrap_or(q3);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lower_whisker || upper_whisker < *v)
            .collect();

        Some(Self {
            count: sorted.len(),
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = (sorted.len() - 1) as f64 * p;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

impl BoxPlot {
    #[tracing::instrument(level = "debug", skip(records), fields(nr_records = records.len()))]
    pub fn from_records(records: &[BenchmarkRecord]) -> Self {
        let tasks: Vec<String> = records.iter().map(|r| r.task.clone()).unique().collect();
        let implementations: Vec<String> = records.iter().map(|r| r.implementation.clone()).unique().collect();

        let cells = group_cells(records, &tasks, &implementations);

        tracing::debug!(
            nr_tasks=%tasks.len(), nr_implementations=%implementations.len(),
            "grouped benchmark records into {} cells.", cells.len()
        );

        Self { tasks, implementations, cells }
    }

    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    pub fn implementations(&self) -> &[String] {
        &self.implementations
    }

    /// Cells ordered by task, then implementation. Pairs without records have no cell.
    pub fn cells(&self) -> &[BoxCell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, task: &str, implementation: &str) -> Option<&BoxCell> {
        let task = self.tasks.iter().position(|t| t == task)?;
        let implementation = self.implementations.iter().position(|i| i == implementation)?;
        self.cells
            .iter()
            .find(|c| c.task == task && c.implementation == implementation)
    }

    /// X-axis extent with one unit-wide slot per task, centered on the task's index.
    pub fn category_range(&self) -> Range<f64> {
        -0.5..(self.tasks.len().max(1) as f64 - 0.5)
    }

    /// Y-axis extent covering every finite measurement with a small margin.
    pub fn value_range(&self) -> Range<f64> {
        let extent = self
            .cells
            .iter()
            .flat_map(|c| c.values.iter().copied())
            .filter(|v| v.is_finite())
            .minmax();

        let (min, max) = match extent {
            MinMaxResult::NoElements => return 0.0..1.0,
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let span = max - min;
        let margin = if 0.0 < span { span * 0.05 } else { 1.0 };
        (min - margin)..(max + margin)
    }

    /// Center of the implementation's box within the task's category slot.
    pub fn box_center(&self, task: usize, implementation: usize) -> f64 {
        let slot = self.slot_width();
        task as f64 - GROUP_WIDTH / 2.0 + slot * (implementation as f64 + 0.5)
    }

    pub fn box_width(&self) -> f64 {
        if 1 < self.implementations.len() {
            self.slot_width() * DODGE_SHRINK
        } else {
            self.slot_width()
        }
    }

    fn slot_width(&self) -> f64 {
        GROUP_WIDTH / self.implementations.len().max(1) as f64
    }
}

fn group_cells(records: &[BenchmarkRecord], tasks: &[String], implementations: &[String]) -> Vec<BoxCell> {
    let task_positions = positions(tasks);
    let implementation_positions = positions(implementations);

    let mut groups: BTreeMap<(usize, usize), Vec<f64>> = BTreeMap::new();
    for record in records {
        let key = (
            task_positions[record.task.as_str()],
            implementation_positions[record.implementation.as_str()],
        );
        groups.entry(key).or_default().push(record.execution_time_us);
    }

    groups
        .into_iter()
        .map(|((task, implementation), values)| {
            let stats = BoxStats::from_values(&values);
            BoxCell { task, implementation, values, stats }
        })
        .collect()
}

fn positions(labels: &[String]) -> HashMap<&str, usize> {
    labels.iter().enumerate().map(|(i, label)| (label.as_str(), i)).collect()
}

// /////////////////////////////////////////////////////
// // Unit Tests ///////////////////////////////////////
