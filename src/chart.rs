use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::box_plot::{BoxCell, BoxPlot, BoxStats};
use crate::error::PlotError;

pub const X_DESCRIPTION: &str = "Task";
pub const Y_DESCRIPTION: &str = "Execution time [us]";
pub const LEGEND_TITLE: &str = "Implementation";

/// matplotlib's default "tab10" colour cycle.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

const OUTLINE: RGBColor = RGBColor(0x3f, 0x3f, 0x3f);
const FONT: &str = "sans-serif";

pub fn implementation_color(implementation: usize) -> RGBColor {
    PALETTE[implementation % PALETTE.len()]
}

fn render_error<E>(err: DrawingAreaErrorKind<E>) -> PlotError
where
    E: std::error::Error + Send + Sync + 'static,
{
    PlotError::Render(err.into())
}

/// Draws the grouped box-plot onto `area`: one category per task along x, execution time along
/// y, and one coloured box per implementation within each category.
#[tracing::instrument(level = "debug", skip(area, plot), fields(nr_cells = plot.cells().len()))]
pub fn draw_box_plot<DB>(area: &DrawingArea<DB, Shift>, plot: &BoxPlot) -> Result<(), PlotError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    area.fill(&WHITE).map_err(render_error)?;

    let x_range = plot.category_range();
    let y_range = plot.value_range();

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_error)?;

    // one unit-wide category per task, so whole-number ticks carry the task names
    let format_task = |x: &f64| task_label(plot, *x);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(plot.tasks().len().max(1))
        .x_label_formatter(&format_task)
        .x_desc(X_DESCRIPTION)
        .y_desc(Y_DESCRIPTION)
        .axis_desc_style((FONT, 16))
        .label_style((FONT, 14))
        .draw()
        .map_err(render_error)?;

    if !plot.implementations().is_empty() {
        // swatch-less series so the legend opens with a header line
        chart
            .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())
            .map_err(render_error)?
            .label(LEGEND_TITLE);
    }

    let half_width = plot.box_width() / 2.0;
    for (implementation, name) in plot.implementations().iter().enumerate() {
        let color = implementation_color(implementation);
        let boxes: Vec<(f64, &BoxStats)> = plot
            .cells()
            .iter()
            .filter(|c| c.implementation == implementation)
            .filter_map(|c| c.stats.as_ref().map(|s| (cell_center(plot, c), s)))
            .collect();

        chart
            .draw_series(
                boxes
                    .iter()
                    .map(|(x, s)| Rectangle::new([(x - half_width, s.q1), (x + half_width, s.q3)], color.filled())),
            )
            .map_err(render_error)?
            .label(name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));

        chart
            .draw_series(boxes.iter().map(|(x, s)| {
                Rectangle::new([(x - half_width, s.q1), (x + half_width, s.q3)], OUTLINE.stroke_width(1))
            }))
            .map_err(render_error)?;

        chart
            .draw_series(boxes.iter().flat_map(|(x, s)| whisker_paths(*x, half_width, s)))
            .map_err(render_error)?;

        chart
            .draw_series(boxes.iter().map(|(x, s)| {
                PathElement::new(vec![(x - half_width, s.median), (x + half_width, s.median)], OUTLINE.stroke_width(2))
            }))
            .map_err(render_error)?;

        chart
            .draw_series(
                boxes
                    .iter()
                    .flat_map(|(x, s)| s.outliers.iter().map(move |v| Circle::new((*x, *v), 3, OUTLINE.stroke_width(1)))),
            )
            .map_err(render_error)?;
    }

    if !plot.implementations().is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(OUTLINE)
            .label_font((FONT, 14))
            .draw()
            .map_err(render_error)?;
    }

    Ok(())
}

fn task_label(plot: &BoxPlot, x: f64) -> String {
    let index = x.round();
    if 1e-6 < (x - index).abs() || index < 0.0 {
        return String::new();
    }

    plot.tasks().get(index as usize).cloned().unwrap_or_default()
}

fn cell_center(plot: &BoxPlot, cell: &BoxCell) -> f64 {
    plot.box_center(cell.task, cell.implementation)
}

fn whisker_paths(x: f64, half_width: f64, stats: &BoxStats) -> Vec<PathElement<(f64, f64)>> {
    let cap = half_width / 2.0;
    let style = OUTLINE.stroke_width(1);
    vec![
        PathElement::new(vec![(x, stats.q1), (x, stats.lower_whisker)], style),
        PathElement::new(vec![(x, stats.q3), (x, stats.upper_whisker)], style),
        PathElement::new(
            vec![(x - cap, stats.lower_whisker), (x + cap, stats.lower_whisker)],
            style,
        ),
        PathElement::new(
            vec![(x - cap, stats.upper_whisker), (x + cap, stats.upper_whisker)],
            style,
        ),
    ]
}
