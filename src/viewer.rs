use minifb::{Key, Window, WindowOptions};
use plotters::prelude::*;

use crate::box_plot::BoxPlot;
use crate::chart::draw_box_plot;
use crate::error::PlotError;

pub const WINDOW_TITLE: &str = "DSP benchmark results";
pub const WINDOW_SIZE: (u32, u32) = (1024, 720);

const TARGET_FPS: usize = 30;

/// Renders the box-plot into an RGB pixel buffer of `size`.
pub fn rasterize(plot: &BoxPlot, size: (u32, u32)) -> Result<Vec<u8>, PlotError> {
    let mut rgb = vec![0_u8; size.0 as usize * size.1 as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, size).into_drawing_area();
        draw_box_plot(&root, plot)?;
        root.present().map_err(|err| PlotError::Render(err.into()))?;
    }
    Ok(rgb)
}

/// Packs RGB triples into the `0RGB` words the window expects.
pub fn to_frame(rgb: &[u8]) -> Vec<u32> {
    rgb.chunks_exact(3)
        .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]))
        .collect()
}

/// Shows the box-plot in a window and blocks until the user closes it (or presses `Escape`).
#[tracing::instrument(level = "debug", skip(plot))]
pub fn show(plot: &BoxPlot) -> Result<(), PlotError> {
    let (width, height) = WINDOW_SIZE;
    let frame = to_frame(&rasterize(plot, WINDOW_SIZE)?);

    let mut window = Window::new(WINDOW_TITLE, width as usize, height as usize, WindowOptions::default())?;
    window.set_target_fps(TARGET_FPS);
    tracing::debug!("benchmark chart window opened.");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&frame, width as usize, height as usize)?;
    }

    tracing::debug!("benchmark chart window closed.");
    Ok(())
}
