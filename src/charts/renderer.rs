//! Static Map Renderer
//! Draws accident locations onto a PNG with plotters.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. Longitude/latitude graticule over the viewport
//! 3. Basemap frame around the state's extent
//! 4. One small dot per accident

use crate::charts::plotter::{MapSurface, PlotError, Viewport};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

// Colors
const WATER: RGBColor = RGBColor(234, 242, 248);
const LAND: RGBColor = RGBColor(250, 250, 245);
const OUTLINE: RGBColor = RGBColor(90, 90, 90);
const GRID: RGBColor = RGBColor(200, 200, 200);
const POINT: RGBColor = RGBColor(192, 57, 43);

/// Degrees added around the data extent so edge points stay visible.
const VIEWPORT_PAD: f64 = 0.25;

/// Renders maps to a PNG file.
pub struct PngMapRenderer {
    output: PathBuf,
    width: u32,
    height: u32,
}

impl PngMapRenderer {
    pub fn new(output: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output: output.into(),
            width,
            height,
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Plot ranges with padding; a single-point extent still gets a visible area.
    fn padded_ranges(viewport: &Viewport) -> ((f64, f64), (f64, f64)) {
        (
            (viewport.lon_min - VIEWPORT_PAD, viewport.lon_max + VIEWPORT_PAD),
            (viewport.lat_min - VIEWPORT_PAD, viewport.lat_max + VIEWPORT_PAD),
        )
    }

    fn render(
        &self,
        title: &str,
        viewport: &Viewport,
        points: &[(f64, f64)],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(&self.output, (self.width, self.height)).into_drawing_area();
        root.fill(&WATER)?;

        let ((x0, x1), (y0, y1)) = Self::padded_ranges(viewport);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .light_line_style(GRID.mix(0.4))
            .bold_line_style(GRID.mix(0.8))
            .x_desc("Longitude")
            .y_desc("Latitude")
            .draw()?;

        // Basemap: the region's extent as a filled, outlined frame
        let frame = [
            (viewport.lon_min, viewport.lat_min),
            (viewport.lon_max, viewport.lat_max),
        ];
        chart.draw_series(std::iter::once(Rectangle::new(frame, LAND.filled())))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            frame,
            OUTLINE.stroke_width(2),
        )))?;

        chart.draw_series(
            points
                .iter()
                .map(|&(lon, lat)| Circle::new((lon, lat), 2, POINT.filled())),
        )?;

        root.present()?;
        Ok(())
    }
}

impl MapSurface for PngMapRenderer {
    fn draw_map(
        &mut self,
        title: &str,
        viewport: &Viewport,
        points: &[(f64, f64)],
    ) -> Result<(), PlotError> {
        self.render(title, viewport, points)
            .map_err(|e| PlotError::Render(e.to_string()))?;
        debug!(path = %self.output.display(), points = points.len(), "map written");
        Ok(())
    }
}
