//! Charts module - State accident maps

mod plotter;
mod renderer;

pub use plotter::{
    Coordinate, MapSurface, PlotError, PlotOutcome, StatePlotter, Viewport, LATITUDE_SENTINEL,
    LONGITUDE_SENTINEL,
};
pub use renderer::PngMapRenderer;
