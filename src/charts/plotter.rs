//! State Plotter Module
//! Filters one year's accidents to a state and hands the points to a map surface.

use crate::data::{coerce_integer, DataLoader, DataProcessor, LoaderError, ProcessorError, YearTag};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Longitudes above this are FARS "unknown" codes.
pub const LONGITUDE_SENTINEL: f64 = 900.0;
/// Latitudes above this are FARS "unknown" codes.
pub const LATITUDE_SENTINEL: f64 = 90.0;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("invalid STATE number: {0}")]
    InvalidRegion(String),
    #[error("Processing error: {0}")]
    Processor(#[from] ProcessorError),
    #[error("Failed to render map: {0}")]
    Render(String),
}

/// A record's location with unknown values already removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

impl Coordinate {
    /// Drop null, NaN and sentinel-coded values.
    pub fn sanitize(longitude: Option<f64>, latitude: Option<f64>) -> Self {
        Self {
            longitude: longitude.filter(|v| !v.is_nan() && *v <= LONGITUDE_SENTINEL),
            latitude: latitude.filter(|v| !v.is_nan() && *v <= LATITUDE_SENTINEL),
        }
    }

    /// (longitude, latitude) when both are known.
    pub fn point(&self) -> Option<(f64, f64)> {
        Some((self.longitude?, self.latitude?))
    }
}

/// Map bounds in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Viewport {
    /// Longitude and latitude ranges are taken independently over the known
    /// values; `None` when either axis has no known value.
    pub fn from_coordinates(coords: &[Coordinate]) -> Option<Self> {
        let (lon_min, lon_max) = Self::range(coords.iter().filter_map(|c| c.longitude))?;
        let (lat_min, lat_max) = Self::range(coords.iter().filter_map(|c| c.latitude))?;
        Some(Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        })
    }

    fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
        values.fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Something that can draw a basemap for a viewport with point markers on it.
pub trait MapSurface {
    fn draw_map(
        &mut self,
        title: &str,
        viewport: &Viewport,
        points: &[(f64, f64)],
    ) -> Result<(), PlotError>;
}

/// Result of a plot request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotOutcome {
    Rendered {
        viewport: Viewport,
        points: Vec<(f64, f64)>,
    },
    /// No accident with a usable location; nothing was drawn.
    NothingToPlot,
}

/// Plots accident locations for one state and year.
pub struct StatePlotter;

impl StatePlotter {
    pub fn plot_state<S: MapSurface + ?Sized>(
        loader: &DataLoader,
        region: &str,
        year: impl Into<YearTag>,
        surface: &mut S,
    ) -> Result<PlotOutcome, PlotError> {
        let year = year.into();
        let df = loader.load_year(&year)?;

        let codes = DataProcessor::region_codes(&df)?;
        let code = coerce_integer(region)
            .filter(|c| codes.binary_search(c).is_ok())
            .ok_or_else(|| PlotError::InvalidRegion(region.trim().to_string()))?;

        let subset = DataProcessor::filter_by_region(&df, code)?;
        if subset.height() == 0 {
            info!(state = code, year = %year, "no accidents to plot");
            return Ok(PlotOutcome::NothingToPlot);
        }

        let coords: Vec<Coordinate> = DataProcessor::raw_coordinates(&subset)?
            .into_iter()
            .map(|(lon, lat)| Coordinate::sanitize(lon, lat))
            .collect();

        let Some(viewport) = Viewport::from_coordinates(&coords) else {
            info!(state = code, year = %year, "no accidents to plot");
            return Ok(PlotOutcome::NothingToPlot);
        };
        let points: Vec<(f64, f64)> = coords.iter().filter_map(Coordinate::point).collect();

        let title = format!("State {} accidents, {}", code, year);
        surface.draw_map(&title, &viewport, &points)?;
        info!(
            state = code,
            year = %year,
            points = points.len(),
            "plotted accidents"
        );

        Ok(PlotOutcome::Rendered { viewport, points })
    }
}
