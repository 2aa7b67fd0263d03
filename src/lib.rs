//! FARS Explorer - monthly accident summaries and state accident maps
//!
//! Reads the yearly `accident_<year>.csv.bz2` files of the Fatality Analysis
//! Reporting System, counts accidents per month and year, and plots accident
//! locations for a single state.

pub mod charts;
pub mod config;
pub mod data;
pub mod logging;

pub use charts::{MapSurface, PlotError, PlotOutcome, PngMapRenderer, StatePlotter};
pub use config::Config;
pub use data::{
    resolve_filename, DataLoader, DataProcessor, LoaderError, MonthlyCountTable, ProcessorError,
    YearTag,
};

/// Monthly accident counts for `years`, read from the current directory.
pub fn summarize<Y>(years: &[Y]) -> Result<MonthlyCountTable, ProcessorError>
where
    Y: Clone + Into<YearTag>,
{
    summarize_with_config(&Config::default(), years)
}

/// Monthly accident counts for `years`, read from `config.data_dir`.
pub fn summarize_with_config<Y>(
    config: &Config,
    years: &[Y],
) -> Result<MonthlyCountTable, ProcessorError>
where
    Y: Clone + Into<YearTag>,
{
    let loader = DataLoader::new(&config.data_dir);
    DataProcessor::summarize_years(&loader, years)
}

/// Map accidents of one state and year into `fars_map.png`.
pub fn plot_state(region: &str, year: impl Into<YearTag>) -> Result<PlotOutcome, PlotError> {
    plot_state_with_config(&Config::default(), region, year)
}

/// Map accidents of one state and year using the paths and map size in `config`.
pub fn plot_state_with_config(
    config: &Config,
    region: &str,
    year: impl Into<YearTag>,
) -> Result<PlotOutcome, PlotError> {
    let loader = DataLoader::new(&config.data_dir);
    let mut renderer = PngMapRenderer::new(&config.output, config.map_width, config.map_height);
    StatePlotter::plot_state(&loader, region, year, &mut renderer)
}
