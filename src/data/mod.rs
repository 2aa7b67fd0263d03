//! Data module - accident file loading, summaries and filtering

mod loader;
mod processor;
mod summary;
mod year;

pub use loader::{DataLoader, LoaderError};
pub use processor::{
    DataProcessor, ProcessorError, SkippedYear, YearOutcome, LATITUDE_COLUMN, LONGITUDE_COLUMN,
    STATE_COLUMN, YEAR_COLUMN,
};
pub use summary::{MonthRow, MonthlyCountTable, MONTH_COLUMN};
pub use year::{coerce_integer, resolve_filename, YearTag};
