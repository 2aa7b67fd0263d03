//! Data Processor Module
//! Multi-year month extraction, monthly summaries and region filtering.

use crate::data::loader::{DataLoader, LoaderError};
use crate::data::summary::{MonthlyCountTable, MONTH_COLUMN};
use crate::data::year::YearTag;
use polars::prelude::*;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Literal year column added to extracted records.
pub const YEAR_COLUMN: &str = "year";
pub const STATE_COLUMN: &str = "STATE";
pub const LONGITUDE_COLUMN: &str = "LONGITUD";
pub const LATITUDE_COLUMN: &str = "LATITUDE";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(transparent)]
    Loader(#[from] LoaderError),
}

/// A year that could not be loaded; its slot in the result carries no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedYear {
    pub year: YearTag,
    pub reason: String,
}

impl fmt::Display for SkippedYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid year: {}", self.year)
    }
}

/// Outcome for one requested year: its (MONTH, year) table, or why it was skipped.
pub type YearOutcome = Result<DataFrame, SkippedYear>;

/// Handles extraction and aggregation over loaded accident tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Tag every record with the literal year and keep only (MONTH, year).
    pub fn extract_months(df: &DataFrame, year: &YearTag) -> Result<DataFrame, ProcessorError> {
        let extracted = df
            .clone()
            .lazy()
            .with_column(lit(year.as_str()).alias(YEAR_COLUMN))
            .select([col(MONTH_COLUMN).cast(DataType::Int64), col(YEAR_COLUMN)])
            .collect()?;
        Ok(extracted)
    }

    /// Load each requested year and extract its months.
    ///
    /// One outcome per input year, in input order. A year that fails for any
    /// reason is logged as a warning and reported as [`SkippedYear`].
    pub fn read_years<Y>(loader: &DataLoader, years: &[Y]) -> Vec<YearOutcome>
    where
        Y: Clone + Into<YearTag>,
    {
        years
            .iter()
            .cloned()
            .map(Into::<YearTag>::into)
            .map(|year| {
                Self::read_year(loader, &year).map_err(|e| {
                    let skipped = SkippedYear {
                        year,
                        reason: e.to_string(),
                    };
                    warn!(reason = %skipped.reason, "{}", skipped);
                    skipped
                })
            })
            .collect()
    }

    fn read_year(loader: &DataLoader, year: &YearTag) -> Result<DataFrame, ProcessorError> {
        let df = loader.load_year(year)?;
        Self::extract_months(&df, year)
    }

    /// Count accidents per month for each requested year.
    ///
    /// Years that fail to load are left out of the table. If none load, the
    /// table is empty.
    pub fn summarize_years<Y>(
        loader: &DataLoader,
        years: &[Y],
    ) -> Result<MonthlyCountTable, ProcessorError>
    where
        Y: Clone + Into<YearTag>,
    {
        let mut loaded_years: Vec<YearTag> = Vec::new();
        let mut combined: Option<DataFrame> = None;

        let requested = years.iter().cloned().map(Into::<YearTag>::into);
        for (year, outcome) in requested.zip(Self::read_years(loader, years)) {
            let Ok(df) = outcome else {
                continue;
            };
            if !loaded_years.contains(&year) {
                loaded_years.push(year);
            }
            match combined.as_mut() {
                Some(acc) => {
                    acc.vstack_mut(&df)?;
                }
                None => combined = Some(df),
            }
        }

        let Some(combined) = combined else {
            return Ok(MonthlyCountTable::default());
        };

        let grouped = combined
            .lazy()
            .group_by([col(YEAR_COLUMN), col(MONTH_COLUMN)])
            .agg([len().alias("n")])
            .collect()?;
        debug!(groups = grouped.height(), "grouped accidents by year and month");

        let year_col = grouped.column(YEAR_COLUMN)?.cast(&DataType::String)?;
        let month_col = grouped.column(MONTH_COLUMN)?.cast(&DataType::Int64)?;
        let n_col = grouped.column("n")?.cast(&DataType::UInt32)?;

        let counts: Vec<(YearTag, i64, u32)> = year_col
            .str()?
            .into_iter()
            .zip(month_col.i64()?.into_iter())
            .zip(n_col.u32()?.into_iter())
            .filter_map(|((year, month), n)| Some((YearTag::from(year?), month?, n?)))
            .collect();

        Ok(MonthlyCountTable::from_counts(loaded_years, counts))
    }

    /// Sorted distinct region (STATE) codes in a loaded table.
    pub fn region_codes(df: &DataFrame) -> Result<Vec<i64>, ProcessorError> {
        let states = df.column(STATE_COLUMN)?.cast(&DataType::Int64)?;
        let mut codes: Vec<i64> = states.i64()?.into_iter().flatten().collect();
        codes.sort_unstable();
        codes.dedup();
        Ok(codes)
    }

    /// Rows whose STATE equals `code`.
    pub fn filter_by_region(df: &DataFrame, code: i64) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(STATE_COLUMN).cast(DataType::Int64).eq(lit(code)))
            .collect()?;
        Ok(filtered)
    }

    /// Raw (longitude, latitude) values per row, nulls as `None`.
    pub fn raw_coordinates(
        df: &DataFrame,
    ) -> Result<Vec<(Option<f64>, Option<f64>)>, ProcessorError> {
        let lon = df.column(LONGITUDE_COLUMN)?.cast(&DataType::Float64)?;
        let lat = df.column(LATITUDE_COLUMN)?.cast(&DataType::Float64)?;
        Ok(lon
            .f64()?
            .into_iter()
            .zip(lat.f64()?.into_iter())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{accident_csv, write_year};
    use tempfile::tempdir;

    #[test]
    fn extract_months_keeps_month_and_literal_year() {
        let dir = tempdir().unwrap();
        write_year(dir.path(), 2013, &accident_csv(&[(1, 1, 0.0, 0.0), (1, 5, 0.0, 0.0)]));
        let df = DataLoader::new(dir.path()).load_year(&YearTag::from(2013)).unwrap();

        let extracted = DataProcessor::extract_months(&df, &YearTag::from("2013")).unwrap();

        assert_eq!(extracted.shape(), (2, 2));
        let months: Vec<Option<i64>> = extracted
            .column("MONTH")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(months, vec![Some(1), Some(5)]);
        let years: Vec<Option<&str>> = extracted
            .column("year")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(years, vec![Some("2013"), Some("2013")]);
    }

    #[test]
    fn read_years_keeps_slots_for_missing_years() {
        let dir = tempdir().unwrap();
        write_year(dir.path(), 2013, &accident_csv(&[(1, 1, -86.0, 32.0)]));
        let loader = DataLoader::new(dir.path());

        let outcomes = DataProcessor::read_years(&loader, &["2013", "1999", "2013"]);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        let skipped = outcomes[1].as_ref().unwrap_err();
        assert_eq!(skipped.year, YearTag::from("1999"));
        assert_eq!(skipped.to_string(), "invalid year: 1999");
        assert!(outcomes[2].is_ok());
    }

    #[test]
    fn read_years_skips_file_without_month_column() {
        let dir = tempdir().unwrap();
        write_year(dir.path(), 2013, "STATE,LATITUDE,LONGITUD\n1,30.0,-80.0\n");
        let loader = DataLoader::new(dir.path());

        let outcomes = DataProcessor::read_years(&loader, &[2013]);
        assert!(outcomes[0].is_err());
    }

    #[test]
    fn summarize_single_year_counts_each_month() {
        let dir = tempdir().unwrap();
        write_year(
            dir.path(),
            2013,
            &accident_csv(&[
                (1, 1, 0.0, 0.0),
                (1, 1, 0.0, 0.0),
                (2, 3, 0.0, 0.0),
                (4, 1, 0.0, 0.0),
            ]),
        );
        let loader = DataLoader::new(dir.path());

        let table = DataProcessor::summarize_years(&loader, &[2013]).unwrap();
        assert_eq!(table.years(), &[YearTag::from(2013)]);
        assert_eq!(table.months(), vec![1, 3]);
        assert_eq!(table.count(1, 2013), Some(3));
        assert_eq!(table.count(3, 2013), Some(1));
    }

    #[test]
    fn summarize_drops_missing_year_column() {
        let dir = tempdir().unwrap();
        write_year(dir.path(), 2013, &accident_csv(&[(1, 1, 0.0, 0.0)]));
        let loader = DataLoader::new(dir.path());

        let table = DataProcessor::summarize_years(&loader, &["2013", "2020"]).unwrap();
        assert_eq!(table.years(), &[YearTag::from("2013")]);
        assert_eq!(table.count(1, "2020"), None);
    }

    #[test]
    fn summarize_with_no_loadable_year_is_empty() {
        let dir = tempdir().unwrap();
        let loader = DataLoader::new(dir.path());

        let table = DataProcessor::summarize_years(&loader, &["2001", "bogus"]).unwrap();
        assert!(table.is_empty());
        assert!(table.years().is_empty());
    }

    #[test]
    fn summarize_leaves_absent_months_blank() {
        let dir = tempdir().unwrap();
        write_year(dir.path(), 2013, &accident_csv(&[(1, 1, 0.0, 0.0)]));
        write_year(dir.path(), 2014, &accident_csv(&[(1, 2, 0.0, 0.0), (1, 2, 0.0, 0.0)]));
        let loader = DataLoader::new(dir.path());

        let table = DataProcessor::summarize_years(&loader, &[2013, 2014]).unwrap();
        assert_eq!(table.months(), vec![1, 2]);
        assert_eq!(table.count(1, 2013), Some(1));
        assert_eq!(table.count(1, 2014), None);
        assert_eq!(table.count(2, 2013), None);
        assert_eq!(table.count(2, 2014), Some(2));
    }

    #[test]
    fn region_codes_are_distinct_and_sorted() {
        let dir = tempdir().unwrap();
        write_year(
            dir.path(),
            2013,
            &accident_csv(&[(6, 1, 0.0, 0.0), (1, 1, 0.0, 0.0), (6, 2, 0.0, 0.0)]),
        );
        let df = DataLoader::new(dir.path()).load_year(&YearTag::from(2013)).unwrap();

        assert_eq!(DataProcessor::region_codes(&df).unwrap(), vec![1, 6]);
        assert_eq!(DataProcessor::filter_by_region(&df, 6).unwrap().height(), 2);
        assert_eq!(DataProcessor::filter_by_region(&df, 9).unwrap().height(), 0);
    }
}
