//! Monthly Count Table
//! Accident counts pivoted with months as rows and years as columns.

use crate::data::year::YearTag;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Name of the row-key column in the pivoted table.
pub const MONTH_COLUMN: &str = "MONTH";

/// One month's counts, aligned with [`MonthlyCountTable::years`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRow {
    pub month: i64,
    pub counts: Vec<Option<u32>>,
}

/// Accident counts per (month, year).
///
/// Only months present in the data get a row. A year with no accidents in a
/// given month has a blank cell (`None`), not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyCountTable {
    years: Vec<YearTag>,
    rows: Vec<MonthRow>,
}

impl MonthlyCountTable {
    /// Build from (year, month, count) triples; `years` fixes the column order.
    pub fn from_counts(
        years: Vec<YearTag>,
        counts: impl IntoIterator<Item = (YearTag, i64, u32)>,
    ) -> Self {
        let mut by_month: BTreeMap<i64, Vec<Option<u32>>> = BTreeMap::new();

        for (year, month, n) in counts {
            let Some(idx) = years.iter().position(|y| *y == year) else {
                continue;
            };
            let cells = by_month
                .entry(month)
                .or_insert_with(|| vec![None; years.len()]);
            cells[idx] = Some(cells[idx].unwrap_or(0) + n);
        }

        let rows = by_month
            .into_iter()
            .map(|(month, counts)| MonthRow { month, counts })
            .collect();

        Self { years, rows }
    }

    /// Year columns, in request order.
    pub fn years(&self) -> &[YearTag] {
        &self.years
    }

    pub fn rows(&self) -> &[MonthRow] {
        &self.rows
    }

    /// Months present, ascending.
    pub fn months(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.month).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count for one cell; `None` when the cell is blank or absent.
    pub fn count(&self, month: i64, year: impl Into<YearTag>) -> Option<u32> {
        let year = year.into();
        let idx = self.years.iter().position(|y| *y == year)?;
        self.rows
            .iter()
            .find(|r| r.month == month)
            .and_then(|r| r.counts[idx])
    }

    /// Convert to a DataFrame: `MONTH` plus one nullable count column per year.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.years.len() + 1);
        columns.push(Column::new(MONTH_COLUMN.into(), self.months()));

        for (idx, year) in self.years.iter().enumerate() {
            let cells: Vec<Option<u32>> = self.rows.iter().map(|r| r.counts[idx]).collect();
            columns.push(Column::new(year.as_str().into(), cells));
        }

        DataFrame::new(columns)
    }
}
