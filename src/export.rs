//! Combines several variables' series into one table keyed by calendar date.

use crate::types::series::HistoricalSeries;
use crate::NimbusError;
use chrono::NaiveDate;
use polars::prelude::*;
use std::io::Write;

pub const DATE_COLUMN: &str = "date";

fn series_frame(label: &str, series: &HistoricalSeries) -> Result<LazyFrame, NimbusError> {
    let dates: Vec<NaiveDate> = series.iter().map(|s| s.date).collect();
    let values: Vec<f64> = series.values().collect();
    let frame = DataFrame::new(vec![
        Column::new(DATE_COLUMN.into(), dates),
        Column::new(label.into(), values),
    ])?;
    Ok(frame.lazy())
}

/// Outer-joins `columns` on calendar date.
///
/// The result has a `date` column followed by one `f64` column per entry, named
/// after its label, sorted by date. A date missing from a series is a null in
/// that series' column, never a zero.
///
/// # Examples
///
/// ```
/// use nimbus::{merge_series, HistoricalSeries, YearSample};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), nimbus::NimbusError> {
/// let sample = |year, value| YearSample {
///     year,
///     date: NaiveDate::from_ymd_opt(year, 1, 15).unwrap(),
///     value,
/// };
/// let rain = HistoricalSeries::new(vec![sample(2020, 1.5), sample(2021, 0.0)]);
/// let wind = HistoricalSeries::new(vec![sample(2021, 12.0)]);
///
/// let frame = merge_series(&[("rain", &rain), ("wind", &wind)])?;
/// assert_eq!(frame.height(), 2);
/// assert_eq!(frame.column("wind")?.null_count(), 1);
/// # Ok(())
/// # }
/// ```
pub fn merge_series(columns: &[(&str, &HistoricalSeries)]) -> Result<DataFrame, NimbusError> {
    let mut frames = columns
        .iter()
        .map(|(label, series)| series_frame(label, series));

    let Some(first) = frames.next().transpose()? else {
        let dates: Vec<NaiveDate> = Vec::new();
        return Ok(DataFrame::new(vec![Column::new(DATE_COLUMN.into(), dates)])?);
    };

    let joined = frames.try_fold(first, |acc, next| {
        Ok::<_, NimbusError>(acc.join(
            next?,
            [col(DATE_COLUMN)],
            [col(DATE_COLUMN)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        ))
    })?;

    Ok(joined
        .sort_by_exprs([col(DATE_COLUMN)], SortMultipleOptions::default())
        .collect()?)
}

/// Writes `frame` as comma separated text with a header row. Nulls become
/// empty cells.
pub fn write_csv<W: Write>(frame: &mut DataFrame, writer: W) -> Result<(), NimbusError> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_date_format(Some("%Y-%m-%d".to_string()))
        .finish(frame)?;
    Ok(())
}
