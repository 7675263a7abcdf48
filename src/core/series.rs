use crate::core::convert::ConvertedColumns;
use crate::domain::model::{ProfileColumn, ProfileSeries, TimeSeries, Timeline, Unit};

/// Row `i` becomes hour `i` of the timeline. Length is not checked here.
pub fn build_series(values: Vec<f64>, unit: Unit, timeline: Timeline) -> TimeSeries {
    TimeSeries::new(timeline, values, unit)
}

/// One series per output column, in registration order.
pub fn build_profile_series(
    mut columns: ConvertedColumns,
    timeline: Timeline,
) -> Vec<ProfileSeries> {
    ProfileColumn::ALL
        .iter()
        .map(|&column| ProfileSeries {
            column,
            series: build_series(columns.take(column), column.unit(), timeline),
        })
        .collect()
}
