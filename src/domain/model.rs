use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// CSV 的七個欄位名稱，順序不重要，以名稱查找
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "timestep",
    "chw_supply_temp_f",
    "chw_flow_fraction",
    "chw_load_w",
    "hw_supply_temp_f",
    "hw_flow_fraction",
    "hw_load_w",
];

/// Hours in a non-leap year.
pub const HOURS_PER_YEAR: usize = 8760;

pub const DEFAULT_REFERENCE_YEAR: i32 = 2009;

/// One hour of the annual profile. The hour index comes from row order,
/// `timestep` is read but never consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub timestep: Option<u32>,
    pub chw_supply_temp_f: f64,
    pub chw_flow_fraction: f64,
    pub chw_load_w: f64,
    pub hw_supply_temp_f: f64,
    pub hw_flow_fraction: f64,
    pub hw_load_w: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "C")]
    Celsius,
    Fraction,
    #[serde(rename = "W")]
    Watts,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Celsius => "C",
            Unit::Fraction => "Fraction",
            Unit::Watts => "W",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed annual timeline shared by every series of a run: January 1st of the
/// reference year at 00:00, stepping one hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    start: NaiveDateTime,
    interval: TimeDelta,
}

impl Timeline {
    /// Returns `None` for a year chrono cannot represent.
    pub fn hourly(reference_year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(reference_year, 1, 1)?.and_hms_opt(0, 0, 0)?;
        Some(Self {
            start,
            interval: TimeDelta::hours(1),
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn interval(&self) -> TimeDelta {
        self.interval
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(DEFAULT_REFERENCE_YEAR, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            interval: TimeDelta::hours(1),
        }
    }
}

/// Immutable fixed-interval series. Built by `core::series::build_series`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timeline: Timeline,
    values: Vec<f64>,
    unit: Unit,
}

impl TimeSeries {
    pub(crate) fn new(timeline: Timeline, values: Vec<f64>, unit: Unit) -> Self {
        Self {
            timeline,
            values,
            unit,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.timeline.start()
    }

    pub fn interval(&self) -> TimeDelta {
        self.timeline.interval()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `None` when the offset does not fit the calendar.
    pub fn timestamp_at(&self, index: usize) -> Option<NaiveDateTime> {
        let steps = i32::try_from(index).ok()?;
        let offset = self.interval().checked_mul(steps)?;
        self.start().checked_add_signed(offset)
    }

    /// (timestamp, value) pairs in hour order.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map_while(|(i, v)| self.timestamp_at(i).map(|t| (t, *v)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleId(pub usize);

/// A named schedule accepted by the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    pub series: TimeSeries,
}

/// The six output columns, in the order they are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileColumn {
    ChwSupplyTemp,
    HwSupplyTemp,
    ChwFlowFraction,
    HwFlowFraction,
    ChwLoad,
    HwLoad,
}

impl ProfileColumn {
    pub const ALL: [ProfileColumn; 6] = [
        ProfileColumn::ChwSupplyTemp,
        ProfileColumn::HwSupplyTemp,
        ProfileColumn::ChwFlowFraction,
        ProfileColumn::HwFlowFraction,
        ProfileColumn::ChwLoad,
        ProfileColumn::HwLoad,
    ];

    pub fn schedule_name(&self) -> &'static str {
        match self {
            ProfileColumn::ChwSupplyTemp => "ChW Supply Outlet Temp Schedule",
            ProfileColumn::HwSupplyTemp => "HW Supply Outlet Temp Schedule",
            ProfileColumn::ChwFlowFraction => "ChW Load Profile - Flow Fraction Schedule",
            ProfileColumn::HwFlowFraction => "HW Load Profile - Flow Fraction Schedule",
            ProfileColumn::ChwLoad => "ChW Load Profile - Load Schedule (Watts)",
            ProfileColumn::HwLoad => "HW Load Profile - Load Schedule (Watts)",
        }
    }

    pub fn unit(&self) -> Unit {
        match self {
            ProfileColumn::ChwSupplyTemp | ProfileColumn::HwSupplyTemp => Unit::Celsius,
            ProfileColumn::ChwFlowFraction | ProfileColumn::HwFlowFraction => Unit::Fraction,
            ProfileColumn::ChwLoad | ProfileColumn::HwLoad => Unit::Watts,
        }
    }

    /// CSV column the values come from.
    pub fn source_column(&self) -> &'static str {
        match self {
            ProfileColumn::ChwSupplyTemp => "chw_supply_temp_f",
            ProfileColumn::HwSupplyTemp => "hw_supply_temp_f",
            ProfileColumn::ChwFlowFraction => "chw_flow_fraction",
            ProfileColumn::HwFlowFraction => "hw_flow_fraction",
            ProfileColumn::ChwLoad => "chw_load_w",
            ProfileColumn::HwLoad => "hw_load_w",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSeries {
    pub column: ProfileColumn,
    pub series: TimeSeries,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub file: String,
    pub rows: usize,
    pub attempted: Vec<String>,
    pub created: Vec<String>,
    pub skipped: Vec<String>,
    pub schedules_before: usize,
    pub schedules_after: usize,
}

impl RunReport {
    pub fn to_json(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
