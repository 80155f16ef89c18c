//! Daily weather records and per-location series

use crate::{KindredError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// WMO weather code reported for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(pub i32);

/// Inclusive date range shared by both locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(KindredError::validation(format!(
                "Start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of calendar days in the range
    #[must_use]
    pub fn day_count(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One day as supplied by a retrieval collaborator, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDailyRecord {
    pub date: NaiveDate,
    pub weather_code: Option<i32>,
    /// Maximum temperature in °F
    pub temperature_max: Option<f64>,
    /// Minimum temperature in °F
    pub temperature_min: Option<f64>,
    /// Precipitation sum in inches
    pub precipitation_sum: Option<f64>,
    /// Maximum wind speed in mph
    pub wind_speed_max: Option<f64>,
}

/// A validated day of weather
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub code: WeatherCode,
    /// Maximum temperature in °F
    pub temp_max: f64,
    /// Minimum temperature in °F
    pub temp_min: f64,
    /// Precipitation sum in inches, never negative
    pub precipitation: f64,
    /// Maximum wind speed in mph, never negative
    pub wind_max: f64,
}

impl DailyRecord {
    /// Validate a raw record. Missing or non-finite numbers fail; unknown codes pass through.
    pub fn from_raw(location: &str, raw: &RawDailyRecord) -> Result<Self> {
        let date = raw.date;
        let code = raw
            .weather_code
            .ok_or_else(|| KindredError::malformed(location, date, "weather_code", "is missing"))?;

        Ok(Self {
            date,
            code: WeatherCode(code),
            temp_max: required(location, date, "temperature_2m_max", raw.temperature_max)?,
            temp_min: required(location, date, "temperature_2m_min", raw.temperature_min)?,
            precipitation: non_negative(
                location,
                date,
                "precipitation_sum",
                raw.precipitation_sum,
            )?,
            wind_max: non_negative(location, date, "wind_speed_10m_max", raw.wind_speed_max)?,
        })
    }
}

fn required(
    location: &str,
    date: NaiveDate,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64> {
    match value {
        None => Err(KindredError::malformed(location, date, field, "is missing")),
        Some(v) if !v.is_finite() => Err(KindredError::malformed(
            location,
            date,
            field,
            format!("is not a finite number ({v})"),
        )),
        Some(v) => Ok(v),
    }
}

fn non_negative(
    location: &str,
    date: NaiveDate,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64> {
    let v = required(location, date, field, value)?;
    if v < 0.0 {
        return Err(KindredError::malformed(
            location,
            date,
            field,
            format!("is negative ({v})"),
        ));
    }
    Ok(v)
}

/// Ordered, non-empty daily records for one location. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSeries {
    location_id: String,
    records: Vec<DailyRecord>,
}

impl WeatherSeries {
    /// Build a series from validated records.
    ///
    /// Fails with `EmptySeries` when there are no records and `UnorderedSeries`
    /// when a date does not strictly follow its predecessor.
    pub fn new<S: Into<String>>(location_id: S, records: Vec<DailyRecord>) -> Result<Self> {
        let location_id = location_id.into();
        if records.is_empty() {
            return Err(KindredError::empty_series(location_id));
        }

        if let Some(pair) = records.windows(2).find(|pair| pair[1].date <= pair[0].date) {
            return Err(KindredError::UnorderedSeries {
                location: location_id,
                date: pair[1].date,
            });
        }

        Ok(Self {
            location_id,
            records,
        })
    }

    /// Validate collaborator-supplied records and build a series from them
    pub fn from_raw<S: Into<String>>(location_id: S, raw: &[RawDailyRecord]) -> Result<Self> {
        let location_id = location_id.into();
        let records = raw
            .iter()
            .map(|r| DailyRecord::from_raw(&location_id, r))
            .collect::<Result<Vec<_>>>()?;
        Self::new(location_id, records)
    }

    #[must_use]
    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    #[must_use]
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed series
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }
}
