//! `OpenMeteo` archive response structures and conversion utilities
//!
//! The archive API returns one array per daily variable, aligned with `time`.
//! Requests are made with °F, mph and inches, so values are stored as-is.

use crate::models::RawDailyRecord;
use crate::{KindredError, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// Historical weather response from the `OpenMeteo` archive API
#[derive(Debug, Deserialize)]
pub struct ArchiveResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub daily: Option<DailyData>,
}

/// Daily weather data from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<NaiveDate>,
    #[serde(default)]
    pub weather_code: Vec<Option<i32>>,
    #[serde(rename = "temperature_2m_max", default)]
    pub temperature_max: Vec<Option<f64>>,
    #[serde(rename = "temperature_2m_min", default)]
    pub temperature_min: Vec<Option<f64>>,
    #[serde(rename = "precipitation_sum", default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(rename = "wind_speed_10m_max", default)]
    pub wind_speed_max: Vec<Option<f64>>,
}

impl DailyData {
    /// Zip the variable arrays into per-day records. Short or absent arrays yield `None`.
    #[must_use]
    pub fn into_records(self) -> Vec<RawDailyRecord> {
        fn at(values: &[Option<f64>], i: usize) -> Option<f64> {
            values.get(i).copied().flatten()
        }

        self.time
            .iter()
            .enumerate()
            .map(|(i, date)| RawDailyRecord {
                date: *date,
                weather_code: self.weather_code.get(i).copied().flatten(),
                temperature_max: at(&self.temperature_max, i),
                temperature_min: at(&self.temperature_min, i),
                precipitation_sum: at(&self.precipitation, i),
                wind_speed_max: at(&self.wind_speed_max, i),
            })
            .collect()
    }
}

impl ArchiveResponse {
    /// Parse a raw archive response body
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| KindredError::archive(format!("Failed to parse OpenMeteo archive response: {e}")))
    }

    /// Daily records in response order. A response without a `daily` block has none.
    #[must_use]
    pub fn into_records(self) -> Vec<RawDailyRecord> {
        self.daily.map(DailyData::into_records).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "latitude": 30.27,
        "longitude": -97.74,
        "timezone": "America/New_York",
        "daily_units": {"time": "iso8601", "temperature_2m_max": "°F"},
        "daily": {
            "time": ["2024-04-04", "2024-04-05", "2024-04-06"],
            "weather_code": [0, 50, null],
            "temperature_2m_max": [80.1, 82.0, 79.5],
            "temperature_2m_min": [60.2, 61.0, 58.4],
            "precipitation_sum": [0.0, 0.12, 0.0],
            "wind_speed_10m_max": [9.4, 11.0]
        }
    }"#;

    #[test]
    fn test_parse_archive_response() {
        let response = ArchiveResponse::parse(BODY).unwrap();
        assert_eq!(response.latitude, 30.27);
        assert_eq!(response.timezone.as_deref(), Some("America/New_York"));

        let records = response.into_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 4, 4).unwrap());
        assert_eq!(records[0].weather_code, Some(0));
        assert_eq!(records[1].weather_code, Some(50));
        assert_eq!(records[1].precipitation_sum, Some(0.12));
        assert_eq!(records[0].temperature_max, Some(80.1));
    }

    #[test]
    fn test_nulls_and_short_arrays_become_missing() {
        let records = ArchiveResponse::parse(BODY).unwrap().into_records();
        assert_eq!(records[2].weather_code, None);
        assert_eq!(records[2].wind_speed_max, None);
        assert_eq!(records[2].temperature_min, Some(58.4));
    }

    #[test]
    fn test_missing_daily_block_has_no_records() {
        let response = ArchiveResponse::parse(r#"{"latitude": 1.0, "longitude": 2.0}"#).unwrap();
        assert!(response.into_records().is_empty());
    }

    #[test]
    fn test_invalid_body_is_archive_error() {
        let err = ArchiveResponse::parse("not json").unwrap_err();
        assert!(matches!(err, KindredError::Archive { .. }));
    }
}
