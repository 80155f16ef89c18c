//! Plot-ready projections of a series for an external renderer

use crate::models::WeatherSeries;
use crate::summary::round_tenth;
use crate::{KindredError, Result};
use serde::{Deserialize, Serialize};

/// One day on the temperature chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// 1-based position of the day in the series
    pub day_index: usize,
    pub temp_max: f64,
    pub temp_min: f64,
}

/// A labelled line pair for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

/// Both locations' series over the same day axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOverlay {
    pub first: ChartSeries,
    pub second: ChartSeries,
}

pub struct ChartDataProjector;

impl ChartDataProjector {
    /// Project a series into `(day_index, temp_max, temp_min)` points
    #[must_use]
    pub fn project(series: &WeatherSeries) -> Vec<ChartPoint> {
        series
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| ChartPoint {
                day_index: i + 1,
                temp_max: round_tenth(record.temp_max),
                temp_min: round_tenth(record.temp_min),
            })
            .collect()
    }

    #[must_use]
    pub fn series(series: &WeatherSeries) -> ChartSeries {
        ChartSeries {
            label: series.location_id().to_string(),
            points: Self::project(series),
        }
    }

    /// Pair two series on a shared day axis. Lengths must match.
    pub fn overlay(first: &WeatherSeries, second: &WeatherSeries) -> Result<ChartOverlay> {
        if first.len() != second.len() {
            return Err(KindredError::LengthMismatch {
                first: first.len(),
                second: second.len(),
            });
        }
        Ok(ChartOverlay {
            first: Self::series(first),
            second: Self::series(second),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyRecord, WeatherCode};
    use chrono::NaiveDate;

    fn series(id: &str, days: u32) -> WeatherSeries {
        let records = (1..=days)
            .map(|d| DailyRecord {
                date: NaiveDate::from_ymd_opt(2024, 4, d).unwrap(),
                code: WeatherCode(0),
                temp_max: 70.0 + f64::from(d) + 0.04,
                temp_min: 50.0 + f64::from(d) + 0.06,
                precipitation: 0.0,
                wind_max: 5.0,
            })
            .collect();
        WeatherSeries::new(id, records).unwrap()
    }

    #[test]
    fn test_project_indexes_from_one() {
        let points = ChartDataProjector::project(&series("Austin", 5));

        assert_eq!(points.len(), 5);
        let indexes: Vec<usize> = points.iter().map(|p| p.day_index).collect();
        assert_eq!(indexes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_project_rounds_to_one_decimal() {
        let points = ChartDataProjector::project(&series("Austin", 2));
        assert_eq!(points[0].temp_max, 71.0);
        assert_eq!(points[0].temp_min, 51.1);
        assert_eq!(points[1].temp_max, 72.0);
        assert_eq!(points[1].temp_min, 52.1);
    }

    #[test]
    fn test_overlay_labels_each_location() {
        let overlay =
            ChartDataProjector::overlay(&series("Chattanooga", 3), &series("Austin", 3)).unwrap();
        assert_eq!(overlay.first.label, "Chattanooga");
        assert_eq!(overlay.second.label, "Austin");
        assert_eq!(overlay.second.points.len(), 3);
    }

    #[test]
    fn test_overlay_requires_equal_length() {
        let err = ChartDataProjector::overlay(&series("Chattanooga", 3), &series("Austin", 2))
            .unwrap_err();
        assert!(matches!(
            err,
            KindredError::LengthMismatch {
                first: 3,
                second: 2
            }
        ));
    }
}
