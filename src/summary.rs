//! Descriptive statistics for one location's series

use crate::classifier::{Category, classify};
use crate::models::{DailyRecord, WeatherSeries};
use crate::{KindredError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Round to one decimal, half away from zero. Every reported value goes through this.
///
/// Not banker's rounding: 72.25 becomes 72.3, not 72.2.
#[must_use]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Day counts per category. Every category is present, zero when unseen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounts(BTreeMap<Category, u32>);

impl Default for CategoryCounts {
    fn default() -> Self {
        Self(Category::ALL.into_iter().map(|c| (c, 0)).collect())
    }
}

impl CategoryCounts {
    /// Tally categories of the given records
    #[must_use]
    pub fn tally(records: &[DailyRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            *counts.0.entry(classify(record.code)).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn get(&self, category: Category) -> u32 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Overwrite one category's count
    pub fn set(&mut self, category: Category, count: u32) {
        self.0.insert(category, count);
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
}

/// Immutable snapshot of one location's statistics. Numeric fields are rounded to 0.1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub location_id: String,
    pub day_count: usize,
    /// Mean daily maximum temperature in °F
    pub avg_temp_max: f64,
    /// Mean daily minimum temperature in °F
    pub avg_temp_min: f64,
    /// Highest daily maximum in °F
    pub max_temp: f64,
    /// Lowest daily minimum in °F
    pub min_temp: f64,
    /// Total precipitation in inches
    pub total_precip: f64,
    /// Mean daily maximum wind speed in mph
    pub avg_wind: f64,
    /// Highest daily maximum wind speed in mph
    pub max_wind: f64,
    pub category_counts: CategoryCounts,
}

/// Builds [`WeatherSummary`] values
pub struct SummaryBuilder;

impl SummaryBuilder {
    /// Summarize a validated series
    pub fn build(series: &WeatherSeries) -> Result<WeatherSummary> {
        Self::summarize(series.location_id(), series.records())
    }

    /// Summarize raw records. Fails with `EmptySeries` when `records` is empty.
    pub fn summarize(location_id: &str, records: &[DailyRecord]) -> Result<WeatherSummary> {
        if records.is_empty() {
            return Err(KindredError::empty_series(location_id));
        }

        let days = records.len() as f64;
        let mean = |f: fn(&DailyRecord) -> f64| records.iter().map(f).sum::<f64>() / days;
        let max = |f: fn(&DailyRecord) -> f64| records.iter().map(f).fold(f64::MIN, f64::max);
        let min = |f: fn(&DailyRecord) -> f64| records.iter().map(f).fold(f64::MAX, f64::min);

        let summary = WeatherSummary {
            location_id: location_id.to_string(),
            day_count: records.len(),
            avg_temp_max: round_tenth(mean(|r| r.temp_max)),
            avg_temp_min: round_tenth(mean(|r| r.temp_min)),
            max_temp: round_tenth(max(|r| r.temp_max)),
            min_temp: round_tenth(min(|r| r.temp_min)),
            total_precip: round_tenth(records.iter().map(|r| r.precipitation).sum()),
            avg_wind: round_tenth(mean(|r| r.wind_max)),
            max_wind: round_tenth(max(|r| r.wind_max)),
            category_counts: CategoryCounts::tally(records),
        };

        debug!(
            location = location_id,
            days = summary.day_count,
            unclassified = summary.category_counts.get(Category::Unclassified),
            "Built weather summary"
        );

        Ok(summary)
    }
}
