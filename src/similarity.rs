//! Similarity scoring between two locations' summaries
//!
//! A [`SimilarityScorer`] walks an ordered list of [`Criterion`] values. Each
//! criterion picks one statistic from both summaries and either requires the
//! absolute difference to be strictly below a threshold or requires an exact
//! match. The score is the number of passing criteria.

use crate::classifier::Category;
use crate::summary::WeatherSummary;
use crate::{KindredError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict threshold used when none is configured
pub const DEFAULT_SIMILAR_THRESHOLD: u32 = 10;

/// Summary field a criterion reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    AvgTempMax,
    AvgTempMin,
    MaxTemp,
    MinTemp,
    TotalPrecip,
    AvgWind,
    MaxWind,
    CategoryCount(Category),
}

impl Statistic {
    /// Read this statistic from a summary
    #[must_use]
    pub fn value(&self, summary: &WeatherSummary) -> f64 {
        match self {
            Self::AvgTempMax => summary.avg_temp_max,
            Self::AvgTempMin => summary.avg_temp_min,
            Self::MaxTemp => summary.max_temp,
            Self::MinTemp => summary.min_temp,
            Self::TotalPrecip => summary.total_precip,
            Self::AvgWind => summary.avg_wind,
            Self::MaxWind => summary.max_wind,
            Self::CategoryCount(category) => f64::from(summary.category_counts.get(*category)),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AvgTempMax => f.write_str("avg_temp_max"),
            Self::AvgTempMin => f.write_str("avg_temp_min"),
            Self::MaxTemp => f.write_str("max_temp"),
            Self::MinTemp => f.write_str("min_temp"),
            Self::TotalPrecip => f.write_str("total_precip"),
            Self::AvgWind => f.write_str("avg_wind"),
            Self::MaxWind => f.write_str("max_wind"),
            Self::CategoryCount(category) => {
                write!(f, "{}_days", category.description().to_lowercase())
            }
        }
    }
}

/// How the two values of a statistic are compared
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Comparison {
    /// `|a - b| < threshold`
    Within { threshold: f64 },
    /// `a == b`
    Exact,
}

/// One scoring rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub statistic: Statistic,
    pub comparison: Comparison,
}

impl Criterion {
    #[must_use]
    pub const fn within(statistic: Statistic, threshold: f64) -> Self {
        Self {
            statistic,
            comparison: Comparison::Within { threshold },
        }
    }

    #[must_use]
    pub const fn exact(statistic: Statistic) -> Self {
        Self {
            statistic,
            comparison: Comparison::Exact,
        }
    }

    /// The twelve historical criteria: five temperature/precipitation checks
    /// within 10, two wind checks within 5, then exact day counts for Clear,
    /// Foggy, Cloudy, Snowy and Stormy. Rainy days are not scored by default.
    #[must_use]
    pub fn default_set() -> Vec<Criterion> {
        vec![
            Self::within(Statistic::AvgTempMax, 10.0),
            Self::within(Statistic::AvgTempMin, 10.0),
            Self::within(Statistic::MaxTemp, 10.0),
            Self::within(Statistic::MinTemp, 10.0),
            Self::within(Statistic::TotalPrecip, 10.0),
            Self::within(Statistic::AvgWind, 5.0),
            Self::within(Statistic::MaxWind, 5.0),
            Self::exact(Statistic::CategoryCount(Category::Clear)),
            Self::exact(Statistic::CategoryCount(Category::Foggy)),
            Self::exact(Statistic::CategoryCount(Category::Cloudy)),
            Self::exact(Statistic::CategoryCount(Category::Snowy)),
            Self::exact(Statistic::CategoryCount(Category::Stormy)),
        ]
    }

    /// Evaluate against two summaries.
    ///
    /// Summary values carry one decimal, so both sides and the threshold are
    /// compared as whole tenths; a difference of exactly the threshold fails.
    /// A non-finite value on either side fails the criterion.
    #[must_use]
    pub fn passes(&self, first: &WeatherSummary, second: &WeatherSummary) -> bool {
        let (a, b) = (self.statistic.value(first), self.statistic.value(second));
        if !a.is_finite() || !b.is_finite() {
            return false;
        }
        let diff = (to_tenths(a) - to_tenths(b)).abs();
        match self.comparison {
            Comparison::Within { threshold } => diff < to_tenths(threshold),
            Comparison::Exact => diff == 0,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Comparison::Within { threshold } = self.comparison {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(KindredError::config(format!(
                    "Threshold for {} must be a positive number, got {threshold}",
                    self.statistic
                )));
            }
            // Compared in tenths, so the threshold must be a whole number of them
            let off_grid = (threshold * 10.0 - to_tenths(threshold) as f64).abs() > 1e-9;
            if to_tenths(threshold) < 1 || off_grid {
                return Err(KindredError::config(format!(
                    "Threshold for {} must be a multiple of 0.1, got {threshold}",
                    self.statistic
                )));
            }
        }
        Ok(())
    }
}

fn to_tenths(value: f64) -> i64 {
    (value * 10.0).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Similar,
    Dissimilar,
}

/// Outcome of comparing two summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub score: u32,
    pub max_score: u32,
    /// One entry per criterion, in criterion order
    pub per_criterion_pass: Vec<bool>,
    pub verdict: Verdict,
}

/// Scores summaries against a fixed, ordered list of criteria
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityScorer {
    criteria: Vec<Criterion>,
    similar_threshold: u32,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self {
            criteria: Criterion::default_set(),
            similar_threshold: DEFAULT_SIMILAR_THRESHOLD,
        }
    }
}

impl SimilarityScorer {
    /// Create a scorer. The verdict is `Similar` when at least `similar_threshold` criteria pass.
    pub fn new(criteria: Vec<Criterion>, similar_threshold: u32) -> Result<Self> {
        if criteria.is_empty() {
            return Err(KindredError::config("At least one similarity criterion is required"));
        }
        for criterion in &criteria {
            criterion.validate()?;
        }
        if similar_threshold as usize > criteria.len() {
            return Err(KindredError::config(format!(
                "Similar threshold {similar_threshold} exceeds the {} configured criteria",
                criteria.len()
            )));
        }
        Ok(Self {
            criteria,
            similar_threshold,
        })
    }

    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    #[must_use]
    pub fn similar_threshold(&self) -> u32 {
        self.similar_threshold
    }

    /// Score two summaries. Pure; the argument order does not change the result.
    #[must_use]
    pub fn compare(&self, first: &WeatherSummary, second: &WeatherSummary) -> SimilarityResult {
        let per_criterion_pass: Vec<bool> = self
            .criteria
            .iter()
            .map(|criterion| criterion.passes(first, second))
            .collect();

        let score = u32::try_from(per_criterion_pass.iter().filter(|pass| **pass).count())
            .unwrap_or(u32::MAX);
        let max_score = u32::try_from(self.criteria.len()).unwrap_or(u32::MAX);
        let verdict = if score >= self.similar_threshold {
            Verdict::Similar
        } else {
            Verdict::Dissimilar
        };

        SimilarityResult {
            score,
            max_score,
            per_criterion_pass,
            verdict,
        }
    }
}
