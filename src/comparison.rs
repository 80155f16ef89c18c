//! Two-location comparison pipeline
//!
//! Each location runs resolve → retrieve → validate → summarize → project on
//! its own. Both pipelines are polled concurrently and fail independently;
//! scoring only happens once both have produced a summary.

use crate::chart::{ChartDataProjector, ChartOverlay, ChartSeries};
use crate::location_resolver::LocationResolver;
use crate::models::{DateRange, Location, LocationQuery, WeatherSeries};
use crate::similarity::{SimilarityResult, SimilarityScorer};
use crate::summary::{SummaryBuilder, WeatherSummary};
use crate::weather::WeatherArchiveClient;
use crate::{KindredError, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Everything produced for one location
#[derive(Debug, Clone, Serialize)]
pub struct LocationReport {
    pub query: LocationQuery,
    pub location: Location,
    pub summary: WeatherSummary,
    pub chart: ChartSeries,
    #[serde(skip)]
    pub series: WeatherSeries,
}

/// Outcome of comparing two locations over one date range
#[derive(Debug)]
pub struct ClimateComparison {
    pub range: DateRange,
    pub first: Result<LocationReport>,
    pub second: Result<LocationReport>,
    /// `None` when either pipeline failed
    pub similarity: Option<Result<SimilarityResult>>,
}

impl ClimateComparison {
    /// Both pipelines and the scoring step succeeded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.first.is_ok() && self.second.is_ok() && matches!(self.similarity, Some(Ok(_)))
    }

    /// Chart payload with both locations on one day axis
    #[must_use]
    pub fn chart_overlay(&self) -> Option<Result<ChartOverlay>> {
        match (&self.first, &self.second) {
            (Ok(first), Ok(second)) => {
                Some(ChartDataProjector::overlay(&first.series, &second.series))
            }
            _ => None,
        }
    }

    /// Every error raised along the way, in pipeline order
    #[must_use]
    pub fn errors(&self) -> Vec<&KindredError> {
        let mut errors = Vec::new();
        if let Err(e) = &self.first {
            errors.push(e);
        }
        if let Err(e) = &self.second {
            errors.push(e);
        }
        if let Some(Err(e)) = &self.similarity {
            errors.push(e);
        }
        errors
    }
}

/// Runs the two location pipelines and scores the result
pub struct ClimateComparer {
    resolver: Arc<dyn LocationResolver>,
    archive: Arc<dyn WeatherArchiveClient>,
    scorer: SimilarityScorer,
}

impl ClimateComparer {
    pub fn new(
        resolver: Arc<dyn LocationResolver>,
        archive: Arc<dyn WeatherArchiveClient>,
        scorer: SimilarityScorer,
    ) -> Self {
        Self {
            resolver,
            archive,
            scorer,
        }
    }

    #[must_use]
    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Compare two locations over `range`
    #[instrument(skip_all, fields(first = %first, second = %second))]
    pub async fn compare(
        &self,
        first: &LocationQuery,
        second: &LocationQuery,
        range: DateRange,
    ) -> ClimateComparison {
        let (first, second) = tokio::join!(
            self.run_pipeline(first, range),
            self.run_pipeline(second, range)
        );

        let similarity = match (&first, &second) {
            (Ok(a), Ok(b)) => Some(self.score(a, b)),
            _ => None,
        };

        if let Some(Ok(result)) = &similarity {
            info!(
                score = result.score,
                max_score = result.max_score,
                verdict = ?result.verdict,
                "Scored location similarity"
            );
        }

        ClimateComparison {
            range,
            first,
            second,
            similarity,
        }
    }

    async fn run_pipeline(&self, query: &LocationQuery, range: DateRange) -> Result<LocationReport> {
        let report = self.build_report(query, range).await;
        if let Err(e) = &report {
            warn!("Pipeline for {} failed: {}", query, e);
        }
        report
    }

    async fn build_report(&self, query: &LocationQuery, range: DateRange) -> Result<LocationReport> {
        let location = self.resolver.resolve(query).await?;
        let raw = self.archive.daily_records(&location, range).await?;
        let series = WeatherSeries::from_raw(location.id(), &raw)?;

        if series.len() != range.day_count() {
            warn!(
                "{} returned {} days for a {} day range",
                location.id(),
                series.len(),
                range.day_count()
            );
        }

        let summary = SummaryBuilder::build(&series)?;
        let chart = ChartDataProjector::series(&series);
        info!("Summarized {} days for {}", summary.day_count, location.id());

        Ok(LocationReport {
            query: query.clone(),
            location,
            summary,
            chart,
            series,
        })
    }

    fn score(&self, first: &LocationReport, second: &LocationReport) -> Result<SimilarityResult> {
        if first.series.len() != second.series.len() {
            return Err(KindredError::LengthMismatch {
                first: first.series.len(),
                second: second.series.len(),
            });
        }
        Ok(self.scorer.compare(&first.summary, &second.summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;
    use crate::location_resolver::{GazetteerEntry, GazetteerResolver};
    use crate::models::RawDailyRecord;
    use crate::similarity::Verdict;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    /// Archive keyed by location name returning canned records
    struct CannedArchive {
        days: HashMap<String, Vec<RawDailyRecord>>,
    }

    #[async_trait]
    impl WeatherArchiveClient for CannedArchive {
        async fn daily_records(
            &self,
            location: &Location,
            range: DateRange,
        ) -> Result<Vec<RawDailyRecord>> {
            let records = self
                .days
                .get(&location.name)
                .ok_or_else(|| KindredError::archive("no data"))?;
            Ok(records
                .iter()
                .filter(|r| range.contains(r.date))
                .cloned()
                .collect())
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn raw(d: u32, code: i32, max: f64, min: f64) -> RawDailyRecord {
        RawDailyRecord {
            date: day(d),
            weather_code: Some(code),
            temperature_max: Some(max),
            temperature_min: Some(min),
            precipitation_sum: Some(0.1),
            wind_speed_max: Some(8.0),
        }
    }

    fn entry(city: &str, region: &str, lat: f64, lon: f64) -> GazetteerEntry {
        GazetteerEntry {
            city: city.to_string(),
            region: region.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn comparer(days: HashMap<String, Vec<RawDailyRecord>>) -> ClimateComparer {
        let resolver = GazetteerResolver::new(vec![
            entry("Chattanooga", "Tennessee", 35.0456, -85.3097),
            entry("Austin", "Texas", 30.2672, -97.7431),
            entry("Nowhere", "Texas", 31.0, -99.0),
        ]);
        ClimateComparer::new(
            Arc::new(resolver),
            Arc::new(CannedArchive { days }),
            SimilarityScorer::default(),
        )
    }

    fn range() -> DateRange {
        DateRange::new(day(4), day(6)).unwrap()
    }

    fn chattanooga() -> LocationQuery {
        LocationQuery::new("Chattanooga", "Tennessee")
    }

    fn austin() -> LocationQuery {
        LocationQuery::new("Austin", "Texas")
    }

    fn standard_days() -> HashMap<String, Vec<RawDailyRecord>> {
        HashMap::from([
            (
                "Chattanooga".to_string(),
                vec![raw(4, 0, 70.0, 50.0), raw(5, 3, 72.0, 52.0), raw(6, 1, 74.0, 54.0)],
            ),
            (
                "Austin".to_string(),
                vec![raw(4, 0, 75.0, 55.0), raw(5, 2, 77.0, 57.0), raw(6, 0, 79.0, 59.0)],
            ),
        ])
    }

    #[tokio::test]
    async fn test_compare_two_locations() {
        let comparison = comparer(standard_days())
            .compare(&chattanooga(), &austin(), range())
            .await;

        assert!(comparison.is_complete());
        assert!(comparison.errors().is_empty());

        let first = comparison.first.as_ref().unwrap();
        assert_eq!(first.summary.location_id, "Chattanooga, Tennessee");
        assert_eq!(first.summary.avg_temp_max, 72.0);
        assert_eq!(first.chart.points.len(), 3);

        let similarity = comparison.similarity.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(similarity.max_score, 12);
        assert_eq!(similarity.score, 12);
        assert_eq!(similarity.verdict, Verdict::Similar);

        let overlay = comparison.chart_overlay().unwrap().unwrap();
        assert_eq!(overlay.second.label, "Austin, Texas");
    }

    #[tokio::test]
    async fn test_unknown_location_fails_only_its_pipeline() {
        let comparison = comparer(standard_days())
            .compare(&LocationQuery::new("Atlantis", "Ocean"), &austin(), range())
            .await;

        assert!(matches!(
            comparison.first,
            Err(KindredError::LocationNotFound { .. })
        ));
        assert!(comparison.second.is_ok());
        assert!(comparison.similarity.is_none());
        assert!(comparison.chart_overlay().is_none());
        assert_eq!(comparison.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_archive_is_empty_series() {
        let mut days = standard_days();
        days.insert("Nowhere".to_string(), vec![raw(20, 0, 70.0, 50.0)]);

        let comparison = comparer(days)
            .compare(&chattanooga(), &LocationQuery::new("Nowhere", "Texas"), range())
            .await;

        assert!(comparison.first.is_ok());
        assert!(matches!(
            comparison.second,
            Err(KindredError::EmptySeries { .. })
        ));
    }

    #[tokio::test]
    async fn test_length_mismatch_fails_scoring() {
        let mut days = standard_days();
        days.insert(
            "Austin".to_string(),
            vec![raw(4, 0, 75.0, 55.0), raw(5, 2, 77.0, 57.0)],
        );

        let comparison = comparer(days)
            .compare(&chattanooga(), &austin(), range())
            .await;

        assert!(comparison.first.is_ok());
        assert!(comparison.second.is_ok());
        assert!(matches!(
            comparison.similarity,
            Some(Err(KindredError::LengthMismatch {
                first: 3,
                second: 2
            }))
        ));
        assert!(matches!(
            comparison.chart_overlay(),
            Some(Err(KindredError::LengthMismatch { .. }))
        ));
        assert!(!comparison.is_complete());
    }

    #[tokio::test]
    async fn test_malformed_record_fails_pipeline() {
        let mut days = standard_days();
        let mut broken = raw(5, 2, 77.0, 57.0);
        broken.wind_speed_max = None;
        days.insert(
            "Austin".to_string(),
            vec![raw(4, 0, 75.0, 55.0), broken, raw(6, 0, 79.0, 59.0)],
        );

        let comparison = comparer(days)
            .compare(&chattanooga(), &austin(), range())
            .await;

        assert!(matches!(
            comparison.second,
            Err(KindredError::MalformedRecord {
                field: "wind_speed_10m_max",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_unrecognized_code_is_tolerated() {
        let mut days = standard_days();
        days.insert(
            "Austin".to_string(),
            vec![raw(4, 50, 75.0, 55.0), raw(5, 2, 77.0, 57.0), raw(6, 0, 79.0, 59.0)],
        );

        let comparison = comparer(days)
            .compare(&chattanooga(), &austin(), range())
            .await;

        let austin = comparison.second.as_ref().unwrap();
        let counts = &austin.summary.category_counts;
        assert_eq!(counts.get(Category::Unclassified), 1);
        assert_eq!(counts.get(Category::Clear), 1);
        assert_eq!(counts.get(Category::Cloudy), 1);
    }
}
