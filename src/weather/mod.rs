//! Daily weather retrieval
//!
//! [`WeatherArchiveClient`] is the seam to whatever supplies historical daily
//! records. The comparison pipeline only depends on the trait; the crate ships
//! [`ArchiveDirectoryClient`], which serves saved `OpenMeteo` archive responses.

use crate::models::{DateRange, Location, RawDailyRecord};
use crate::{KindredError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, instrument};

pub mod open_meteo;

use open_meteo::ArchiveResponse;

/// Supplies raw daily records for a location and inclusive date range.
///
/// Implementations return records in ascending date order, one per day.
#[async_trait]
pub trait WeatherArchiveClient: Send + Sync {
    async fn daily_records(
        &self,
        location: &Location,
        range: DateRange,
    ) -> Result<Vec<RawDailyRecord>>;
}

/// Reads `OpenMeteo` archive responses saved as `<root>/archive_<lat>_<lon>.json`
#[derive(Debug, Clone)]
pub struct ArchiveDirectoryClient {
    root: PathBuf,
}

impl ArchiveDirectoryClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File holding the archived response for a location
    #[must_use]
    pub fn path_for(&self, location: &Location) -> PathBuf {
        self.root.join(format!("{}.json", location.archive_key()))
    }
}

#[async_trait]
impl WeatherArchiveClient for ArchiveDirectoryClient {
    #[instrument(skip(self, location), fields(location = %location.id()))]
    async fn daily_records(
        &self,
        location: &Location,
        range: DateRange,
    ) -> Result<Vec<RawDailyRecord>> {
        let path = self.path_for(location);
        debug!("Reading archived weather from {}", path.display());

        let body = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KindredError::archive(format!(
                    "No archived weather for {} at {}",
                    location.id(),
                    path.display()
                ))
            } else {
                KindredError::from(e)
            }
        })?;

        let records: Vec<RawDailyRecord> = ArchiveResponse::parse(&body)?
            .into_records()
            .into_iter()
            .filter(|record| range.contains(record.date))
            .collect();

        debug!(
            "Loaded {} of {} requested days",
            records.len(),
            range.day_count()
        );
        Ok(records)
    }
}
