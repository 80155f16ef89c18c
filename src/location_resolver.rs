//! Location Resolution Module
//!
//! This module handles resolving "(city, region)" queries into coordinates.
//! Absence is terminal for that location's pipeline.

use crate::models::{Location, LocationQuery};
use crate::{KindredError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resolves a city and region into coordinates
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Fails with `LocationNotFound` when the query has no match
    async fn resolve(&self, query: &LocationQuery) -> Result<Location>;
}

/// A known place with fixed coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    pub city: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GazetteerEntry {
    fn matches(&self, query: &LocationQuery) -> bool {
        self.city.trim().eq_ignore_ascii_case(query.city.trim())
            && self.region.trim().eq_ignore_ascii_case(query.region.trim())
    }
}

/// Resolver over a fixed list of places, matched case-insensitively
#[derive(Debug, Clone, Default)]
pub struct GazetteerResolver {
    entries: Vec<GazetteerEntry>,
}

impl GazetteerResolver {
    #[must_use]
    pub fn new(entries: Vec<GazetteerEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl LocationResolver for GazetteerResolver {
    async fn resolve(&self, query: &LocationQuery) -> Result<Location> {
        debug!("Resolving location: {}", query);

        let entry = self
            .entries
            .iter()
            .find(|entry| entry.matches(query))
            .ok_or_else(|| KindredError::location_not_found(query.to_string()))?;

        let location = Location::with_region(
            entry.latitude,
            entry.longitude,
            entry.city.clone(),
            entry.region.clone(),
        );
        debug!(
            "Resolved location: {} at ({}, {})",
            location.id(),
            location.latitude,
            location.longitude
        );

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> GazetteerResolver {
        GazetteerResolver::new(vec![
            GazetteerEntry {
                city: "Chattanooga".to_string(),
                region: "Tennessee".to_string(),
                latitude: 35.0456,
                longitude: -85.3097,
            },
            GazetteerEntry {
                city: "Austin".to_string(),
                region: "Texas".to_string(),
                latitude: 30.2672,
                longitude: -97.7431,
            },
        ])
    }

    #[tokio::test]
    async fn test_resolve_known_city() {
        let location = resolver()
            .resolve(&LocationQuery::new("austin", "TEXAS"))
            .await
            .unwrap();

        assert_eq!(location.name, "Austin");
        assert_eq!(location.region.as_deref(), Some("Texas"));
        assert_eq!(location.latitude, 30.2672);
        assert_eq!(location.longitude, -97.7431);
    }

    #[tokio::test]
    async fn test_region_must_match() {
        let err = resolver()
            .resolve(&LocationQuery::new("Austin", "Minnesota"))
            .await
            .unwrap_err();
        assert!(matches!(err, KindredError::LocationNotFound { query } if query == "Austin, Minnesota"));
    }

    #[tokio::test]
    async fn test_empty_gazetteer_finds_nothing() {
        let resolver = GazetteerResolver::default();
        assert!(resolver.is_empty());
        assert!(
            resolver
                .resolve(&LocationQuery::new("Austin", "Texas"))
                .await
                .is_err()
        );
    }
}
