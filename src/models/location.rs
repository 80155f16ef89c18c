//! Location model for geographic coordinates and lookup queries

use crate::KindredError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolved location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// City name
    pub name: String,
    /// State, province or country the city belongs to
    pub region: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            region: None,
        }
    }

    /// Create location with region
    #[must_use]
    pub fn with_region(latitude: f64, longitude: f64, name: String, region: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            region: Some(region),
        }
    }

    /// Identifier used for summaries and chart labels, e.g. "Austin, Texas"
    #[must_use]
    pub fn id(&self) -> String {
        match &self.region {
            Some(region) => format!("{}, {region}", self.name),
            None => self.name.clone(),
        }
    }

    /// Round coordinates to the given number of decimals
    #[must_use]
    pub fn rounded_coordinates(&self, precision: u32) -> (f64, f64) {
        let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
        let lat = (self.latitude * multiplier).round() / multiplier;
        let lon = (self.longitude * multiplier).round() / multiplier;
        (lat, lon)
    }

    /// File stem under which archived daily data for this location is stored
    #[must_use]
    pub fn archive_key(&self) -> String {
        let (lat, lon) = self.rounded_coordinates(2);
        format!("archive_{lat:.2}_{lon:.2}")
    }
}

/// A "(city, region)" lookup request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    pub region: String,
}

impl LocationQuery {
    #[must_use]
    pub fn new<C: Into<String>, R: Into<String>>(city: C, region: R) -> Self {
        Self {
            city: city.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.region)
    }
}

impl FromStr for LocationQuery {
    type Err = KindredError;

    /// Parse `"City, Region"`; the region is everything after the first comma
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (city, region) = s
            .split_once(',')
            .ok_or_else(|| KindredError::validation(format!("Expected 'City, Region', got '{s}'")))?;

        let city = city.trim();
        let region = region.trim();
        if city.is_empty() || region.is_empty() {
            return Err(KindredError::validation(format!(
                "Location '{s}' must name both a city and a region"
            )));
        }

        Ok(Self::new(city, region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_archive_key() {
        let location = Location::new(35.0456, -85.3097, "Chattanooga".to_string());
        assert_eq!(location.archive_key(), "archive_35.05_-85.31");
    }

    #[test]
    fn test_location_rounded_coordinates() {
        let location = Location::new(30.267_153, -97.743_061, "Austin".to_string());
        let (lat, lon) = location.rounded_coordinates(2);
        assert_eq!(lat, 30.27);
        assert_eq!(lon, -97.74);
    }

    #[test]
    fn test_location_id() {
        let plain = Location::new(1.0, 2.0, "Austin".to_string());
        assert_eq!(plain.id(), "Austin");

        let full = Location::with_region(1.0, 2.0, "Austin".to_string(), "Texas".to_string());
        assert_eq!(full.id(), "Austin, Texas");
    }

    #[test]
    fn test_query_parsing() {
        let query: LocationQuery = " Chattanooga ,  Tennessee ".parse().unwrap();
        assert_eq!(query, LocationQuery::new("Chattanooga", "Tennessee"));
        assert_eq!(query.to_string(), "Chattanooga, Tennessee");

        let nested: LocationQuery = "Paris, Ile-de-France, France".parse().unwrap();
        assert_eq!(nested.region, "Ile-de-France, France");
    }

    #[test]
    fn test_query_parsing_rejects_missing_parts() {
        assert!("Austin".parse::<LocationQuery>().is_err());
        assert!(", Texas".parse::<LocationQuery>().is_err());
        assert!("Austin, ".parse::<LocationQuery>().is_err());
    }
}
