//! Error types and handling for `kindred-climates`

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the comparison pipeline
#[derive(Error, Debug)]
pub enum KindredError {
    /// A location's series had no daily records
    #[error("Empty weather series for {location}")]
    EmptySeries { location: String },

    /// The resolver had no coordinates for the query
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// A raw record was missing a required field or carried an impossible value
    #[error("Malformed record for {location} on {date}: {field} {reason}")]
    MalformedRecord {
        location: String,
        date: NaiveDate,
        field: &'static str,
        reason: String,
    },

    /// Record dates were not strictly ascending
    #[error("Weather series for {location} is out of order at {date}")]
    UnorderedSeries { location: String, date: NaiveDate },

    /// The two series cover a different number of days
    #[error("Series length mismatch: {first} days vs {second} days")]
    LengthMismatch { first: usize, second: usize },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Archive retrieval or decoding errors
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl KindredError {
    /// Create a new empty series error
    pub fn empty_series<S: Into<String>>(location: S) -> Self {
        Self::EmptySeries {
            location: location.into(),
        }
    }

    /// Create a new location not found error
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new malformed record error
    pub fn malformed<S: Into<String>, R: Into<String>>(
        location: S,
        date: NaiveDate,
        field: &'static str,
        reason: R,
    ) -> Self {
        Self::MalformedRecord {
            location: location.into(),
            date,
            field,
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new archive error
    pub fn archive<S: Into<String>>(message: S) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            KindredError::EmptySeries { location } => {
                format!("No weather data was returned for {location}.")
            }
            KindredError::LocationNotFound { query } => {
                format!("Could not find '{query}'. Check the city and region spelling.")
            }
            KindredError::MalformedRecord { location, date, .. } => {
                format!("The weather data for {location} is incomplete on {date}.")
            }
            KindredError::UnorderedSeries { location, .. } => {
                format!("The weather data for {location} is not in date order.")
            }
            KindredError::LengthMismatch { .. } => {
                "The two locations returned a different number of days and cannot be compared."
                    .to_string()
            }
            KindredError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            KindredError::Archive { .. } => {
                "Unable to read archived weather data. Please check the archive directory."
                    .to_string()
            }
            KindredError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            KindredError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
