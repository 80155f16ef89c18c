//! `kindred-climates` - compare the daily weather of two locations
//!
//! This library ingests two locations' daily weather over the same date range,
//! summarizes each one, classifies every day into a coarse category and scores
//! how similar the two locations were.

pub mod chart;
pub mod classifier;
pub mod comparison;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod similarity;
pub mod summary;
pub mod weather;

// Re-export core types for public API
pub use chart::{ChartDataProjector, ChartOverlay, ChartPoint, ChartSeries};
pub use classifier::{Category, WMO_CATEGORY_TABLE, classify};
pub use comparison::{ClimateComparer, ClimateComparison, LocationReport};
pub use config::KindredConfig;
pub use error::KindredError;
pub use location_resolver::{GazetteerEntry, GazetteerResolver, LocationResolver};
pub use models::{DailyRecord, DateRange, Location, LocationQuery, RawDailyRecord, WeatherCode, WeatherSeries};
pub use similarity::{Comparison, Criterion, SimilarityResult, SimilarityScorer, Statistic, Verdict};
pub use summary::{CategoryCounts, SummaryBuilder, WeatherSummary};
pub use weather::{ArchiveDirectoryClient, WeatherArchiveClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, KindredError>;
