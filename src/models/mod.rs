//! Data models for kindred-climates
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and lookup queries
//! - Weather: Daily records, date ranges and validated series

pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{Location, LocationQuery};
pub use weather::{DailyRecord, DateRange, RawDailyRecord, WeatherCode, WeatherSeries};
