//! Station and report data structures.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One row of the daily report.
///
/// Field names on the wire follow the synthetic column header
/// `stationId,state,location,lat,lng,precip`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationRecord {
    /// Observation station identifier (e.g. `AFRV2`)
    #[serde(rename = "stationId")]
    pub station_id: String,

    /// Two-letter state code
    pub state: String,

    /// Station location, truncated by the source to ten characters
    pub location: String,

    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lng: f64,

    /// 24 hour accumulated precipitation in inches
    #[serde(rename = "precip")]
    pub precip_inches: f64,
}

/// Calendar date the whole report applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportDate(NaiveDate);

impl FromStr for ReportDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ParseError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Fixed point the nearest station is measured from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceLocation {
    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lng: f64,
}

impl ReferenceLocation {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Default for ReferenceLocation {
    fn default() -> Self {
        Self {
            lat: 38.81855487829746,
            lng: -77.28262316525014,
        }
    }
}
