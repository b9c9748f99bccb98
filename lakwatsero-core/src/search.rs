use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lakwatsero_shared::models::{Flight, TripType};

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SearchTripType {
    OneWay,
    RoundTrip,
}

impl SearchTripType {
    pub fn booking_trip_type(&self) -> TripType {
        match self {
            SearchTripType::OneWay => TripType::Oneway,
            SearchTripType::RoundTrip => TripType::Roundtrip,
        }
    }
}

/// Body of `POST /flights/search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightSearchRequest {
    pub from: String,
    pub to: String,
    pub departure: NaiveDate, // Just date, the backend matches the whole day
    #[serde(rename = "return")]
    pub return_date: Option<NaiveDate>,
    #[serde(rename = "tripType")]
    pub trip_type: SearchTripType,
}

impl FlightSearchRequest {
    /// A search only goes out once origin and destination are filled in.
    pub fn validate(&self) -> CoreResult<()> {
        if self.from.trim().is_empty() || self.to.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "origin and destination are required".into(),
            ));
        }
        if self.trip_type == SearchTripType::RoundTrip {
            if let Some(return_date) = self.return_date {
                if return_date < self.departure {
                    return Err(CoreError::ValidationError(
                        "return date precedes departure".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlightSearchResult {
    #[serde(default)]
    pub outbound: Vec<Flight>,
    #[serde(default, rename = "return")]
    pub return_flights: Vec<Flight>,
}
