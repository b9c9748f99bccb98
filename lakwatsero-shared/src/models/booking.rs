use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flight::Flight;
use crate::pii::Masked;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Oneway,
    Roundtrip,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Paid,
    Cancelled,
    Past,
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Paid => "paid",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Past => "past",
            BookingStatus::Unknown => "unknown",
        }
    }
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub trip_type: TripType,
    pub departure_flight: String,
    pub return_flight: Option<String>,
    pub passengers: Vec<ManifestPassenger>,
}

/// One passenger line of the manifest. Unassigned outbound seats travel as
/// an empty string; the return seat is `null` on one-way trips.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestPassenger {
    pub full_name: String,
    pub birthdate: String,
    pub passport_number: Masked<String>,
    pub nationality: String,
    pub outbound_seat_number: String,
    pub return_seat_number: Option<String>,
}

/// A flight reference inside a booking: populated object or bare id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlightRef {
    Populated(Box<Flight>),
    Id(String),
}

impl FlightRef {
    pub fn id(&self) -> &str {
        match self {
            FlightRef::Populated(flight) => &flight.id,
            FlightRef::Id(id) => id,
        }
    }

    pub fn flight(&self) -> Option<&Flight> {
        match self {
            FlightRef::Populated(flight) => Some(flight),
            FlightRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookedPassenger {
    pub full_name: String,
    pub birthdate: String,
    pub passport_number: Masked<String>,
    pub nationality: String,
    pub outbound_seat_number: Option<String>,
    pub return_seat_number: Option<String>,
}

/// Booking record returned by `POST /bookings` and `GET /bookings/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub trip_type: Option<TripType>,
    pub departure_flight: FlightRef,
    #[serde(default)]
    pub return_flight: Option<FlightRef>,
    #[serde(default)]
    pub passengers: Vec<BookedPassenger>,
    pub status: BookingStatus,
    #[serde(default)]
    pub total_price: f64,
    pub booked_at: DateTime<Utc>,
}
