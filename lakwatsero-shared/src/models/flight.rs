use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flight metadata as served by `GET /flights/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(rename = "_id")]
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub from: String, // e.g. "Manila (MNL)"
    pub to: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub seat_capacity: Option<u32>,
    #[serde(default)]
    pub aircraft: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Paginated listing returned by `GET /flights`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPage {
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u64,
}

/// Payload of `POST /flights` (admin "add flight" form).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFlight {
    pub airline: String,
    pub flight_number: String,
    pub from: String,
    pub to: String,
    pub gate: String,
    pub terminal: String,
    pub price: f64,
    pub seat_capacity: u32,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_deserialization_with_sparse_fields() {
        let json = r#"
            {
                "_id": "f-1",
                "airline": "Cebu Pacific",
                "flightNumber": "5J 560",
                "from": "Manila (MNL)",
                "to": "Tokyo (NRT)",
                "departureTime": "2025-03-01T02:00:00.000Z",
                "arrivalTime": "2025-03-01T07:30:00.000Z",
                "seatCapacity": 180
            }
        "#;
        let flight: Flight = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(flight.flight_number, "5J 560");
        assert_eq!(flight.seat_capacity, Some(180));
        assert_eq!(flight.price, 0.0);
        assert!(flight.aircraft.is_none());
    }
}
