use serde::{Deserialize, Serialize};

/// One seat of a flight's inventory as returned by `GET /seats/flight/{id}`.
///
/// Booked status is owned by the backend; the client only learns about
/// changes by fetching the inventory again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    #[serde(rename = "_id")]
    pub id: String,
    pub seat_number: String,
    #[serde(default)]
    pub is_booked: bool,
}

impl Seat {
    pub fn new(id: impl Into<String>, seat_number: impl Into<String>, is_booked: bool) -> Self {
        Self {
            id: id.into(),
            seat_number: seat_number.into(),
            is_booked,
        }
    }

    /// Leading digits of the seat number, e.g. `12` for `"12"` or `"12A"`.
    pub fn numeric_part(&self) -> Option<u32> {
        let digits: String = self
            .seat_number
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}
