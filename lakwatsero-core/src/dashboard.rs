//! Back-office figures derived from already-fetched bookings and flights.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use lakwatsero_shared::models::{Booking, BookingStatus, Flight};

use crate::locations;

pub const RECENT_BOOKINGS: usize = 10;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub month: &'static str,
    pub bookings: u32,
    pub passengers: u32,
    pub revenue: f64,
}

/// Twelve buckets, January first, keyed on the UTC month of `bookedAt`.
/// Revenue only counts paid bookings.
pub fn monthly_stats(bookings: &[Booking]) -> Vec<MonthlyStats> {
    let mut stats: Vec<MonthlyStats> = MONTHS
        .iter()
        .map(|&month| MonthlyStats {
            month,
            bookings: 0,
            passengers: 0,
            revenue: 0.0,
        })
        .collect();

    for booking in bookings {
        let bucket = &mut stats[booking.booked_at.month0() as usize];
        bucket.bookings += 1;
        bucket.passengers += booking.passengers.len() as u32;
        if booking.status == BookingStatus::Paid {
            bucket.revenue += booking.total_price;
        }
    }

    stats
}

pub fn total_paid_revenue(bookings: &[Booking]) -> f64 {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Paid)
        .map(|b| b.total_price)
        .sum()
}

pub fn recent_bookings(bookings: &[Booking]) -> &[Booking] {
    &bookings[..bookings.len().min(RECENT_BOOKINGS)]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_users: u64,
    pub total_flights: u64,
    pub total_passengers: u64,
    pub recent_bookings: Vec<Booking>,
    pub monthly: Vec<MonthlyStats>,
    pub total_revenue: f64,
}

impl DashboardSummary {
    /// Charts and revenue are computed over the recent slice only, the same
    /// window the dashboard table shows.
    pub fn build(bookings: &[Booking], total_users: u64, total_flights: u64, total_passengers: u64) -> Self {
        let recent = recent_bookings(bookings);
        Self {
            total_users,
            total_flights,
            total_passengers,
            recent_bookings: recent.to_vec(),
            monthly: monthly_stats(recent),
            total_revenue: total_paid_revenue(recent),
        }
    }
}

/// One flight on the admin calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub flight_number: String,
    pub airline: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub from_city: String,
    pub to_city: String,
    pub duration: Option<String>,
}

impl From<&Flight> for CalendarEvent {
    fn from(flight: &Flight) -> Self {
        let from_code = locations::code_of(&flight.from);
        let to_code = locations::code_of(&flight.to);
        Self {
            id: flight.id.clone(),
            title: format!("{} → {}", from_code, to_code),
            flight_number: flight.flight_number.clone(),
            airline: flight.airline.clone(),
            start: flight.departure_time,
            end: flight.arrival_time,
            all_day: true,
            from_city: locations::details(from_code).city,
            to_city: locations::details(to_code).city,
            duration: flight.duration.clone(),
        }
    }
}

pub fn calendar_events(flights: &[Flight]) -> Vec<CalendarEvent> {
    flights.iter().map(CalendarEvent::from).collect()
}
