use chrono::{DateTime, Duration, Utc};

pub const PAYMENT_WINDOW_MINUTES: i64 = 15;

/// Absolute payment deadline of a booking.
///
/// Remaining time is always recomputed from the deadline, never decremented,
/// so a late or skipped tick cannot make the display drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentDeadline {
    deadline: DateTime<Utc>,
}

impl PaymentDeadline {
    pub fn new(booked_at: DateTime<Utc>, window: Duration) -> Self {
        Self {
            deadline: booked_at + window,
        }
    }

    pub fn for_booking(booked_at: DateTime<Utc>) -> Self {
        Self::new(booked_at, Duration::minutes(PAYMENT_WINDOW_MINUTES))
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Whole seconds left at `now`, never negative.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.deadline - now).num_seconds().max(0)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_seconds(now) == 0
    }
}

/// `MM:SS`, e.g. `14:05`.
pub fn format_mm_ss(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Time until departure as `"{h}h {m}m {s}s"`, or `"Departed"`.
pub fn departure_countdown(departure: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (departure - now).num_seconds();
    if diff <= 0 {
        return "Departed".to_string();
    }
    let hours = diff / 3600;
    let minutes = (diff % 3600) / 60;
    let seconds = diff % 60;
    format!("{}h {}m {}s", hours, minutes, seconds)
}
