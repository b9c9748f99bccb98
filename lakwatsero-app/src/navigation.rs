use std::fmt;
use std::time::Duration;

/// Every screen the client can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// `from` is the path to return to after signing in.
    Login { from: Option<String> },
    SearchResults,
    FlightDetails { flight_id: String },
    RoundTripSummary { outbound_id: String, return_id: String },
    Booking { outbound_id: String, return_id: Option<String> },
    Payment { booking_id: String },
    BookingConfirmation { booking_id: String },
    Account,
    AdminDashboard,
    AdminFlights,
    AdminCalendar,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login { .. } => "/login".to_string(),
            Route::SearchResults => "/flight-results".to_string(),
            Route::FlightDetails { flight_id } => format!("/flight/{}/one-way", flight_id),
            // Both flights travel as navigation state, not in the path.
            Route::RoundTripSummary { .. } => "/flight-summary/round-trip".to_string(),
            Route::Booking { outbound_id, return_id: None } => format!("/booking/{}", outbound_id),
            Route::Booking {
                outbound_id,
                return_id: Some(return_id),
            } => format!("/booking/{}/{}", outbound_id, return_id),
            Route::Payment { booking_id } => format!("/payment/{}", booking_id),
            Route::BookingConfirmation { booking_id } => format!("/booking-confirmation/{}", booking_id),
            Route::Account => "/account/bookings".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::AdminFlights => "/admin/flights".to_string(),
            Route::AdminCalendar => "/admin/calendar".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Navigation requested by a view, possibly after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub after: Duration,
}

impl Redirect {
    pub fn now(to: Route) -> Self {
        Self {
            to,
            after: Duration::ZERO,
        }
    }

    pub fn delayed(to: Route, after: Duration) -> Self {
        Self { to, after }
    }
}
