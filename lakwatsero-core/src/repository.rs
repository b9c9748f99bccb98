use async_trait::async_trait;

use lakwatsero_shared::models::{
    Booking, BookingRequest, Flight, FlightPage, GcashCharge, GcashChargeRequest, GcashVerification,
    GcashVerificationRequest, NewFlight, PaymentIntent, PaymentRecord, RecordedPayment, Seat,
    UserDetails,
};
use lakwatsero_shared::Masked;

use crate::search::{FlightSearchRequest, FlightSearchResult};

/// Failure talking to the booking backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Transport(String),
    /// The backend answered with an error status; `message` is its `error` field when present.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Not authenticated")]
    Unauthorized,
    #[error("Unexpected response: {0}")]
    Decode(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

impl Default for FlightQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 5,
            search: String::new(),
        }
    }
}

/// Flight metadata and seat inventory.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn get_flight(&self, id: &str) -> GatewayResult<Flight>;

    async fn get_seats(&self, flight_id: &str) -> GatewayResult<Vec<Seat>>;

    async fn search_flights(&self, request: &FlightSearchRequest) -> GatewayResult<FlightSearchResult>;

    async fn list_flights(&self, query: &FlightQuery) -> GatewayResult<FlightPage>;

    async fn create_flight(&self, flight: &NewFlight) -> GatewayResult<Flight>;

    async fn delete_flight(&self, id: &str) -> GatewayResult<()>;
}

/// Booking submission and lifecycle.
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn create_booking(&self, request: &BookingRequest) -> GatewayResult<Booking>;

    async fn get_booking(&self, id: &str) -> GatewayResult<Booking>;

    /// Every booking (admin).
    async fn list_bookings(&self) -> GatewayResult<Vec<Booking>>;

    async fn my_bookings(&self, email: &str) -> GatewayResult<Vec<Booking>>;

    async fn cancel_booking(&self, id: &str) -> GatewayResult<()>;

    async fn mark_paid(&self, id: &str) -> GatewayResult<()>;
}

/// Payment side channel; opaque to seat assignment.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(&self, amount_minor: i64) -> GatewayResult<PaymentIntent>;

    async fn record_payment(&self, record: &PaymentRecord) -> GatewayResult<()>;

    async fn list_payments(&self) -> GatewayResult<Vec<RecordedPayment>>;

    async fn create_gcash_charge(&self, request: &GcashChargeRequest) -> GatewayResult<GcashCharge>;

    async fn verify_gcash(&self, request: &GcashVerificationRequest) -> GatewayResult<GcashVerification>;
}

/// Users, login and back-office head counts.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn login(&self, email: &str, password: &Masked<String>) -> GatewayResult<Masked<String>>;

    async fn user_details(&self, token: &Masked<String>) -> GatewayResult<UserDetails>;

    async fn total_users(&self) -> GatewayResult<u64>;

    async fn passenger_count(&self) -> GatewayResult<u64>;
}
