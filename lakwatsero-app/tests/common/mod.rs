#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc::UnboundedReceiver;

use lakwatsero_app::notice::{notice_channel, Notice};
use lakwatsero_app::AppState;
use lakwatsero_core::identity::{Session, SessionHandle};
use lakwatsero_core::payment::{BillingDetails, CardConfirmation, CardConfirmer};
use lakwatsero_core::repository::{
    AccountDirectory, BookingService, FlightProvider, FlightQuery, GatewayError, GatewayResult, PaymentGateway,
};
use lakwatsero_core::search::{FlightSearchRequest, FlightSearchResult};
use lakwatsero_shared::models::{
    BookedPassenger, Booking, BookingRequest, BookingStatus, Flight, FlightPage, FlightRef, GcashActions,
    GcashCharge, GcashChargeRequest, GcashVerification, GcashVerificationRequest, NewFlight, PaymentIntent,
    PaymentRecord, RecordedPayment, Seat, UserDetails,
};
use lakwatsero_shared::Masked;
use lakwatsero_store::app_config::BookingRules;

/// In-memory stand-in for the booking backend.
#[derive(Default)]
pub struct FakeBackend {
    pub flights: Mutex<HashMap<String, Flight>>,
    pub seats: Mutex<HashMap<String, Vec<Seat>>>,
    pub search_result: Mutex<FlightSearchResult>,
    pub bookings: Mutex<Vec<Booking>>,
    pub created: Mutex<Vec<BookingRequest>>,
    pub reject_booking: Mutex<Option<GatewayError>>,
    pub fail_flight_fetch: Mutex<bool>,
    pub fail_record: Mutex<bool>,
    pub fail_gcash: Mutex<bool>,
    pub intents: Mutex<Vec<i64>>,
    pub records: Mutex<Vec<PaymentRecord>>,
    pub paid: Mutex<Vec<String>>,
    pub cancelled: Mutex<Vec<String>>,
    pub deleted_flights: Mutex<Vec<String>>,
    pub users: Mutex<HashMap<String, (String, UserDetails)>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_flight(&self, flight: Flight, seats: Vec<Seat>) {
        self.seats.lock().unwrap().insert(flight.id.clone(), seats);
        self.flights.lock().unwrap().insert(flight.id.clone(), flight);
    }

    pub fn add_booking(&self, booking: Booking) {
        self.bookings.lock().unwrap().push(booking);
    }

    pub fn add_user(&self, email: &str, password: &str, user: UserDetails) {
        self.users
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), user));
    }
}

fn not_found(what: &str) -> GatewayError {
    GatewayError::Rejected {
        status: 404,
        message: format!("{} not found", what),
    }
}

#[async_trait]
impl FlightProvider for FakeBackend {
    async fn get_flight(&self, id: &str) -> GatewayResult<Flight> {
        if *self.fail_flight_fetch.lock().unwrap() {
            return Err(GatewayError::Transport("connection refused".into()));
        }
        self.flights.lock().unwrap().get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn get_seats(&self, flight_id: &str) -> GatewayResult<Vec<Seat>> {
        self.seats
            .lock()
            .unwrap()
            .get(flight_id)
            .cloned()
            .ok_or_else(|| not_found(flight_id))
    }

    async fn search_flights(&self, _request: &FlightSearchRequest) -> GatewayResult<FlightSearchResult> {
        Ok(self.search_result.lock().unwrap().clone())
    }

    async fn list_flights(&self, query: &FlightQuery) -> GatewayResult<FlightPage> {
        let mut flights: Vec<Flight> = self.flights.lock().unwrap().values().cloned().collect();
        flights.sort_by(|a, b| a.id.cmp(&b.id));
        let total_items = flights.len() as u64;
        flights.truncate(query.limit as usize);
        Ok(FlightPage {
            flights,
            total_items,
            total_pages: 1,
        })
    }

    async fn create_flight(&self, flight: &NewFlight) -> GatewayResult<Flight> {
        let created = Flight {
            id: format!("f-{}", flight.flight_number.replace(' ', "")),
            airline: flight.airline.clone(),
            flight_number: flight.flight_number.clone(),
            from: flight.from.clone(),
            to: flight.to.clone(),
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            duration: None,
            seat_capacity: Some(flight.seat_capacity),
            aircraft: None,
            price: flight.price,
            gate: Some(flight.gate.clone()),
            terminal: Some(flight.terminal.clone()),
            status: Some(flight.status.clone()),
        };
        self.add_flight(created.clone(), Vec::new());
        Ok(created)
    }

    async fn delete_flight(&self, id: &str) -> GatewayResult<()> {
        self.flights.lock().unwrap().remove(id).ok_or_else(|| not_found(id))?;
        self.deleted_flights.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

#[async_trait]
impl BookingService for FakeBackend {
    async fn create_booking(&self, request: &BookingRequest) -> GatewayResult<Booking> {
        if let Some(err) = self.reject_booking.lock().unwrap().clone() {
            return Err(err);
        }
        self.created.lock().unwrap().push(request.clone());
        let booking = Booking {
            id: format!("b-{}", self.created.lock().unwrap().len()),
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            trip_type: Some(request.trip_type),
            departure_flight: FlightRef::Id(request.departure_flight.clone()),
            return_flight: request.return_flight.clone().map(FlightRef::Id),
            passengers: vec![BookedPassenger::default(); request.passengers.len()],
            status: BookingStatus::Pending,
            total_price: 4500.0,
            booked_at: Utc::now(),
        };
        self.add_booking(booking.clone());
        Ok(booking)
    }

    async fn get_booking(&self, id: &str) -> GatewayResult<Booking> {
        self.bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list_bookings(&self) -> GatewayResult<Vec<Booking>> {
        Ok(self.bookings.lock().unwrap().clone())
    }

    async fn my_bookings(&self, email: &str) -> GatewayResult<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.email == email)
            .cloned()
            .collect())
    }

    async fn cancel_booking(&self, id: &str) -> GatewayResult<()> {
        self.cancelled.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn mark_paid(&self, id: &str) -> GatewayResult<()> {
        self.paid.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for FakeBackend {
    async fn create_payment_intent(&self, amount_minor: i64) -> GatewayResult<PaymentIntent> {
        self.intents.lock().unwrap().push(amount_minor);
        Ok(PaymentIntent {
            client_secret: format!("pi_{}_secret", amount_minor),
        })
    }

    async fn record_payment(&self, record: &PaymentRecord) -> GatewayResult<()> {
        if *self.fail_record.lock().unwrap() {
            return Err(GatewayError::Rejected {
                status: 500,
                message: "Server error".into(),
            });
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_payments(&self) -> GatewayResult<Vec<RecordedPayment>> {
        Ok(Vec::new())
    }

    async fn create_gcash_charge(&self, request: &GcashChargeRequest) -> GatewayResult<GcashCharge> {
        if *self.fail_gcash.lock().unwrap() {
            return Err(GatewayError::Transport("timeout".into()));
        }
        Ok(GcashCharge {
            id: "ch_1".into(),
            status: "PENDING".into(),
            actions: GcashActions {
                desktop_web_checkout_url: Some(format!("https://pay.example/gcash?amount={}", request.amount)),
                ..GcashActions::default()
            },
        })
    }

    async fn verify_gcash(&self, request: &GcashVerificationRequest) -> GatewayResult<GcashVerification> {
        Ok(GcashVerification {
            status: "SUCCEEDED".into(),
            paid: request.charge_id == "ch_1",
        })
    }
}

#[async_trait]
impl AccountDirectory for FakeBackend {
    async fn login(&self, email: &str, password: &Masked<String>) -> GatewayResult<Masked<String>> {
        match self.users.lock().unwrap().get(email) {
            Some((expected, _)) if expected == password.expose() => Ok(Masked::new(format!("token-{}", email))),
            _ => Err(GatewayError::Unauthorized),
        }
    }

    async fn user_details(&self, token: &Masked<String>) -> GatewayResult<UserDetails> {
        let email = token
            .expose()
            .strip_prefix("token-")
            .ok_or(GatewayError::Unauthorized)?
            .to_string();
        self.users
            .lock()
            .unwrap()
            .get(&email)
            .map(|(_, user)| user.clone())
            .ok_or(GatewayError::Unauthorized)
    }

    async fn total_users(&self) -> GatewayResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn passenger_count(&self) -> GatewayResult<u64> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .map(|b| b.passengers.len() as u64)
            .sum())
    }
}

/// Card widget stand-in that returns a fixed outcome.
pub struct FixedConfirmer(pub CardConfirmation);

#[async_trait]
impl CardConfirmer for FixedConfirmer {
    async fn confirm_card_payment(&self, _client_secret: &str, _billing: &BillingDetails) -> CardConfirmation {
        self.0.clone()
    }
}

pub fn app_state(backend: &Arc<FakeBackend>, session: SessionHandle) -> (AppState, UnboundedReceiver<Notice>) {
    let (notices, rx) = notice_channel();
    let state = AppState {
        flights: backend.clone(),
        bookings: backend.clone(),
        payments: backend.clone(),
        accounts: backend.clone(),
        session,
        rules: BookingRules::default(),
        notices,
    };
    (state, rx)
}

pub fn drain(rx: &mut UnboundedReceiver<Notice>) -> Vec<Notice> {
    let mut out = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        out.push(notice);
    }
    out
}

pub fn user(id: &str, is_admin: bool) -> UserDetails {
    UserDetails {
        id: id.to_string(),
        full_name: "Ana Reyes".into(),
        email: "ana@example.com".into(),
        mobile_no: Some("09171234567".into()),
        is_admin,
    }
}

pub fn signed_in(is_admin: bool) -> SessionHandle {
    SessionHandle::signed_in(Session {
        token: Masked::from("jwt"),
        user: user("u-1", is_admin),
    })
}

pub fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, hour, 0, 0).unwrap()
}

pub fn flight(id: &str, from: &str, to: &str) -> Flight {
    Flight {
        id: id.to_string(),
        airline: "Philippine Airlines".into(),
        flight_number: format!("PR {}", id),
        from: from.to_string(),
        to: to.to_string(),
        departure_time: at(6, 1, 2),
        arrival_time: at(6, 1, 6),
        duration: Some("4h".into()),
        seat_capacity: Some(6),
        aircraft: Some("A321".into()),
        price: 4500.0,
        gate: None,
        terminal: None,
        status: None,
    }
}

pub fn seats(numbers: &[&str], booked: &[&str]) -> Vec<Seat> {
    numbers
        .iter()
        .map(|n| Seat::new(format!("s-{}", n), *n, booked.contains(n)))
        .collect()
}

pub fn booking(id: &str, status: BookingStatus, booked_at: DateTime<Utc>) -> Booking {
    Booking {
        id: id.to_string(),
        full_name: "Ana Reyes".into(),
        email: "ana@example.com".into(),
        phone: "09171234567".into(),
        trip_type: None,
        departure_flight: FlightRef::Populated(Box::new(flight("f1", "Manila (MNL)", "Tokyo (NRT)"))),
        return_flight: None,
        passengers: vec![BookedPassenger::default()],
        status,
        total_price: 4500.0,
        booked_at,
    }
}
