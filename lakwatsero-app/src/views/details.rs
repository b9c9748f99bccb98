//! Pre-booking previews: one-way flight details and the round-trip summary.
//! Both show read-only seat grids; a failed seat fetch just shows an empty grid.

use tracing::warn;

use lakwatsero_core::round_trip::RoundTripPair;
use lakwatsero_core::seat_map::{SeatGridMode, SeatMap};
use lakwatsero_shared::models::{Flight, Seat};
use lakwatsero_store::app_config::BookingRules;

use crate::error::{AppError, AppResult};
use crate::navigation::{Redirect, Route};
use crate::state::AppState;
use crate::views::{Generation, LoadState};

async fn seats_or_empty(state: &AppState, flight_id: &str) -> Vec<Seat> {
    match state.flights.get_seats(flight_id).await {
        Ok(seats) => seats,
        Err(err) => {
            warn!("Seat preview for {} unavailable: {}", flight_id, err);
            Vec::new()
        }
    }
}

fn preview(rules: &BookingRules, seats: &[Seat]) -> String {
    SeatMap::with_shape(seats, &[], rules.grid_shape(), SeatGridMode::ReadOnly).to_string()
}

pub struct FlightDetailsView {
    state: AppState,
    generation: Generation,
    flight: LoadState<Flight>,
    seats: Vec<Seat>,
}

impl FlightDetailsView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            generation: Generation::default(),
            flight: LoadState::Idle,
            seats: Vec::new(),
        }
    }

    pub async fn activate(&mut self, flight_id: &str) {
        let ticket = self.generation.advance();
        self.flight = LoadState::Loading;

        let flight = self.state.flights.get_flight(flight_id).await;
        let seats = seats_or_empty(&self.state, flight_id).await;
        if !self.generation.is_current(ticket) {
            return;
        }

        self.seats = seats;
        self.flight = match flight {
            Ok(flight) => LoadState::Ready(flight),
            Err(err) => {
                let err = AppError::LoadFailed(err);
                self.state.notices.send(err.notice());
                LoadState::Failed(err.to_string())
            }
        };
    }

    pub fn deactivate(&mut self) {
        self.generation.advance();
        self.flight = LoadState::Idle;
        self.seats.clear();
    }

    pub fn flight(&self) -> &LoadState<Flight> {
        &self.flight
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat_preview(&self) -> String {
        preview(&self.state.rules, &self.seats)
    }

    pub fn continue_to_booking(&self) -> AppResult<Redirect> {
        let flight = self
            .flight
            .ready()
            .ok_or_else(|| lakwatsero_core::CoreError::NotReady("flight has not loaded".into()))?;
        Ok(Redirect::now(Route::Booking {
            outbound_id: flight.id.clone(),
            return_id: None,
        }))
    }
}

/// Both legs of a round trip, handed over by the results view.
pub struct RoundTripSummaryView {
    state: AppState,
    pair: RoundTripPair,
    outbound_seats: Vec<Seat>,
    return_seats: Vec<Seat>,
}

impl RoundTripSummaryView {
    pub fn new(state: AppState, pair: RoundTripPair) -> Self {
        Self {
            state,
            pair,
            outbound_seats: Vec::new(),
            return_seats: Vec::new(),
        }
    }

    pub async fn activate(&mut self) {
        let (outbound, inbound) = futures_util::join!(
            seats_or_empty(&self.state, &self.pair.outbound.id),
            seats_or_empty(&self.state, &self.pair.return_flight.id)
        );
        self.outbound_seats = outbound;
        self.return_seats = inbound;
    }

    pub fn pair(&self) -> &RoundTripPair {
        &self.pair
    }

    pub fn outbound_preview(&self) -> String {
        preview(&self.state.rules, &self.outbound_seats)
    }

    pub fn return_preview(&self) -> String {
        preview(&self.state.rules, &self.return_seats)
    }

    pub fn continue_to_booking(&self) -> Redirect {
        Redirect::now(Route::Booking {
            outbound_id: self.pair.outbound.id.clone(),
            return_id: Some(self.pair.return_flight.id.clone()),
        })
    }
}
