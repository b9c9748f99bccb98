//! Back office: dashboard, flight management and the flight calendar.

use chrono::{DateTime, Utc};
use futures_util::try_join;
use tracing::info;

use lakwatsero_core::dashboard::{calendar_events, CalendarEvent, DashboardSummary};
use lakwatsero_core::locations;
use lakwatsero_core::repository::FlightQuery;
use lakwatsero_core::CoreError;
use lakwatsero_shared::models::{Flight, FlightPage, NewFlight};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{Generation, LoadState};

pub const DEFAULT_FLIGHT_STATUS: &str = "On Time";
pub const CALENDAR_LIMIT: u32 = 1000;

pub struct AdminDashboardView {
    state: AppState,
    generation: Generation,
    summary: LoadState<DashboardSummary>,
}

impl AdminDashboardView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            generation: Generation::default(),
            summary: LoadState::Idle,
        }
    }

    /// Fetches bookings, user total, flight total and passenger count
    /// concurrently; any failure fails the whole dashboard.
    pub async fn activate(&mut self) {
        let ticket = self.generation.advance();
        self.summary = LoadState::Loading;

        let query = FlightQuery::default();
        let fetched = try_join!(
            self.state.bookings.list_bookings(),
            self.state.accounts.total_users(),
            self.state.flights.list_flights(&query),
            self.state.accounts.passenger_count()
        );
        if !self.generation.is_current(ticket) {
            return;
        }

        self.summary = match fetched {
            Ok((bookings, users, flights, passengers)) => {
                LoadState::Ready(DashboardSummary::build(&bookings, users, flights.total_items, passengers))
            }
            Err(err) => {
                let err = AppError::Gateway(err);
                self.state.notices.send(err.notice());
                LoadState::Failed(err.to_string())
            }
        };
    }

    pub fn summary(&self) -> &LoadState<DashboardSummary> {
        &self.summary
    }
}

/// The "add flight" form. Locations hold airport codes; the backend
/// receives `"City (CODE)"` labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightForm {
    pub airline: String,
    pub flight_number: String,
    pub from: String,
    pub to: String,
    pub gate: String,
    pub terminal: String,
    pub price: f64,
    pub seat_capacity: u32,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub status: String,
}

impl Default for FlightForm {
    fn default() -> Self {
        Self {
            airline: String::new(),
            flight_number: String::new(),
            from: String::new(),
            to: String::new(),
            gate: String::new(),
            terminal: String::new(),
            price: 0.0,
            seat_capacity: 0,
            departure_time: None,
            arrival_time: None,
            status: DEFAULT_FLIGHT_STATUS.to_string(),
        }
    }
}

impl FlightForm {
    pub fn swap_locations(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn to_new_flight(&self) -> AppResult<NewFlight> {
        let (Some(departure_time), Some(arrival_time)) = (self.departure_time, self.arrival_time) else {
            return Err(CoreError::ValidationError("departure and arrival times are required".into()).into());
        };

        Ok(NewFlight {
            airline: self.airline.clone(),
            flight_number: self.flight_number.clone(),
            from: locations::city_label(&self.from),
            to: locations::city_label(&self.to),
            gate: self.gate.clone(),
            terminal: self.terminal.clone(),
            price: self.price,
            seat_capacity: self.seat_capacity,
            departure_time,
            arrival_time,
            status: self.status.clone(),
        })
    }
}

pub struct AdminFlightsView {
    state: AppState,
    generation: Generation,
    query: FlightQuery,
    page: LoadState<FlightPage>,
}

impl AdminFlightsView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            generation: Generation::default(),
            query: FlightQuery::default(),
            page: LoadState::Idle,
        }
    }

    pub async fn load(&mut self, query: FlightQuery) {
        let ticket = self.generation.advance();
        self.query = query;
        self.page = LoadState::Loading;

        let result = self.state.flights.list_flights(&self.query).await;
        if !self.generation.is_current(ticket) {
            return;
        }
        self.page = match result {
            Ok(page) => LoadState::Ready(page),
            Err(err) => {
                let err = AppError::Gateway(err);
                self.state.notices.send(err.notice());
                LoadState::Failed(err.to_string())
            }
        };
    }

    pub fn query(&self) -> &FlightQuery {
        &self.query
    }

    pub fn page(&self) -> &LoadState<FlightPage> {
        &self.page
    }

    pub async fn add_flight(&mut self, form: &FlightForm) -> AppResult<Flight> {
        let new_flight = form.to_new_flight()?;
        match self.state.flights.create_flight(&new_flight).await {
            Ok(flight) => {
                info!("Added flight {} ({})", flight.flight_number, flight.id);
                self.state.notices.success("Flight added successfully!");
                if let Some(page) = self.page.ready_mut() {
                    page.flights.push(flight.clone());
                    page.total_items += 1;
                }
                Ok(flight)
            }
            Err(err) => {
                self.state.notices.error("Failed to add flight. Try again.");
                Err(AppError::Gateway(err))
            }
        }
    }

    /// Deletes on the backend, then drops the flight from the listed page.
    pub async fn delete_flight(&mut self, flight_id: &str) -> AppResult<()> {
        self.state.flights.delete_flight(flight_id).await?;
        if let Some(page) = self.page.ready_mut() {
            let before = page.flights.len();
            page.flights.retain(|f| f.id != flight_id);
            if page.flights.len() < before {
                page.total_items = page.total_items.saturating_sub(1);
            }
        }
        info!("Deleted flight {}", flight_id);
        Ok(())
    }
}

pub struct AdminCalendarView {
    state: AppState,
    events: LoadState<Vec<CalendarEvent>>,
}

impl AdminCalendarView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            events: LoadState::Idle,
        }
    }

    pub async fn activate(&mut self) {
        self.events = LoadState::Loading;
        let query = FlightQuery {
            limit: CALENDAR_LIMIT,
            ..FlightQuery::default()
        };
        self.events = match self.state.flights.list_flights(&query).await {
            Ok(page) => LoadState::Ready(calendar_events(&page.flights)),
            Err(err) => {
                let err = AppError::Gateway(err);
                self.state.notices.send(err.notice());
                LoadState::Failed(err.to_string())
            }
        };
    }

    pub fn events(&self) -> &LoadState<Vec<CalendarEvent>> {
        &self.events
    }
}
