//! Booking form: flight and seat inventory per leg, contact details, the
//! passenger list and submission.

use futures_util::try_join;
use tracing::{debug, info};

use lakwatsero_core::assignment::{selected_seat_numbers, AssignmentOutcome, Leg, SeatAssignmentCoordinator};
use lakwatsero_core::passengers::{self, Passenger, PassengerField};
use lakwatsero_core::repository::GatewayResult;
use lakwatsero_core::seat_map::{SeatClick, SeatGridMode, SeatMap};
use lakwatsero_core::CoreError;
use lakwatsero_shared::models::{BookingRequest, Flight, Seat, TripType};

use crate::error::{AppError, AppResult};
use crate::navigation::{Redirect, Route};
use crate::state::AppState;
use crate::views::{Generation, LoadState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingParams {
    pub outbound_id: String,
    pub return_id: Option<String>,
}

impl BookingParams {
    pub fn one_way(outbound_id: impl Into<String>) -> Self {
        Self {
            outbound_id: outbound_id.into(),
            return_id: None,
        }
    }

    pub fn round_trip(outbound_id: impl Into<String>, return_id: impl Into<String>) -> Self {
        Self {
            outbound_id: outbound_id.into(),
            return_id: Some(return_id.into()),
        }
    }

    pub fn trip_type(&self) -> TripType {
        if self.return_id.is_some() {
            TripType::Roundtrip
        } else {
            TripType::Oneway
        }
    }

    pub fn route(&self) -> Route {
        Route::Booking {
            outbound_id: self.outbound_id.clone(),
            return_id: self.return_id.clone(),
        }
    }
}

/// A flight together with its seat inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct LegInventory {
    pub flight: Flight,
    pub seats: Vec<Seat>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingData {
    pub outbound: LegInventory,
    pub return_leg: Option<LegInventory>,
}

impl BookingData {
    pub fn leg(&self, leg: Leg) -> Option<&LegInventory> {
        match leg {
            Leg::Outbound => Some(&self.outbound),
            Leg::Return => self.return_leg.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    FullName,
    Email,
    Phone,
}

/// Handed out by [`BookingView::begin`]; only the newest ticket may complete.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: Generation,
    pub params: BookingParams,
}

pub struct BookingView {
    state: AppState,
    params: Option<BookingParams>,
    generation: Generation,
    load: LoadState<BookingData>,
    contact: ContactDetails,
    passengers: Vec<Passenger>,
    login_warning: bool,
}

pub(crate) async fn fetch_leg(state: &AppState, flight_id: &str) -> GatewayResult<LegInventory> {
    let (flight, seats) = try_join!(state.flights.get_flight(flight_id), state.flights.get_seats(flight_id))?;
    Ok(LegInventory { flight, seats })
}

impl BookingView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            params: None,
            generation: Generation::default(),
            load: LoadState::Idle,
            contact: ContactDetails::default(),
            passengers: vec![Passenger::default()],
            login_warning: false,
        }
    }

    /// Starts a load for `params`. Any result still in flight for earlier
    /// parameters will be discarded.
    pub fn begin(&mut self, params: BookingParams) -> LoadTicket {
        let generation = self.generation.advance();
        debug!("Booking view load #{:?} for {:?}", generation, params);
        self.params = Some(params.clone());
        self.load = LoadState::Loading;
        LoadTicket { generation, params }
    }

    pub async fn fetch(state: &AppState, params: &BookingParams) -> GatewayResult<BookingData> {
        let outbound = fetch_leg(state, &params.outbound_id).await?;
        let return_leg = match &params.return_id {
            Some(id) => Some(fetch_leg(state, id).await?),
            None => None,
        };
        Ok(BookingData { outbound, return_leg })
    }

    /// Applies a finished fetch. Returns `false` when the ticket is stale.
    ///
    /// A successful load resets the form: contact details come from the
    /// signed-in user and the passenger list starts with one empty entry.
    pub async fn complete(&mut self, ticket: LoadTicket, result: GatewayResult<BookingData>) -> bool {
        if !self.generation.is_current(ticket.generation) {
            debug!("Discarding stale booking load for {:?}", ticket.params);
            return false;
        }

        match result {
            Ok(data) => {
                let user = self.state.session.user().await.unwrap_or_default();
                self.contact = ContactDetails {
                    full_name: user.full_name,
                    email: user.email,
                    phone: user.mobile_no.unwrap_or_default(),
                };
                self.passengers = vec![Passenger::default()];
                self.load = LoadState::Ready(data);
            }
            Err(err) => {
                let err = AppError::LoadFailed(err);
                self.state.notices.send(err.notice());
                self.load = LoadState::Failed(err.to_string());
            }
        }
        true
    }

    pub async fn activate(&mut self, params: BookingParams) {
        let ticket = self.begin(params);
        let result = Self::fetch(&self.state, &ticket.params).await;
        self.complete(ticket, result).await;
    }

    pub fn deactivate(&mut self) {
        self.generation.advance();
        self.load = LoadState::Idle;
    }

    pub fn load_state(&self) -> &LoadState<BookingData> {
        &self.load
    }

    pub fn params(&self) -> Option<&BookingParams> {
        self.params.as_ref()
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn login_warning(&self) -> bool {
        self.login_warning
    }

    pub fn set_contact(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::FullName => self.contact.full_name = value,
            ContactField::Email => self.contact.email = value,
            ContactField::Phone => self.contact.phone = value,
        }
    }

    /// Raw passenger-count input, capped at the configured maximum.
    /// Returns the count actually applied.
    pub fn set_passenger_count(&mut self, raw: &str) -> AppResult<usize> {
        self.ensure_ready()?;
        let count = passengers::bounded_passenger_count(raw, self.state.rules.max_passengers);
        self.passengers = passengers::resize(&self.passengers, count);
        Ok(count)
    }

    pub fn update_passenger(
        &mut self,
        index: usize,
        field: PassengerField,
        value: impl Into<String>,
    ) -> AppResult<bool> {
        self.ensure_ready()?;
        Ok(match self.passengers.get_mut(index) {
            Some(passenger) => {
                passenger.set_field(field, value);
                true
            }
            None => false,
        })
    }

    fn ensure_ready(&self) -> AppResult<()> {
        match self.load {
            LoadState::Ready(_) => Ok(()),
            _ => Err(AppError::Core(CoreError::NotReady(
                "booking data has not loaded".to_string(),
            ))),
        }
    }

    pub fn selected_seats(&self, leg: Leg) -> Vec<String> {
        selected_seat_numbers(&self.passengers, leg)
    }

    /// Read-only text rendering of a leg's grid.
    pub fn seat_map_text(&self, leg: Leg) -> Option<String> {
        let inventory = self.load.ready()?.leg(leg)?;
        let selected = self.selected_seats(leg);
        let map = SeatMap::with_shape(
            &inventory.seats,
            &selected,
            self.state.rules.grid_shape(),
            SeatGridMode::ReadOnly,
        );
        Some(map.to_string())
    }

    /// Routes a grid click for `leg` through the coordinator. Rejections
    /// are reported as a warning notice and leave the passengers untouched.
    pub fn click_seat(&mut self, leg: Leg, click: SeatClick) -> AppResult<AssignmentOutcome> {
        let inventory = match &self.load {
            LoadState::Ready(data) => data.leg(leg).ok_or_else(|| {
                AppError::Core(CoreError::ValidationError(format!("no {} leg on this booking", leg.as_str())))
            })?,
            _ => {
                return Err(AppError::Core(CoreError::NotReady(
                    "seat data has not loaded".to_string(),
                )))
            }
        };

        let coordinator = SeatAssignmentCoordinator::new(leg, &inventory.seats);
        coordinator.handle(&mut self.passengers, click).map_err(|err| {
            let err = AppError::from(err);
            self.state.notices.send(err.notice());
            err
        })
    }

    /// Presses a seat on the interactive grid for `leg`. The grid decides
    /// between select and deselect from the current assignments.
    pub fn press_seat(&mut self, leg: Leg, seat_number: &str) -> AppResult<AssignmentOutcome> {
        let mut pressed: Option<SeatClick> = None;
        if let Some(inventory) = self.load.ready().and_then(|data| data.leg(leg)) {
            let selected = selected_seat_numbers(&self.passengers, leg);
            let mut record = |click: SeatClick| pressed = Some(click);
            let mut map = SeatMap::with_shape(
                &inventory.seats,
                &selected,
                self.state.rules.grid_shape(),
                SeatGridMode::Interactive(&mut record),
            );
            map.press(seat_number);
        }

        match pressed {
            Some(click) => self.click_seat(leg, click),
            None => Ok(AssignmentOutcome::Unchanged),
        }
    }

    pub fn build_request(&self) -> AppResult<BookingRequest> {
        let params = self
            .params
            .as_ref()
            .ok_or_else(|| AppError::Core(CoreError::NotReady("booking view is not active".to_string())))?;
        let trip_type = params.trip_type();

        Ok(BookingRequest {
            full_name: self.contact.full_name.clone(),
            email: self.contact.email.clone(),
            phone: self.contact.phone.clone(),
            trip_type,
            departure_flight: params.outbound_id.clone(),
            return_flight: params.return_id.clone(),
            passengers: self.passengers.iter().map(|p| p.to_manifest(trip_type)).collect(),
        })
    }

    /// Submits the booking.
    ///
    /// Without a signed-in user nothing is sent: the login warning is raised
    /// and a delayed redirect to the login screen is returned. A backend
    /// rejection keeps every entered field.
    pub async fn submit(&mut self) -> AppResult<Redirect> {
        if !self.state.session.is_authenticated().await {
            let from = self.params.as_ref().map(|p| p.route().path()).unwrap_or_else(|| "/".to_string());
            self.login_warning = true;
            let err = AppError::LoginRequired { from: from.clone() };
            self.state.notices.send(err.notice());
            return Ok(Redirect::delayed(
                Route::Login { from: Some(from) },
                self.state.rules.login_redirect_delay(),
            ));
        }

        let request = self.build_request()?;
        match self.state.bookings.create_booking(&request).await {
            Ok(booking) => {
                info!("Created booking {}", booking.id);
                self.state.notices.success("Booking created successfully!");
                Ok(Redirect::now(Route::Payment { booking_id: booking.id }))
            }
            Err(err) => {
                let err = AppError::booking_rejected(err);
                self.state.notices.send(err.notice());
                Err(err)
            }
        }
    }
}
