use tracing::debug;

use lakwatsero_core::assignment::Leg;
use lakwatsero_core::repository::GatewayResult;
use lakwatsero_core::round_trip::{FlightPicker, PickOutcome, RoundTripPair};
use lakwatsero_core::search::{FlightSearchRequest, FlightSearchResult};
use lakwatsero_core::CoreError;
use lakwatsero_shared::models::Flight;

use crate::error::{AppError, AppResult};
use crate::navigation::{Redirect, Route};
use crate::state::AppState;
use crate::views::{Generation, LoadState};

#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: Generation,
    pub request: FlightSearchRequest,
}

/// Search results with outbound and return lists side by side.
pub struct ResultsView {
    state: AppState,
    generation: Generation,
    request: Option<FlightSearchRequest>,
    picker: Option<FlightPicker>,
    load: LoadState<FlightSearchResult>,
}

impl ResultsView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            generation: Generation::default(),
            request: None,
            picker: None,
            load: LoadState::Idle,
        }
    }

    pub fn begin(&mut self, request: FlightSearchRequest) -> AppResult<SearchTicket> {
        request.validate()?;
        let generation = self.generation.advance();
        self.picker = Some(FlightPicker::new(request.trip_type));
        self.request = Some(request.clone());
        self.load = LoadState::Loading;
        Ok(SearchTicket { generation, request })
    }

    pub async fn fetch(state: &AppState, request: &FlightSearchRequest) -> GatewayResult<FlightSearchResult> {
        state.flights.search_flights(request).await
    }

    pub fn complete(&mut self, ticket: SearchTicket, result: GatewayResult<FlightSearchResult>) -> bool {
        if !self.generation.is_current(ticket.generation) {
            debug!("Discarding stale search {} -> {}", ticket.request.from, ticket.request.to);
            return false;
        }
        self.load = match result {
            Ok(found) => {
                debug!(
                    "Search found {} outbound and {} return flights",
                    found.outbound.len(),
                    found.return_flights.len()
                );
                LoadState::Ready(found)
            }
            Err(err) => {
                let err = AppError::Gateway(err);
                self.state.notices.send(err.notice());
                LoadState::Failed(err.to_string())
            }
        };
        true
    }

    pub async fn activate(&mut self, request: FlightSearchRequest) -> AppResult<()> {
        let ticket = self.begin(request)?;
        let result = Self::fetch(&self.state, &ticket.request).await;
        self.complete(ticket, result);
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.generation.advance();
        self.load = LoadState::Idle;
        self.picker = None;
    }

    pub fn load_state(&self) -> &LoadState<FlightSearchResult> {
        &self.load
    }

    pub fn request(&self) -> Option<&FlightSearchRequest> {
        self.request.as_ref()
    }

    pub fn picker(&self) -> Option<&FlightPicker> {
        self.picker.as_ref()
    }

    fn find(&self, leg: Leg, flight_id: &str) -> AppResult<Flight> {
        let results = self
            .load
            .ready()
            .ok_or_else(|| CoreError::NotReady("search results have not loaded".into()))?;
        let list = match leg {
            Leg::Outbound => &results.outbound,
            Leg::Return => &results.return_flights,
        };
        list.iter()
            .find(|f| f.id == flight_id)
            .cloned()
            .ok_or_else(|| {
                CoreError::ValidationError(format!("flight {} is not in the {} results", flight_id, leg.as_str())).into()
            })
    }

    /// A card was clicked. One-way searches navigate straight to the
    /// flight's details; round trips only update the selection.
    pub fn pick(&mut self, leg: Leg, flight_id: &str) -> AppResult<Option<Redirect>> {
        let flight = self.find(leg, flight_id)?;
        let picker = self
            .picker
            .as_mut()
            .ok_or_else(|| CoreError::NotReady("no search is active".into()))?;

        match picker.pick(leg, flight) {
            PickOutcome::OneWayDetails { flight_id } => Ok(Some(Redirect::now(Route::FlightDetails { flight_id }))),
            PickOutcome::Selected { leg, replaced } => {
                debug!("Selected {} flight {} (replaced {:?})", leg.as_str(), flight_id, replaced);
                Ok(None)
            }
            PickOutcome::Unchanged => Ok(None),
        }
    }

    pub fn can_continue(&self) -> bool {
        self.picker.as_ref().is_some_and(|p| p.selection().can_continue())
    }

    /// Hands both selected flights to the summary step.
    pub fn continue_to_summary(&self) -> AppResult<(Redirect, RoundTripPair)> {
        let picker = self
            .picker
            .as_ref()
            .ok_or_else(|| CoreError::NotReady("no search is active".into()))?;
        let pair = picker.selection().continue_to_summary()?;
        let redirect = Redirect::now(Route::RoundTripSummary {
            outbound_id: pair.outbound.id.clone(),
            return_id: pair.return_flight.id.clone(),
        });
        Ok((redirect, pair))
    }
}
