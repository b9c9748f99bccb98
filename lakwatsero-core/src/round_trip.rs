use lakwatsero_shared::models::Flight;

use crate::assignment::Leg;
use crate::search::SearchTripType;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoneSelected,
    OutboundSelected,
    /// The return list can be picked from first; Continue stays disabled.
    ReturnSelected,
    OutboundAndReturnSelected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// One-way search: go straight to the flight's details view.
    OneWayDetails { flight_id: String },
    Selected { leg: Leg, replaced: Option<String> },
    /// Same flight picked again for the same leg.
    Unchanged,
}

/// Both legs chosen, ready to hand to the summary step.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTripPair {
    pub outbound: Flight,
    pub return_flight: Flight,
}

#[derive(Debug, Clone, Default)]
pub struct RoundTripSelection {
    outbound: Option<Flight>,
    return_flight: Option<Flight>,
}

impl RoundTripSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        match (&self.outbound, &self.return_flight) {
            (None, None) => SelectionState::NoneSelected,
            (Some(_), None) => SelectionState::OutboundSelected,
            (None, Some(_)) => SelectionState::ReturnSelected,
            (Some(_), Some(_)) => SelectionState::OutboundAndReturnSelected,
        }
    }

    pub fn selected(&self, leg: Leg) -> Option<&Flight> {
        match leg {
            Leg::Outbound => self.outbound.as_ref(),
            Leg::Return => self.return_flight.as_ref(),
        }
    }

    pub fn is_selected(&self, leg: Leg, flight_id: &str) -> bool {
        self.selected(leg).is_some_and(|f| f.id == flight_id)
    }

    pub fn select(&mut self, leg: Leg, flight: Flight) -> PickOutcome {
        let slot = match leg {
            Leg::Outbound => &mut self.outbound,
            Leg::Return => &mut self.return_flight,
        };

        if slot.as_ref().is_some_and(|current| current.id == flight.id) {
            return PickOutcome::Unchanged;
        }

        let replaced = slot.replace(flight).map(|previous| previous.id);
        PickOutcome::Selected { leg, replaced }
    }

    pub fn can_continue(&self) -> bool {
        self.state() == SelectionState::OutboundAndReturnSelected
    }

    pub fn continue_to_summary(&self) -> CoreResult<RoundTripPair> {
        match (&self.outbound, &self.return_flight) {
            (Some(outbound), Some(return_flight)) => Ok(RoundTripPair {
                outbound: outbound.clone(),
                return_flight: return_flight.clone(),
            }),
            _ => Err(CoreError::InvalidTransition(format!(
                "continue requires both legs, state is {:?}",
                self.state()
            ))),
        }
    }
}

/// Card picks on the results page.
#[derive(Debug, Clone)]
pub struct FlightPicker {
    trip_type: SearchTripType,
    selection: RoundTripSelection,
}

impl FlightPicker {
    pub fn new(trip_type: SearchTripType) -> Self {
        Self {
            trip_type,
            selection: RoundTripSelection::new(),
        }
    }

    pub fn trip_type(&self) -> SearchTripType {
        self.trip_type
    }

    pub fn selection(&self) -> &RoundTripSelection {
        &self.selection
    }

    pub fn pick(&mut self, leg: Leg, flight: Flight) -> PickOutcome {
        match self.trip_type {
            SearchTripType::OneWay => PickOutcome::OneWayDetails { flight_id: flight.id },
            SearchTripType::RoundTrip => self.selection.select(leg, flight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn flight(id: &str) -> Flight {
        Flight {
            id: id.to_string(),
            airline: "PAL".into(),
            flight_number: format!("PR {}", id),
            from: "Manila (MNL)".into(),
            to: "Cebu (CEB)".into(),
            departure_time: Utc.with_ymd_and_hms(2025, 3, 1, 2, 0, 0).unwrap(),
            arrival_time: Utc.with_ymd_and_hms(2025, 3, 1, 3, 10, 0).unwrap(),
            duration: None,
            seat_capacity: Some(12),
            aircraft: None,
            price: 2500.0,
            gate: None,
            terminal: None,
            status: None,
        }
    }

    #[test]
    fn test_state_progression_and_continue() {
        let mut selection = RoundTripSelection::new();
        assert_eq!(selection.state(), SelectionState::NoneSelected);
        assert!(selection.continue_to_summary().is_err());

        selection.select(Leg::Outbound, flight("o1"));
        assert_eq!(selection.state(), SelectionState::OutboundSelected);
        assert!(!selection.can_continue());

        selection.select(Leg::Return, flight("r1"));
        assert_eq!(selection.state(), SelectionState::OutboundAndReturnSelected);

        let pair = selection.continue_to_summary().unwrap();
        assert_eq!(pair.outbound.id, "o1");
        assert_eq!(pair.return_flight.id, "r1");
    }

    #[test]
    fn test_reselect_same_is_noop_other_replaces() {
        let mut selection = RoundTripSelection::new();
        selection.select(Leg::Outbound, flight("o1"));

        assert_eq!(selection.select(Leg::Outbound, flight("o1")), PickOutcome::Unchanged);
        assert_eq!(
            selection.select(Leg::Outbound, flight("o2")),
            PickOutcome::Selected {
                leg: Leg::Outbound,
                replaced: Some("o1".into())
            }
        );
        assert!(selection.is_selected(Leg::Outbound, "o2"));
        assert_eq!(selection.state(), SelectionState::OutboundSelected);
    }

    #[test]
    fn test_return_first_does_not_enable_continue() {
        let mut selection = RoundTripSelection::new();
        selection.select(Leg::Return, flight("r1"));
        assert_eq!(selection.state(), SelectionState::ReturnSelected);
        assert!(!selection.can_continue());
    }

    #[test]
    fn test_one_way_short_circuits() {
        let mut picker = FlightPicker::new(SearchTripType::OneWay);
        assert_eq!(
            picker.pick(Leg::Outbound, flight("o1")),
            PickOutcome::OneWayDetails { flight_id: "o1".into() }
        );
        assert_eq!(picker.selection().state(), SelectionState::NoneSelected);
    }
}
