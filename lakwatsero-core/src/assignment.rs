//! Seat assignment across a passenger list, one leg at a time.
//!
//! Selection always goes to the first passenger (in list order) whose seat
//! for the leg is empty. Which passenger gets a seat therefore depends only on
//! the order of the list, never on click history.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lakwatsero_shared::models::Seat;

use crate::passengers::Passenger;
use crate::seat_map::SeatClick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    Outbound,
    Return,
}

impl Leg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Leg::Outbound => "outbound",
            Leg::Return => "return",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Assigned { passenger: usize, seat_number: String },
    Released { passenger: usize, seat_number: String },
    /// Deselect of a seat nobody holds.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    #[error("Seat already selected.")]
    AlreadySelected { seat_number: String, holder: usize },
    #[error("All passengers already have assigned seats.")]
    AllPassengersAssigned,
    #[error("Seat {0} is not part of this flight.")]
    UnknownSeat(String),
    #[error("Seat {0} is already booked.")]
    SeatBooked(String),
}

/// Seat numbers currently held on `leg`, in passenger order, empties skipped.
pub fn selected_seat_numbers(passengers: &[Passenger], leg: Leg) -> Vec<String> {
    passengers
        .iter()
        .filter_map(|p| p.seat(leg))
        .map(str::to_string)
        .collect()
}

/// Applies a grid click to the passenger list. Rejections leave every
/// passenger untouched.
pub fn apply_click(
    passengers: &mut [Passenger],
    leg: Leg,
    click: SeatClick,
) -> Result<AssignmentOutcome, AssignmentError> {
    match click {
        SeatClick::Deselect(seat_number) => {
            let holder = passengers
                .iter()
                .position(|p| p.seat(leg) == Some(seat_number.as_str()));

            match holder {
                Some(index) => {
                    *passengers[index].seat_slot_mut(leg) = None;
                    debug!("Released {} seat {} from passenger {}", leg.as_str(), seat_number, index);
                    Ok(AssignmentOutcome::Released {
                        passenger: index,
                        seat_number,
                    })
                }
                None => Ok(AssignmentOutcome::Unchanged),
            }
        }
        SeatClick::Select(seat_number) => {
            if seat_number.is_empty() {
                return Err(AssignmentError::UnknownSeat(seat_number));
            }

            if let Some(holder) = passengers
                .iter()
                .position(|p| p.seat(leg) == Some(seat_number.as_str()))
            {
                warn!("{} seat {} already held by passenger {}", leg.as_str(), seat_number, holder);
                return Err(AssignmentError::AlreadySelected { seat_number, holder });
            }

            let Some(index) = passengers.iter().position(|p| p.seat(leg).is_none()) else {
                warn!("No passenger left without a {} seat", leg.as_str());
                return Err(AssignmentError::AllPassengersAssigned);
            };

            *passengers[index].seat_slot_mut(leg) = Some(seat_number.clone());
            debug!("Assigned {} seat {} to passenger {}", leg.as_str(), seat_number, index);
            Ok(AssignmentOutcome::Assigned {
                passenger: index,
                seat_number,
            })
        }
    }
}

/// Coordinates clicks for one leg against that leg's fetched inventory.
#[derive(Debug, Clone, Copy)]
pub struct SeatAssignmentCoordinator<'a> {
    leg: Leg,
    inventory: &'a [Seat],
}

impl<'a> SeatAssignmentCoordinator<'a> {
    pub fn new(leg: Leg, inventory: &'a [Seat]) -> Self {
        Self { leg, inventory }
    }

    pub fn leg(&self) -> Leg {
        self.leg
    }

    /// Like [`apply_click`], but a selected seat must also exist in the
    /// inventory and must not be booked.
    pub fn handle(
        &self,
        passengers: &mut [Passenger],
        click: SeatClick,
    ) -> Result<AssignmentOutcome, AssignmentError> {
        if let SeatClick::Select(seat_number) = &click {
            let seat = self
                .inventory
                .iter()
                .find(|s| &s.seat_number == seat_number)
                .ok_or_else(|| AssignmentError::UnknownSeat(seat_number.clone()))?;
            if seat.is_booked {
                return Err(AssignmentError::SeatBooked(seat_number.clone()));
            }
        }
        apply_click(passengers, self.leg, click)
    }
}
