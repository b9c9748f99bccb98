//! Screen controllers. Each view owns its state exclusively; collaborators
//! and the session arrive through [`AppState`](crate::state::AppState).
//!
//! Fetches are split into `begin` (bumps the generation, returns a ticket)
//! and `complete` (applies the result only if the ticket is still current),
//! so a result that lands after the parameters changed or the view was
//! deactivated is dropped.

pub mod account;
pub mod admin;
pub mod booking;
pub mod details;
pub mod login;
pub mod payment;
pub mod results;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Monotonic fetch counter owned by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Generation(u64);

impl Generation {
    /// Invalidates every outstanding ticket and returns a fresh one.
    pub fn advance(&mut self) -> Generation {
        self.0 += 1;
        *self
    }

    pub fn is_current(&self, ticket: Generation) -> bool {
        self.0 == ticket.0
    }
}
