pub mod assignment;
pub mod countdown;
pub mod dashboard;
pub mod identity;
pub mod locations;
pub mod passengers;
pub mod payment;
pub mod repository;
pub mod round_trip;
pub mod search;
pub mod seat_map;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Not ready: {0}")]
    NotReady(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
