use lakwatsero_core::assignment::AssignmentError;
use lakwatsero_core::payment::CardPaymentBlocker;
use lakwatsero_core::repository::GatewayError;
use lakwatsero_core::CoreError;

use crate::notice::{Notice, NoticeLevel};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load flight or seat data.";
pub const BOOKING_FAILED_MESSAGE: &str = "Failed to create booking. Please try again.";
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to proceed with booking. Redirecting...";
pub const PAYMENT_UPDATE_FAILED_MESSAGE: &str = "Payment succeeded but failed to update booking.";
pub const GCASH_FAILED_MESSAGE: &str = "Failed to create GCash charge.";
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Flight or seat data could not be fetched; shown inline and blocks the grid.
    #[error("{}", LOAD_FAILED_MESSAGE)]
    LoadFailed(#[source] GatewayError),
    /// Rejected seat click; nothing changed.
    #[error(transparent)]
    SeatRejected(#[from] AssignmentError),
    /// The backend refused the booking; the form keeps its data.
    #[error("{0}")]
    BookingRejected(String),
    #[error("{}", LOGIN_REQUIRED_MESSAGE)]
    LoginRequired { from: String },
    #[error("{0}")]
    PaymentBlocked(#[from] CardPaymentBlocker),
    #[error("{}", PAYMENT_UPDATE_FAILED_MESSAGE)]
    PaymentNotRecorded(#[source] GatewayError),
    #[error("{}", GCASH_FAILED_MESSAGE)]
    GcashFailed(#[source] GatewayError),
    #[error("{}", LOGIN_FAILED_MESSAGE)]
    LoginFailed(#[source] GatewayError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Backend rejection of a booking submission. Only a message the backend
    /// sent itself is shown; anything else gets the generic text.
    pub fn booking_rejected(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected { message, .. } if !message.is_empty() => AppError::BookingRejected(message),
            _ => AppError::BookingRejected(BOOKING_FAILED_MESSAGE.to_string()),
        }
    }

    pub fn notice(&self) -> Notice {
        let level = match self {
            AppError::SeatRejected(_) | AppError::LoginRequired { .. } | AppError::PaymentBlocked(_) => {
                NoticeLevel::Warning
            }
            _ => NoticeLevel::Error,
        };
        Notice::new(level, self.to_string())
    }
}
