use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use lakwatsero_core::countdown::departure_countdown;
use lakwatsero_core::CoreError;
use lakwatsero_shared::models::{Booking, BookingStatus, RecordedPayment};

use crate::error::{AppError, AppResult};
use crate::navigation::{Redirect, Route};
use crate::state::AppState;
use crate::views::{Generation, LoadState};

pub const ACCOUNT_TABS: [BookingStatus; 3] = [BookingStatus::Pending, BookingStatus::Paid, BookingStatus::Past];

pub const BOOKINGS_FAILED_MESSAGE: &str = "Failed to load bookings.";
pub const CANCEL_FAILED_MESSAGE: &str = "Failed to update booking status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Pay,
    Cancel,
}

/// "My bookings": the signed-in user's bookings split into tabs.
pub struct AccountView {
    state: AppState,
    generation: Generation,
    bookings: LoadState<Vec<Booking>>,
    payments: Vec<RecordedPayment>,
    tab: BookingStatus,
    seen_tabs: HashSet<BookingStatus>,
}

impl AccountView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            generation: Generation::default(),
            bookings: LoadState::Idle,
            payments: Vec::new(),
            tab: BookingStatus::Paid,
            seen_tabs: HashSet::new(),
        }
    }

    pub async fn activate(&mut self) -> AppResult<()> {
        let ticket = self.generation.advance();
        let Some(user) = self.state.session.user().await else {
            return Err(AppError::LoginRequired {
                from: Route::Account.path(),
            });
        };
        self.bookings = LoadState::Loading;

        let (bookings, payments) = futures_util::join!(
            self.state.bookings.my_bookings(&user.email),
            self.state.payments.list_payments()
        );
        if !self.generation.is_current(ticket) {
            return Ok(());
        }

        self.payments = payments.unwrap_or_else(|err| {
            warn!("Payment fetch error: {}", err);
            Vec::new()
        });
        self.bookings = match bookings {
            Ok(list) => LoadState::Ready(list.into_iter().filter(|b| ACCOUNT_TABS.contains(&b.status)).collect()),
            Err(err) => {
                warn!("Failed to load bookings for {}: {}", user.email, err);
                LoadState::Failed(BOOKINGS_FAILED_MESSAGE.to_string())
            }
        };
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.generation.advance();
    }

    pub fn bookings(&self) -> &LoadState<Vec<Booking>> {
        &self.bookings
    }

    pub fn tab(&self) -> BookingStatus {
        self.tab
    }

    pub fn select_tab(&mut self, tab: BookingStatus) {
        self.tab = tab;
        self.seen_tabs.insert(tab);
    }

    /// Tabs not opened yet get a count badge.
    pub fn is_tab_seen(&self, tab: BookingStatus) -> bool {
        self.seen_tabs.contains(&tab)
    }

    pub fn tab_count(&self, status: BookingStatus) -> usize {
        self.bookings
            .ready()
            .map_or(0, |list| list.iter().filter(|b| b.status == status).count())
    }

    pub fn visible(&self) -> Vec<&Booking> {
        self.bookings
            .ready()
            .map(|list| list.iter().filter(|b| b.status == self.tab).collect())
            .unwrap_or_default()
    }

    pub fn payment_for(&self, booking_id: &str) -> Option<&RecordedPayment> {
        self.payments
            .iter()
            .find(|p| p.booking.as_ref().is_some_and(|b| b.id == booking_id))
    }

    /// Time to departure for every paid booking whose flight came back populated.
    pub fn departure_countdowns(&self, now: DateTime<Utc>) -> Vec<(String, String)> {
        self.bookings
            .ready()
            .map(|list| {
                list.iter()
                    .filter(|b| b.status == BookingStatus::Paid)
                    .filter_map(|b| {
                        b.departure_flight
                            .flight()
                            .map(|f| (b.id.clone(), departure_countdown(f.departure_time, now)))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub async fn act(&mut self, action: BookingAction, booking_id: &str) -> AppResult<Option<Redirect>> {
        match action {
            BookingAction::Pay => Ok(Some(Redirect::now(Route::Payment {
                booking_id: booking_id.to_string(),
            }))),
            BookingAction::Cancel => {
                if let Err(err) = self.state.bookings.cancel_booking(booking_id).await {
                    warn!("Cancel of {} failed: {}", booking_id, err);
                    self.state.notices.error(CANCEL_FAILED_MESSAGE);
                    return Err(AppError::Gateway(err));
                }

                let booking = self
                    .bookings
                    .ready_mut()
                    .and_then(|list| list.iter_mut().find(|b| b.id == booking_id))
                    .ok_or_else(|| CoreError::ValidationError(format!("booking {} is not listed", booking_id)))?;
                booking.status = BookingStatus::Cancelled;
                info!("Booking {} cancelled", booking_id);
                Ok(None)
            }
        }
    }
}
