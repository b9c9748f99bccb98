//! Payment screen: expiry countdown, card payment and the GCash sandbox.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info, warn};

use lakwatsero_core::countdown::{format_mm_ss, PaymentDeadline};
use lakwatsero_core::payment::{
    check_card_payment, intent_amount, BillingDetails, CardConfirmation, CardConfirmer, PaymentStatus,
};
use lakwatsero_core::CoreError;
use lakwatsero_shared::models::{Booking, BookingStatus, GcashChargeRequest, GcashVerificationRequest};

use crate::error::{AppError, AppResult};
use crate::navigation::{Redirect, Route};
use crate::state::AppState;
use crate::views::{Generation, LoadState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStatus {
    Idle,
    Processing,
    Success,
    Failure,
}

/// One-second ticker publishing the seconds left until `deadline`.
///
/// The task stops on its own once the deadline passes and is aborted when
/// the countdown is dropped.
#[derive(Debug)]
pub struct Countdown {
    deadline: PaymentDeadline,
    rx: watch::Receiver<i64>,
    handle: JoinHandle<()>,
}

impl Countdown {
    pub fn start(deadline: PaymentDeadline) -> Self {
        let (tx, rx) = watch::channel(deadline.remaining_seconds(Utc::now()));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            loop {
                ticker.tick().await;
                let left = deadline.remaining_seconds(Utc::now());
                if tx.send(left).is_err() || left == 0 {
                    break;
                }
            }
            debug!("Payment countdown finished");
        });

        Self { deadline, rx, handle }
    }

    pub fn deadline(&self) -> PaymentDeadline {
        self.deadline
    }

    /// Last value published by the ticker.
    pub fn seconds_left(&self) -> i64 {
        *self.rx.borrow()
    }

    pub fn display(&self) -> String {
        format_mm_ss(self.seconds_left())
    }

    /// Every tick from now on; ends when the countdown stops.
    pub fn updates(&self) -> WatchStream<i64> {
        WatchStream::new(self.rx.clone())
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct PaymentView {
    state: AppState,
    generation: Generation,
    booking_id: Option<String>,
    booking: LoadState<Booking>,
    client_secret: Option<String>,
    status: CheckoutStatus,
    countdown: Option<Countdown>,
}

impl PaymentView {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            generation: Generation::default(),
            booking_id: None,
            booking: LoadState::Idle,
            client_secret: None,
            status: CheckoutStatus::Idle,
            countdown: None,
        }
    }

    fn confirmation_redirect(&self, booking_id: &str) -> Redirect {
        Redirect::delayed(
            Route::BookingConfirmation {
                booking_id: booking_id.to_string(),
            },
            self.state.rules.confirmation_redirect_delay(),
        )
    }

    /// Loads the booking. An already paid booking redirects to its
    /// confirmation; otherwise a payment intent is created and the
    /// countdown starts against `bookedAt` plus the payment window.
    pub async fn activate(&mut self, booking_id: &str) -> AppResult<Option<Redirect>> {
        let ticket = self.generation.advance();
        self.countdown = None;
        self.client_secret = None;
        self.status = CheckoutStatus::Idle;
        self.booking_id = Some(booking_id.to_string());
        self.booking = LoadState::Loading;

        let booking = match self.state.bookings.get_booking(booking_id).await {
            Ok(booking) => booking,
            Err(err) => {
                error!("Failed to fetch booking {}: {}", booking_id, err);
                self.booking = LoadState::Failed(err.to_string());
                return Err(AppError::Gateway(err));
            }
        };
        if !self.generation.is_current(ticket) {
            return Ok(None);
        }

        if booking.status == BookingStatus::Paid {
            self.status = CheckoutStatus::Success;
            self.booking = LoadState::Ready(booking);
            return Ok(Some(self.confirmation_redirect(booking_id)));
        }

        match self
            .state
            .payments
            .create_payment_intent(intent_amount(booking.total_price))
            .await
        {
            Ok(intent) => self.client_secret = Some(intent.client_secret),
            Err(err) => error!("Payment intent creation failed: {}", err),
        }

        let deadline = PaymentDeadline::new(booking.booked_at, self.state.rules.payment_window());
        self.countdown = Some(Countdown::start(deadline));
        self.booking = LoadState::Ready(booking);
        Ok(None)
    }

    /// Stops the countdown and ignores anything still in flight.
    pub fn deactivate(&mut self) {
        self.generation.advance();
        self.countdown = None;
    }

    pub fn booking(&self) -> &LoadState<Booking> {
        &self.booking
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn status(&self) -> CheckoutStatus {
        self.status
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Seconds left, recomputed from the deadline rather than read from the
    /// last tick.
    pub fn seconds_left(&self) -> i64 {
        self.countdown
            .as_ref()
            .map_or(0, |c| c.deadline().remaining_seconds(Utc::now()))
    }

    fn ready_booking(&self) -> AppResult<&Booking> {
        self.booking
            .ready()
            .ok_or_else(|| CoreError::NotReady("booking has not loaded".into()).into())
    }

    pub async fn pay_by_card(&mut self, confirmer: &dyn CardConfirmer) -> AppResult<Option<Redirect>> {
        let booking = self.ready_booking()?.clone();
        if let Err(blocker) = check_card_payment(self.seconds_left(), self.client_secret(), &booking.full_name) {
            let err = AppError::PaymentBlocked(blocker);
            self.state.notices.send(err.notice());
            return Err(err);
        }
        let client_secret = self.client_secret.clone().unwrap_or_default();

        self.status = CheckoutStatus::Processing;
        let billing = BillingDetails {
            name: booking.full_name.clone(),
            email: booking.email.clone(),
            phone: booking.phone.clone(),
        };

        let intent = match confirmer.confirm_card_payment(&client_secret, &billing).await {
            CardConfirmation::Failed { message } => {
                warn!("Card payment for {} failed: {}", booking.id, message);
                self.status = CheckoutStatus::Failure;
                return Ok(None);
            }
            CardConfirmation::Confirmed(intent) => intent,
        };
        if intent.status != PaymentStatus::Succeeded {
            warn!("Card payment for {} ended as {:?}", booking.id, intent.status);
            self.status = CheckoutStatus::Failure;
            return Ok(None);
        }

        let record = intent.to_record(&booking.id, Utc::now().timestamp_millis());
        let recorded = match self.state.payments.record_payment(&record).await {
            Ok(()) => self.state.bookings.mark_paid(&booking.id).await,
            Err(err) => Err(err),
        };

        match recorded {
            Ok(()) => {
                info!("Booking {} paid by card", booking.id);
                self.status = CheckoutStatus::Success;
                self.countdown = None;
                if let Some(b) = self.booking.ready_mut() {
                    b.status = BookingStatus::Paid;
                }
                Ok(Some(self.confirmation_redirect(&booking.id)))
            }
            Err(err) => {
                let err = AppError::PaymentNotRecorded(err);
                self.state.notices.send(err.notice());
                Err(err)
            }
        }
    }

    /// Creates a GCash sandbox charge and returns its checkout URL.
    pub async fn pay_with_gcash(&mut self) -> AppResult<Option<String>> {
        let booking = self.ready_booking()?;
        let request = GcashChargeRequest {
            amount: booking.total_price,
            email: booking.email.clone(),
            phone: booking.phone.clone(),
        };

        match self.state.payments.create_gcash_charge(&request).await {
            Ok(charge) => {
                debug!("GCash charge {} is {}", charge.id, charge.status);
                Ok(charge.checkout_url().map(str::to_string))
            }
            Err(err) => {
                let err = AppError::GcashFailed(err);
                self.state.notices.send(err.notice());
                Err(err)
            }
        }
    }

    /// Asks the backend whether a GCash charge has been paid.
    pub async fn verify_gcash(&mut self, charge_id: &str) -> AppResult<Option<Redirect>> {
        let booking_id = self.ready_booking()?.id.clone();
        let request = GcashVerificationRequest {
            booking: booking_id.clone(),
            charge_id: charge_id.to_string(),
        };

        let verification = self.state.payments.verify_gcash(&request).await?;
        if !verification.paid {
            debug!("GCash charge {} still {}", charge_id, verification.status);
            return Ok(None);
        }

        self.status = CheckoutStatus::Success;
        self.countdown = None;
        if let Some(b) = self.booking.ready_mut() {
            b.status = BookingStatus::Paid;
        }
        Ok(Some(self.confirmation_redirect(&booking_id)))
    }
}
