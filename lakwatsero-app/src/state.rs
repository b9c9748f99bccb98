use std::sync::Arc;

use lakwatsero_core::identity::SessionHandle;
use lakwatsero_core::repository::{AccountDirectory, BookingService, FlightProvider, GatewayResult, PaymentGateway};
use lakwatsero_store::app_config::{BookingRules, Config};
use lakwatsero_store::{ApiClient, HttpAccountDirectory, HttpBookingService, HttpFlightProvider, HttpPaymentGateway};

use crate::notice::NoticeSender;

/// Everything a view needs, passed in explicitly.
#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<dyn FlightProvider>,
    pub bookings: Arc<dyn BookingService>,
    pub payments: Arc<dyn PaymentGateway>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub session: SessionHandle,
    pub rules: BookingRules,
    pub notices: NoticeSender,
}

impl AppState {
    /// Wires the HTTP gateways against the configured backend. All of them
    /// share one client and therefore one session.
    pub fn connect(config: &Config, session: SessionHandle, notices: NoticeSender) -> GatewayResult<Self> {
        let client = ApiClient::new(&config.api, session.clone())?;
        tracing::info!("Using booking backend at {}", config.api.base_url);

        Ok(Self {
            flights: Arc::new(HttpFlightProvider::new(client.clone())),
            bookings: Arc::new(HttpBookingService::new(client.clone())),
            payments: Arc::new(HttpPaymentGateway::new(client.clone())),
            accounts: Arc::new(HttpAccountDirectory::new(client)),
            session,
            rules: config.booking.clone(),
            notices,
        })
    }
}
