use async_trait::async_trait;

use lakwatsero_core::repository::{FlightProvider, FlightQuery, GatewayResult};
use lakwatsero_core::search::{FlightSearchRequest, FlightSearchResult};
use lakwatsero_shared::models::{Flight, FlightPage, NewFlight, Seat};

use crate::http_client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpFlightProvider {
    pub client: ApiClient,
}

impl HttpFlightProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FlightProvider for HttpFlightProvider {
    async fn get_flight(&self, id: &str) -> GatewayResult<Flight> {
        self.client.get(&format!("/flights/{}", id)).await
    }

    async fn get_seats(&self, flight_id: &str) -> GatewayResult<Vec<Seat>> {
        self.client.get(&format!("/seats/flight/{}", flight_id)).await
    }

    async fn search_flights(&self, request: &FlightSearchRequest) -> GatewayResult<FlightSearchResult> {
        tracing::info!("Searching flights {} -> {} on {}", request.from, request.to, request.departure);
        self.client.post("/flights/search", request).await
    }

    async fn list_flights(&self, query: &FlightQuery) -> GatewayResult<FlightPage> {
        let params = [
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
            ("search", query.search.clone()),
        ];
        self.client.get_with_query("/flights", &params).await
    }

    async fn create_flight(&self, flight: &NewFlight) -> GatewayResult<Flight> {
        tracing::info!("Adding flight {}", flight.flight_number);
        self.client.post("/flights", flight).await
    }

    async fn delete_flight(&self, id: &str) -> GatewayResult<()> {
        tracing::info!("Deleting flight {}", id);
        self.client.delete(&format!("/flights/{}", id)).await
    }
}
