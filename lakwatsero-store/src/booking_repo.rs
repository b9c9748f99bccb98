use async_trait::async_trait;
use serde::Serialize;

use lakwatsero_core::repository::{BookingService, GatewayResult};
use lakwatsero_shared::models::{Booking, BookingRequest};

use crate::http_client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpBookingService {
    pub client: ApiClient,
}

impl HttpBookingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct MyBookingsRequest<'a> {
    email: &'a str,
}

#[async_trait]
impl BookingService for HttpBookingService {
    async fn create_booking(&self, request: &BookingRequest) -> GatewayResult<Booking> {
        tracing::info!(
            "Submitting {:?} booking for {} passenger(s) on flight {}",
            request.trip_type,
            request.passengers.len(),
            request.departure_flight
        );
        self.client.post("/bookings", request).await
    }

    async fn get_booking(&self, id: &str) -> GatewayResult<Booking> {
        self.client.get(&format!("/bookings/{}", id)).await
    }

    async fn list_bookings(&self) -> GatewayResult<Vec<Booking>> {
        self.client.get("/bookings/").await
    }

    async fn my_bookings(&self, email: &str) -> GatewayResult<Vec<Booking>> {
        self.client
            .post("/bookings/my-bookings", &MyBookingsRequest { email })
            .await
    }

    async fn cancel_booking(&self, id: &str) -> GatewayResult<()> {
        tracing::info!("Cancelling booking {}", id);
        self.client.patch_empty(&format!("/bookings/{}/status", id)).await
    }

    async fn mark_paid(&self, id: &str) -> GatewayResult<()> {
        tracing::info!("Marking booking {} as paid", id);
        self.client.patch_empty(&format!("/bookings/{}/pay", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_support::client_for;
    use lakwatsero_core::identity::SessionHandle;
    use lakwatsero_core::repository::GatewayError;
    use lakwatsero_shared::models::{BookingStatus, ManifestPassenger, TripType};
    use lakwatsero_shared::Masked;
    use mockito::Matcher;

    fn request() -> BookingRequest {
        BookingRequest {
            full_name: "Ana Reyes".into(),
            email: "ana@example.com".into(),
            phone: "0917".into(),
            trip_type: TripType::Oneway,
            departure_flight: "f-1".into(),
            return_flight: None,
            passengers: vec![ManifestPassenger {
                full_name: "Ana Reyes".into(),
                birthdate: "1990-01-01".into(),
                passport_number: Masked::from("P1"),
                nationality: "Filipino".into(),
                outbound_seat_number: "3".into(),
                return_seat_number: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_create_booking() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bookings")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "tripType": "oneway",
                "departureFlight": "f-1",
                "returnFlight": null,
                "passengers": [{ "outboundSeatNumber": "3", "passportNumber": "P1" }]
            })))
            .with_status(201)
            .with_body(
                r#"{"_id": "b-1", "departureFlight": "f-1", "status": "pending",
                    "totalPrice": 4500, "bookedAt": "2025-03-01T02:00:00Z"}"#,
            )
            .create_async()
            .await;

        let service = HttpBookingService::new(client_for(&server, SessionHandle::new()));
        let booking = service.create_booking(&request()).await.unwrap();

        assert_eq!(booking.id, "b-1");
        assert_eq!(booking.status, BookingStatus::Pending);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_validation_error_payload_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/bookings")
            .with_status(422)
            .with_body(r#"{"error": "Seat 3 is already booked"}"#)
            .create_async()
            .await;

        let service = HttpBookingService::new(client_for(&server, SessionHandle::new()));
        let err = service.create_booking(&request()).await.unwrap_err();

        assert_eq!(err.to_string(), "Seat 3 is already booked");
        assert!(matches!(err, GatewayError::Rejected { status: 422, .. }));
    }

    #[tokio::test]
    async fn test_status_transitions_patch_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let cancel = server
            .mock("PATCH", "/bookings/b-1/status")
            .match_body(Matcher::Json(serde_json::json!({})))
            .with_status(200)
            .create_async()
            .await;
        let pay = server
            .mock("PATCH", "/bookings/b-1/pay")
            .with_status(200)
            .create_async()
            .await;

        let service = HttpBookingService::new(client_for(&server, SessionHandle::new()));
        service.cancel_booking("b-1").await.unwrap();
        service.mark_paid("b-1").await.unwrap();

        cancel.assert_async().await;
        pay.assert_async().await;
    }
}
