use async_trait::async_trait;
use serde::Deserialize;

use lakwatsero_core::repository::{GatewayResult, PaymentGateway};
use lakwatsero_shared::models::{
    GcashCharge, GcashChargeRequest, GcashVerification, GcashVerificationRequest, PaymentIntent,
    PaymentIntentRequest, PaymentRecord, RecordedPayment,
};

use crate::http_client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    pub client: ApiClient,
}

impl HttpPaymentGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct PaymentList {
    #[serde(default)]
    payments: Vec<RecordedPayment>,
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_payment_intent(&self, amount_minor: i64) -> GatewayResult<PaymentIntent> {
        self.client
            .post(
                "/payments/create-payment-intent",
                &PaymentIntentRequest { amount: amount_minor },
            )
            .await
    }

    async fn record_payment(&self, record: &PaymentRecord) -> GatewayResult<()> {
        tracing::info!("Recording {} payment for booking {}", record.method, record.booking);
        self.client.post_unit("/payments/record", record).await
    }

    async fn list_payments(&self) -> GatewayResult<Vec<RecordedPayment>> {
        let list: PaymentList = self.client.get("/payments").await?;
        Ok(list.payments)
    }

    async fn create_gcash_charge(&self, request: &GcashChargeRequest) -> GatewayResult<GcashCharge> {
        self.client.post("/payments/sandbox/gcash", request).await
    }

    async fn verify_gcash(&self, request: &GcashVerificationRequest) -> GatewayResult<GcashVerification> {
        self.client.post("/payments/verify-gcash", request).await
    }
}
