use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lakwatsero_shared::models::PaymentRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    RequiresPaymentMethod,
    RequiresAction,
    Processing,
    Succeeded,
    Canceled,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Intent as reported back by the card provider after confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmedIntent {
    pub id: String, // Provider's ID (e.g., pi_123)
    pub amount: i64, // minor units
    pub currency: String,
    pub status: PaymentStatus,
    pub charge_id: Option<String>,
    pub receipt_url: Option<String>,
}

impl ConfirmedIntent {
    pub fn to_record(&self, booking_id: &str, paid_at_millis: i64) -> PaymentRecord {
        PaymentRecord {
            booking: booking_id.to_string(),
            method: "card".to_string(),
            amount: self.amount as f64 / 100.0,
            status: "succeeded".to_string(),
            currency: self.currency.clone(),
            stripe_payment_intent_id: self.id.clone(),
            transaction_id: self.charge_id.clone(),
            receipt_url: self.receipt_url.clone(),
            paid_at: paid_at_millis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardConfirmation {
    Confirmed(ConfirmedIntent),
    Failed { message: String },
}

/// Card confirmation happens in the provider's own widget; this is the seam
/// the payment view calls through.
#[async_trait]
pub trait CardConfirmer: Send + Sync {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        billing: &BillingDetails,
    ) -> CardConfirmation;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CardPaymentBlocker {
    #[error("payment window has expired")]
    Expired,
    #[error("payment intent is not ready")]
    MissingClientSecret,
    #[error("booking has no billing name")]
    MissingBillingName,
}

/// Minor units for the payment intent (`totalPrice * 100`).
pub fn intent_amount(total_price: f64) -> i64 {
    (total_price * 100.0).round() as i64
}

pub fn check_card_payment(
    seconds_left: i64,
    client_secret: Option<&str>,
    billing_name: &str,
) -> Result<(), CardPaymentBlocker> {
    if seconds_left <= 0 {
        return Err(CardPaymentBlocker::Expired);
    }
    if client_secret.map_or(true, str::is_empty) {
        return Err(CardPaymentBlocker::MissingClientSecret);
    }
    if billing_name.trim().is_empty() {
        return Err(CardPaymentBlocker::MissingBillingName);
    }
    Ok(())
}
