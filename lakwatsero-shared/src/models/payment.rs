use serde::{Deserialize, Serialize};

/// Body of `POST /payments/create-payment-intent`; `amount` is in minor units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// Body of `POST /payments/record` after the card provider confirmed a charge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub booking: String,
    pub method: String,
    pub amount: f64,
    pub status: String,
    pub currency: String,
    pub stripe_payment_intent_id: String,
    pub transaction_id: Option<String>,
    pub receipt_url: Option<String>,
    pub paid_at: i64, // epoch millis
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBookingRef {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Entry of `GET /payments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordedPayment {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub booking: Option<PaymentBookingRef>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GcashChargeRequest {
    pub amount: f64,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GcashActions {
    pub desktop_web_checkout_url: Option<String>,
    pub mobile_web_checkout_url: Option<String>,
    pub checkout_url: Option<String>,
}

/// Sandbox charge created through `POST /payments/sandbox/gcash`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GcashCharge {
    pub id: String,
    pub status: String,
    pub actions: GcashActions,
}

impl GcashCharge {
    /// Desktop checkout link, falling back to the generic one.
    pub fn checkout_url(&self) -> Option<&str> {
        self.actions
            .desktop_web_checkout_url
            .as_deref()
            .or(self.actions.checkout_url.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GcashVerificationRequest {
    pub booking: String,
    pub charge_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GcashVerification {
    pub status: String,
    pub paid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_url_prefers_desktop() {
        let json = r#"{ "id": "ch_1", "status": "PENDING", "actions": { "checkout_url": "https://x/generic", "desktop_web_checkout_url": "https://x/desktop" } }"#;
        let charge: GcashCharge = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(charge.checkout_url(), Some("https://x/desktop"));

        let bare: GcashCharge = serde_json::from_str(r#"{ "actions": { "checkout_url": "https://x/generic" } }"#)
            .expect("Failed to deserialize");
        assert_eq!(bare.checkout_url(), Some("https://x/generic"));
    }

    #[test]
    fn test_charge_built_from_models_reexports() {
        use crate::models::{GcashActions as Actions, GcashCharge as Charge};

        let charge = Charge {
            id: "ch_2".into(),
            status: "PENDING".into(),
            actions: Actions {
                mobile_web_checkout_url: Some("https://x/mobile".into()),
                ..Actions::default()
            },
        };
        assert_eq!(charge.checkout_url(), None);
    }
}
