use async_trait::async_trait;
use serde::Deserialize;

use lakwatsero_core::repository::{AccountDirectory, GatewayResult};
use lakwatsero_shared::models::{LoginRequest, LoginResponse, UserDetails};
use lakwatsero_shared::Masked;

use crate::http_client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpAccountDirectory {
    pub client: ApiClient,
}

impl HttpAccountDirectory {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserTotals {
    #[serde(default)]
    total_users: u64,
}

#[async_trait]
impl AccountDirectory for HttpAccountDirectory {
    async fn login(&self, email: &str, password: &Masked<String>) -> GatewayResult<Masked<String>> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.clone(),
        };
        let response: LoginResponse = self.client.post("/users/login", &request).await?;
        Ok(response.access)
    }

    async fn user_details(&self, token: &Masked<String>) -> GatewayResult<UserDetails> {
        self.client.get_with_token("/users/details", token).await
    }

    async fn total_users(&self) -> GatewayResult<u64> {
        let totals: UserTotals = self.client.get("/users/all").await?;
        Ok(totals.total_users)
    }

    async fn passenger_count(&self) -> GatewayResult<u64> {
        let passengers: Vec<serde_json::Value> = self.client.get("/passengers/all").await?;
        Ok(passengers.len() as u64)
    }
}
