use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::error::HttpError;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Payment provider rejected the request: {0}")]
    Provider(String),
}

impl From<PaymentError> for HttpError {
    fn from(error: PaymentError) -> Self {
        match error {
            PaymentError::Request(_) => HttpError::bad_gateway(error.to_string()),
            PaymentError::Provider(_) => HttpError::bad_gateway(error.to_string()),
        }
    }
}

/// Thin client over the payment provider's intent API. Amounts are in
/// minor currency units.
#[derive(Debug, Clone)]
pub struct PaymentProviderService {
    secret_key: String,
    client: reqwest::Client,
}

impl PaymentProviderService {
    pub fn new(config: &Config) -> Self {
        Self {
            secret_key: config.stripe_secret_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<String, PaymentError> {
        let params = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post("https://api.stripe.com/v1/payment_intents")
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .form(&params)
            .send()
            .await?;

        let body: Value = response.json().await?;

        match body["client_secret"].as_str() {
            Some(client_secret) => Ok(client_secret.to_string()),
            None => {
                let message = body["error"]["message"]
                    .as_str()
                    .unwrap_or("Payment intent creation failed")
                    .to_string();
                Err(PaymentError::Provider(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn provider_errors_map_to_bad_gateway() {
        let error = PaymentError::Provider("declined".to_string());
        let http: HttpError = error.into();
        assert_eq!(http.status, StatusCode::BAD_GATEWAY);
    }
}
