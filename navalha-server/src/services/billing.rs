//! Billing service
//!
//! Talks to the payment provider's checkout API (Mercado Pago shaped):
//! one preference per pending subscription, the customer pays on the
//! provider's page and comes back through the configured back URL.

use serde::Deserialize;
use serde_json::json;

use shared::models::Plan;

use crate::core::Config;
use crate::utils::AppError;

/// Checkout preference created at the provider. `init_point` is the URL
/// the dashboard redirects the owner to.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutPreference {
    pub id: String,
    pub init_point: String,
}

#[derive(Clone, Debug)]
pub struct BillingService {
    api_url: String,
    access_token: String,
    back_url: String,
    client: reqwest::Client,
}

impl BillingService {
    pub fn new(config: &Config) -> Self {
        Self {
            api_url: config.payment_api_url.trim_end_matches('/').to_string(),
            access_token: config.payment_access_token.clone(),
            back_url: config.checkout_back_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a checkout preference for one month of the given plan.
    ///
    /// `external_reference` carries our subscription id so the payment
    /// can be tied back to it on return.
    pub async fn create_checkout_preference(
        &self,
        plan: &Plan,
        payer_email: &str,
        external_reference: &str,
    ) -> Result<CheckoutPreference, AppError> {
        if self.access_token.is_empty() {
            return Err(AppError::gateway(
                "PAYMENT_ACCESS_TOKEN is not configured",
            ));
        }

        let body = json!({
            "items": [{
                "title": plan.name,
                "description": plan.description,
                "quantity": 1,
                "currency_id": "BRL",
                "unit_price": plan.price,
            }],
            "payer": { "email": payer_email },
            "external_reference": external_reference,
            "back_urls": {
                "success": self.back_url,
                "pending": self.back_url,
                "failure": self.back_url,
            },
            "auto_return": "approved",
        });

        let resp = self
            .client
            .post(format!("{}/checkout/preferences", self.api_url))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::gateway(format!("Payment provider unreachable: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AppError::gateway(format!(
                "Checkout preference rejected: {} - {}",
                status, text
            )));
        }

        resp.json()
            .await
            .map_err(|e| AppError::gateway(format!("Invalid provider response: {}", e)))
    }
}
