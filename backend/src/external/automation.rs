//! Workflow-automation webhook client
//!
//! Notifies the PO-creation flow after make-po has committed. The caller
//! decides what a delivery failure means; this client only reports it.

use reqwest::Client;
use shared::outstanding::PoRequestLine;

use crate::error::{AppError, AppResult};

/// Automation webhook client
#[derive(Clone)]
pub struct AutomationClient {
    client: Client,
    base_url: String,
    webhook_id: String,
}

impl AutomationClient {
    /// Create a new AutomationClient
    pub fn new(base_url: String, webhook_id: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            webhook_id,
        }
    }

    /// Full webhook URL the payload is posted to
    pub fn webhook_url(&self) -> String {
        format!(
            "{}/webhook/{}",
            self.base_url.trim_end_matches('/'),
            self.webhook_id
        )
    }

    /// Post the outstanding-line payload to the PO-creation webhook.
    ///
    /// Only the success/failure of the HTTP exchange is observed; the
    /// response body carries no contract.
    pub async fn send_po_request(&self, lines: &[PoRequestLine]) -> AppResult<()> {
        let url = self.webhook_url();

        let response = self
            .client
            .post(&url)
            .json(lines)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Webhook request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Webhook error: {} - {}",
                status, body
            )));
        }

        Ok(())
    }
}
