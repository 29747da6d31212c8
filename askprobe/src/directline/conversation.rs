use reqwest::StatusCode;
use serde::Deserialize;

use super::{Client, GatewayError};

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct ConversationStarted {
    conversation_id: Option<String>,
}

impl Client {
    /// Opens a conversation for the given company and returns its id.
    ///
    /// Single attempt, no retry. A non-200 response is reported with its
    /// status code and raw body.
    pub async fn open_conversation(&self, company_id: &str) -> Result<String, GatewayError> {
        let url = format!("{}/conversations", self.base_url());
        let response = self
            .http
            .post(&url)
            .query(&[("isTest", "false"), ("companyId", company_id)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await?;
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let started: ConversationStarted = response.json().await?;
        started
            .conversation_id
            .ok_or(GatewayError::MissingConversationId)
    }
}
