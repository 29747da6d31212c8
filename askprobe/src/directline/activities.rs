use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::{Client, GatewayError};

/// One message turn within a conversation. The gateway attaches many more
/// fields; only the text matters here.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Activity {
    pub text: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct ActivityPage {
    activities: Option<Vec<Activity>>,
}

impl Client {
    fn activities_url(&self, conversation_id: &str) -> String {
        format!(
            "{}/conversations/{}/activities",
            self.base_url(),
            conversation_id
        )
    }

    /// Posts one activity (the question payload) into the conversation.
    pub async fn send_activity(
        &self,
        conversation_id: &str,
        payload: &Value,
    ) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.activities_url(conversation_id))
            .json(payload)
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

        Ok(())
    }

    /// Fetches every activity recorded so far. An absent list is treated
    /// the same as an empty one.
    pub async fn fetch_activities(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<Activity>, GatewayError> {
        let response = self
            .http
            .get(self.activities_url(conversation_id))
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

        let page: ActivityPage = response.json().await?;
        Ok(page.activities.unwrap_or_default())
    }
}
