//! Core logic for probing hotel chatbots: the Directline gateway client,
//! the per-(hotel, question) dispatcher, and the JSON-file config store.

use serde_json::{json, Value};
use shared::{Hotel, Outcome, OutcomeStatus};
use tracing::{debug, info, warn};

pub use crate::directline::{Client, Config, GatewayError};
pub use crate::store::ConfigStore;

pub mod directline;
mod store;

use crate::directline::Activity;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Default path of the backing config file.
pub const CONFIG_PATH: &str = "config.json";

/// Asks one hotel one question and classifies the reply.
///
/// Drives the full initiate, send, wait, fetch sequence against the
/// gateway. Every failure along the way is folded into the returned
/// [`Outcome`] rather than propagated, so a batch caller can keep going.
pub async fn ask_hotel(client: &Client, hotel: &Hotel, question: &str) -> Outcome {
    info!(hotel = %hotel.name, question, "querying chatbot");

    let outcome = |status: OutcomeStatus, response: String| Outcome {
        hotel: hotel.name.clone(),
        question: question.to_owned(),
        response,
        status,
    };

    let conversation_id = match client.open_conversation(&hotel.company_id).await {
        Ok(id) => id,
        Err(err) => {
            warn!(hotel = %hotel.name, %err, "conversation initiation failed");
            return outcome(
                OutcomeStatus::Error,
                format!("failed to initiate conversation: {err}"),
            );
        }
    };
    debug!(%conversation_id, "conversation initiated");

    let payload = question_payload(&hotel.payload, question);
    if let Err(err) = client.send_activity(&conversation_id, &payload).await {
        warn!(hotel = %hotel.name, %err, "sending question failed");
        let message = match err {
            GatewayError::Status { status, .. } => {
                format!("failed to send message (status {status})")
            }
            other => format!("failed to send message: {other}"),
        };
        return outcome(OutcomeStatus::Error, message);
    }

    // Fixed-wait heuristic: the gateway never signals completion.
    debug!(delay = ?client.response_delay(), "waiting for chatbot reply");
    tokio::time::sleep(client.response_delay()).await;

    let activities = match client.fetch_activities(&conversation_id).await {
        Ok(activities) => activities,
        Err(err) => {
            warn!(hotel = %hotel.name, %err, "fetching reply failed");
            let message = match err {
                GatewayError::Status { status, .. } => {
                    format!("failed to fetch response (status {status})")
                }
                other => format!("failed to fetch response: {other}"),
            };
            return outcome(OutcomeStatus::Error, message);
        }
    };

    if activities.is_empty() {
        return outcome(
            OutcomeStatus::Error,
            "no activity found in response".to_owned(),
        );
    }

    let (status, response) = classify_reply(question, &activities);
    outcome(status, response)
}

/// Builds the message body: the hotel's template with `text` overwritten.
/// A template that is not a JSON object degrades to a bare text message.
fn question_payload(template: &Value, question: &str) -> Value {
    match template.clone() {
        Value::Object(mut map) => {
            map.insert("text".to_owned(), Value::String(question.to_owned()));
            Value::Object(map)
        }
        _ => json!({ "text": question }),
    }
}

/// Classifies a non-empty activity list.
///
/// The reply concatenates the text of every activity after the first, each
/// on its own line. The echo check looks only at the last activity: if its
/// text equals the question verbatim, the bot is taken to have produced no
/// real reply and the accumulated text is discarded in favor of the fixed
/// "no response received" string.
fn classify_reply(question: &str, activities: &[Activity]) -> (OutcomeStatus, String) {
    let mut reply = String::new();
    for activity in activities.iter().skip(1) {
        if let Some(text) = activity.text.as_deref().filter(|t| !t.is_empty()) {
            reply.push('\n');
            reply.push_str(text);
        }
    }

    let last_text = activities
        .last()
        .and_then(|a| a.text.as_deref())
        .unwrap_or_default();

    if last_text == question {
        (OutcomeStatus::NoResponse, "no response received".to_owned())
    } else {
        (OutcomeStatus::Success, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(text: &str) -> Activity {
        Activity {
            text: Some(text.to_owned()),
        }
    }

    #[test]
    fn reply_concatenates_from_second_activity() {
        let activities = [activity("Is there a spa?"), activity("a"), activity("b")];
        let (status, reply) = classify_reply("Is there a spa?", &activities);
        assert_eq!(status, OutcomeStatus::Success);
        assert_eq!(reply, "\na\nb");
    }

    #[test]
    fn echo_on_last_activity_wins_over_accumulated_text() {
        let q = "Is there a spa?";
        let activities = [activity(q), activity("intermediate"), activity(q)];
        let (status, reply) = classify_reply(q, &activities);
        assert_eq!(status, OutcomeStatus::NoResponse);
        assert_eq!(reply, "no response received");
    }

    #[test]
    fn missing_and_empty_texts_are_skipped() {
        let activities = [
            activity("q"),
            Activity { text: None },
            activity(""),
            activity("answer"),
        ];
        let (status, reply) = classify_reply("q", &activities);
        assert_eq!(status, OutcomeStatus::Success);
        assert_eq!(reply, "\nanswer");
    }

    #[test]
    fn single_echo_activity_is_no_response() {
        let activities = [activity("q")];
        let (status, reply) = classify_reply("q", &activities);
        assert_eq!(status, OutcomeStatus::NoResponse);
        assert_eq!(reply, "no response received");
    }

    #[test]
    fn object_payload_gets_text_overwritten() {
        let template = json!({"type": "message", "from": {"id": "probe"}, "text": "template"});
        let payload = question_payload(&template, "Do you have parking?");
        assert_eq!(payload["text"], "Do you have parking?");
        assert_eq!(payload["type"], "message");
    }

    #[test]
    fn non_object_payload_degrades_to_bare_text() {
        let payload = question_payload(&Value::Null, "Do you have parking?");
        assert_eq!(payload, json!({"text": "Do you have parking?"}));
    }
}
