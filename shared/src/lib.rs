//! Wire types shared between the HTTP facade and the core library.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A hotel bound to an external chatbot company.
///
/// `payload` is the message template forwarded to the conversation gateway;
/// its `text` field is overwritten with the question at dispatch time.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Hotel {
    pub name: String,
    pub company_id: String,
    pub payload: Value,
}

/// Public listing view of a [`Hotel`], with the payload template omitted.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HotelSummary {
    pub name: String,
    pub company_id: String,
}

impl From<&Hotel> for HotelSummary {
    fn from(hotel: &Hotel) -> Self {
        Self {
            name: hotel.name.clone(),
            company_id: hotel.company_id.clone(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    NoResponse,
    Error,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::NoResponse => "no_response",
            OutcomeStatus::Error => "error",
        }
    }
}

/// Result of probing one hotel with one question.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Outcome {
    pub hotel: String,
    pub question: String,
    pub response: String,
    pub status: OutcomeStatus,
}

/// Body of `POST /api/ask`. Fields are optional so the facade can answer
/// a plain 400 when one is missing instead of a deserialization rejection.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AskRequest {
    pub hotels: Option<Vec<String>>,
    pub questions: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AskResponse {
    pub timestamp: String,
    pub results: Vec<Outcome>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HotelsResponse {
    pub hotels: Vec<HotelSummary>,
}

/// Admin listing of hotels, payload templates included.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HotelRecordsResponse {
    pub hotels: Vec<Hotel>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewQuestionRequest {
    pub question: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UpdateQuestionRequest {
    pub new_question: Option<String>,
}

/// Body of admin hotel create/update. All three fields are required by the
/// facade, which validates them by hand to return 400 rather than 422.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HotelUpsertRequest {
    pub name: Option<String>,
    pub company_id: Option<String>,
    pub payload: Option<Value>,
}

impl HotelUpsertRequest {
    /// Returns the complete hotel record, or `None` if any field is missing.
    pub fn into_hotel(self) -> Option<Hotel> {
        Some(Hotel {
            name: self.name?,
            company_id: self.company_id?,
            payload: self.payload?,
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
}
