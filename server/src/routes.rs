use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;

use askprobe::{ask_hotel, Client, ConfigStore};
use shared::{
    AskRequest, AskResponse, ErrorResponse, Hotel, HotelsResponse, MessageResponse,
    QuestionsResponse,
};

use crate::admin;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<ConfigStore>>,
    pub client: Client,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/questions", get(list_questions))
        .route("/api/hotels", get(list_hotels))
        .route("/api/ask", post(ask))
        .merge(admin::routes())
        .with_state(state)
}

pub(crate) fn message(status: StatusCode, text: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            message: text.to_owned(),
        }),
    )
        .into_response()
}

pub(crate) fn error(status: StatusCode, text: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: text.to_owned(),
        }),
    )
        .into_response()
}

pub(crate) fn bad_request(text: &str) -> Response {
    error(StatusCode::BAD_REQUEST, text)
}

pub(crate) fn persist_failure(err: miette::Report) -> Response {
    tracing::error!(%err, "config persistence failed");
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to persist configuration",
    )
}

async fn list_questions(State(state): State<AppState>) -> Json<QuestionsResponse> {
    let store = state.store.lock().unwrap();
    Json(QuestionsResponse {
        questions: store.questions().to_vec(),
    })
}

/// Public hotel listing; payload templates stay server-side.
async fn list_hotels(State(state): State<AppState>) -> Json<HotelsResponse> {
    let store = state.store.lock().unwrap();
    Json(HotelsResponse {
        hotels: store.hotels().iter().map(Into::into).collect(),
    })
}

async fn ask(State(state): State<AppState>, Json(body): Json<AskRequest>) -> Response {
    let (Some(hotel_names), Some(question_texts)) = (body.hotels, body.questions) else {
        return bad_request("Missing required parameters: hotels and questions");
    };

    // Resolve both selections in store order; unknown names are dropped.
    let (hotels, questions) = {
        let store = state.store.lock().unwrap();
        let hotels: Vec<Hotel> = store
            .hotels()
            .iter()
            .filter(|h| hotel_names.contains(&h.name))
            .cloned()
            .collect();
        let questions: Vec<String> = store
            .questions()
            .iter()
            .filter(|q| question_texts.contains(q))
            .cloned()
            .collect();
        (hotels, questions)
    };

    if hotels.is_empty() || questions.is_empty() {
        return bad_request("No valid hotels or questions selected");
    }

    // Strictly sequential: one gateway conversation in flight at a time.
    let mut results = Vec::with_capacity(hotels.len() * questions.len());
    for hotel in &hotels {
        for question in &questions {
            results.push(ask_hotel(&state.client, hotel, question).await);
        }
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    Json(AskResponse { timestamp, results }).into_response()
}

#[cfg(test)]
pub(crate) mod testing {
    use serde_json::json;

    use super::*;

    /// Router over a store seeded with two questions and one hotel. The
    /// gateway client points at an unroutable address; tests that reach it
    /// are broken by construction.
    pub(crate) fn seeded_app() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ConfigStore::open(dir.path().join("config.json")).unwrap();
        store.add_question("Do you have parking?").unwrap();
        store.add_question("Is breakfast included?").unwrap();
        store
            .add_hotel(Hotel {
                name: "Riad Dar".to_owned(),
                company_id: "company-7".to_owned(),
                payload: json!({"type": "message", "text": ""}),
            })
            .unwrap();

        let state = AppState {
            store: Arc::new(Mutex::new(store)),
            client: askprobe::Config::new("http://127.0.0.1:1").client().unwrap(),
        };
        (app(state), dir)
    }
}
