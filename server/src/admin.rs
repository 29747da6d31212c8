//! Admin CRUD endpoints over the config store. Status codes mirror the
//! store contract: 201 on create, 409 on duplicate, 404 on not-found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};

use shared::{
    HotelRecordsResponse, HotelUpsertRequest, NewQuestionRequest, QuestionsResponse,
    UpdateQuestionRequest,
};

use crate::routes::{bad_request, error, message, persist_failure, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/questions",
            get(list_questions).post(add_question),
        )
        .route(
            "/api/admin/questions/:question",
            put(update_question).delete(delete_question),
        )
        .route("/api/admin/hotels", get(list_hotels).post(add_hotel))
        .route(
            "/api/admin/hotels/:name",
            put(update_hotel).delete(delete_hotel),
        )
}

async fn list_questions(State(state): State<AppState>) -> Json<QuestionsResponse> {
    let store = state.store.lock().unwrap();
    Json(QuestionsResponse {
        questions: store.questions().to_vec(),
    })
}

async fn add_question(
    State(state): State<AppState>,
    Json(body): Json<NewQuestionRequest>,
) -> Response {
    let Some(question) = body.question else {
        return bad_request("Question is required");
    };

    match state.store.lock().unwrap().add_question(&question) {
        Ok(true) => message(StatusCode::CREATED, "Question added successfully"),
        Ok(false) => error(StatusCode::CONFLICT, "Question already exists"),
        Err(err) => persist_failure(err),
    }
}

async fn update_question(
    State(state): State<AppState>,
    Path(question): Path<String>,
    Json(body): Json<UpdateQuestionRequest>,
) -> Response {
    let Some(new_question) = body.new_question else {
        return bad_request("New question is required");
    };

    match state
        .store
        .lock()
        .unwrap()
        .update_question(&question, &new_question)
    {
        Ok(true) => message(StatusCode::OK, "Question updated successfully"),
        Ok(false) => error(StatusCode::NOT_FOUND, "Question not found"),
        Err(err) => persist_failure(err),
    }
}

async fn delete_question(State(state): State<AppState>, Path(question): Path<String>) -> Response {
    match state.store.lock().unwrap().delete_question(&question) {
        Ok(true) => message(StatusCode::OK, "Question deleted successfully"),
        Ok(false) => error(StatusCode::NOT_FOUND, "Question not found"),
        Err(err) => persist_failure(err),
    }
}

/// Admin listing keeps the payload templates, unlike the public one.
async fn list_hotels(State(state): State<AppState>) -> Json<HotelRecordsResponse> {
    let store = state.store.lock().unwrap();
    Json(HotelRecordsResponse {
        hotels: store.hotels().to_vec(),
    })
}

async fn add_hotel(
    State(state): State<AppState>,
    Json(body): Json<HotelUpsertRequest>,
) -> Response {
    let Some(hotel) = body.into_hotel() else {
        return bad_request("Missing required fields");
    };

    match state.store.lock().unwrap().add_hotel(hotel) {
        Ok(true) => message(StatusCode::CREATED, "Hotel added successfully"),
        Ok(false) => error(StatusCode::CONFLICT, "Hotel already exists"),
        Err(err) => persist_failure(err),
    }
}

async fn update_hotel(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<HotelUpsertRequest>,
) -> Response {
    let Some(hotel) = body.into_hotel() else {
        return bad_request("Missing required fields");
    };

    match state.store.lock().unwrap().update_hotel(&name, hotel) {
        Ok(true) => message(StatusCode::OK, "Hotel updated successfully"),
        Ok(false) => error(StatusCode::NOT_FOUND, "Hotel not found"),
        Err(err) => persist_failure(err),
    }
}

async fn delete_hotel(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.store.lock().unwrap().delete_hotel(&name) {
        Ok(true) => message(StatusCode::OK, "Hotel deleted successfully"),
        Ok(false) => error(StatusCode::NOT_FOUND, "Hotel not found"),
        Err(err) => persist_failure(err),
    }
}
