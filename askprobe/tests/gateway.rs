//! Dispatcher tests against an in-process stand-in for the Directline
//! gateway, listening on an ephemeral local port.

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use askprobe::{ask_hotel, Client, Config};
use shared::{Hotel, OutcomeStatus};

#[derive(Clone)]
struct Gateway {
    init_status: StatusCode,
    init_body: Value,
    send_status: StatusCode,
    activities: Option<Vec<Value>>,
    sends: Arc<AtomicUsize>,
    fetches: Arc<AtomicUsize>,
}

impl Gateway {
    fn replying_with(activities: Vec<Value>) -> Self {
        Self {
            init_status: StatusCode::OK,
            init_body: json!({ "conversationId": "conv-1" }),
            send_status: StatusCode::OK,
            activities: Some(activities),
            sends: Arc::new(AtomicUsize::new(0)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

async fn open_conversation(State(gw): State<Gateway>) -> (StatusCode, Json<Value>) {
    (gw.init_status, Json(gw.init_body.clone()))
}

async fn send_activity(State(gw): State<Gateway>) -> (StatusCode, Json<Value>) {
    gw.sends.fetch_add(1, Ordering::SeqCst);
    (gw.send_status, Json(json!({ "id": "activity-1" })))
}

async fn fetch_activities(State(gw): State<Gateway>) -> Json<Value> {
    gw.fetches.fetch_add(1, Ordering::SeqCst);
    match &gw.activities {
        Some(activities) => Json(json!({ "activities": activities })),
        None => Json(json!({})),
    }
}

/// Serves the mock gateway and returns a client pointed at it, with the
/// response delay zeroed out.
fn spawn_gateway(gw: Gateway) -> Client {
    let app = Router::new()
        .route("/conversations", post(open_conversation))
        .route(
            "/conversations/:id/activities",
            post(send_activity).get(fetch_activities),
        )
        .with_state(gw);

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service()),
    );

    Config::new(format!("http://{addr}"))
        .response_delay(Duration::ZERO)
        .client()
        .unwrap()
}

fn hotel() -> Hotel {
    Hotel {
        name: "Riad Dar".to_owned(),
        company_id: "company-7".to_owned(),
        payload: json!({"type": "message", "from": {"id": "probe"}, "text": ""}),
    }
}

const QUESTION: &str = "Do you have a pool?";

#[tokio::test]
async fn successful_reply_is_concatenated_from_second_activity() {
    let gw = Gateway::replying_with(vec![
        json!({ "text": QUESTION }),
        json!({ "text": "a" }),
        json!({ "text": "b" }),
    ]);
    let sends = gw.sends.clone();
    let fetches = gw.fetches.clone();
    let client = spawn_gateway(gw);

    let outcome = ask_hotel(&client, &hotel(), QUESTION).await;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert_eq!(outcome.response, "\na\nb");
    assert_eq!(outcome.hotel, "Riad Dar");
    assert_eq!(outcome.question, QUESTION);
    assert_eq!(sends.load(Ordering::SeqCst), 1);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn echo_on_last_activity_is_no_response() {
    let gw = Gateway::replying_with(vec![
        json!({ "text": QUESTION }),
        json!({ "text": "typing..." }),
        json!({ "text": QUESTION }),
    ]);
    let client = spawn_gateway(gw);

    let outcome = ask_hotel(&client, &hotel(), QUESTION).await;

    assert_eq!(outcome.status, OutcomeStatus::NoResponse);
    assert_eq!(outcome.response, "no response received");
}

#[tokio::test]
async fn initiation_failure_skips_send_and_fetch() {
    let mut gw = Gateway::replying_with(vec![]);
    gw.init_status = StatusCode::SERVICE_UNAVAILABLE;
    gw.init_body = json!({ "error": "down" });
    let sends = gw.sends.clone();
    let fetches = gw.fetches.clone();
    let client = spawn_gateway(gw);

    let outcome = ask_hotel(&client, &hotel(), QUESTION).await;

    assert_eq!(outcome.status, OutcomeStatus::Error);
    assert!(outcome.response.contains("failed to initiate conversation"));
    assert!(outcome.response.contains("503"));
    assert_eq!(sends.load(Ordering::SeqCst), 0);
    assert_eq!(fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_conversation_id_is_an_error() {
    let mut gw = Gateway::replying_with(vec![]);
    gw.init_body = json!({});
    let client = spawn_gateway(gw);

    let outcome = ask_hotel(&client, &hotel(), QUESTION).await;

    assert_eq!(outcome.status, OutcomeStatus::Error);
    assert!(outcome.response.contains("no conversation id"));
}

#[tokio::test]
async fn send_failure_reports_status_and_skips_fetch() {
    let mut gw = Gateway::replying_with(vec![]);
    gw.send_status = StatusCode::INTERNAL_SERVER_ERROR;
    let fetches = gw.fetches.clone();
    let client = spawn_gateway(gw);

    let outcome = ask_hotel(&client, &hotel(), QUESTION).await;

    assert_eq!(outcome.status, OutcomeStatus::Error);
    assert_eq!(outcome.response, "failed to send message (status 500)");
    assert_eq!(fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_activity_list_is_an_error() {
    let gw = Gateway::replying_with(vec![]);
    let client = spawn_gateway(gw);

    let outcome = ask_hotel(&client, &hotel(), QUESTION).await;

    assert_eq!(outcome.status, OutcomeStatus::Error);
    assert_eq!(outcome.response, "no activity found in response");
}

#[tokio::test]
async fn absent_activity_list_is_an_error() {
    let mut gw = Gateway::replying_with(vec![]);
    gw.activities = None;
    let client = spawn_gateway(gw);

    let outcome = ask_hotel(&client, &hotel(), QUESTION).await;

    assert_eq!(outcome.status, OutcomeStatus::Error);
    assert_eq!(outcome.response, "no activity found in response");
}
