//! Form submission against a mock REST backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::{Json, Router};
use serde_json::{json, Value};

use xrpl_console::backend::{BackendClient, BackendError};
use xrpl_console::forms::{self, account, oracle, payment, server, ConsoleError, Secret};
use xrpl_console::render::render;

mod common;

const SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const DESTINATION: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";

/// Records every request and answers with a fixed status and body.
#[derive(Clone)]
struct MockBackend {
    seen: Arc<Mutex<Vec<Value>>>,
    reply: Arc<(StatusCode, String)>,
}

async fn respond(State(mock): State<MockBackend>, request: Request<Body>) -> (StatusCode, String) {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let bytes = to_bytes(request.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    mock.seen
        .lock()
        .unwrap()
        .push(json!({"method": method, "path": path, "query": query, "body": body}));
    mock.reply.as_ref().clone()
}

async fn backend(status: StatusCode, reply: &str) -> (BackendClient, Arc<Mutex<Vec<Value>>>) {
    let mock = MockBackend {
        seen: Arc::new(Mutex::new(Vec::new())),
        reply: Arc::new((status, reply.to_string())),
    };
    let seen = mock.seen.clone();
    let addr = common::spawn_app(Router::new().fallback(respond).with_state(mock)).await;
    let client = BackendClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    (client, seen)
}

fn success(result: Value) -> String {
    json!({"status": "success", "result": result}).to_string()
}

#[tokio::test]
async fn test_malformed_address_never_reaches_backend() {
    let (client, seen) = backend(StatusCode::OK, &success(json!({}))).await;
    let form = account::AccountInfo {
        address: "rNotAnAddress".into(),
    };

    let err = forms::submit(&client, &form).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Form(_)));
    assert!(err.user_message().starts_with("address"));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_seed_never_reaches_backend() {
    let (client, seen) = backend(StatusCode::OK, &success(json!({}))).await;
    let form = payment::SendXrp {
        seed: Secret::default(),
        destination: DESTINATION.into(),
        amount: "1".into(),
        destination_tag: None,
        memo: None,
    };

    let err = forms::submit(&client, &form).await.unwrap_err();
    assert_eq!(err.user_message(), "seed is required");
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_send_xrp_posts_drops() {
    let (client, seen) = backend(StatusCode::OK, &success(json!({"hash": "ABC"}))).await;
    let form = payment::SendXrp {
        seed: Secret::new(SEED),
        destination: DESTINATION.into(),
        amount: "12.5".into(),
        destination_tag: Some(7),
        memo: None,
    };

    let result = forms::submit(&client, &form).await.unwrap();
    assert_eq!(result["hash"], "ABC");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["method"], "POST");
    assert_eq!(seen[0]["path"], "/api/payment/send-xrp");
    assert_eq!(seen[0]["body"]["amount"], "12500000");
    assert_eq!(seen[0]["body"]["destination"], DESTINATION);
}

#[tokio::test]
async fn test_account_info_presents_xrp_balance() {
    let reply = success(json!({"Account": ACCOUNT, "Balance": "25000000", "Sequence": 3}));
    let (client, seen) = backend(StatusCode::OK, &reply).await;
    let form = account::AccountInfo { address: ACCOUNT.into() };

    let result = forms::submit(&client, &form).await.unwrap();
    assert_eq!(result["BalanceXRP"], "25");
    assert!(render(&result).contains("BalanceXRP:  25"));
    assert_eq!(seen.lock().unwrap()[0]["path"], format!("/api/account/info/{}", ACCOUNT));
}

#[tokio::test]
async fn test_query_parameters_are_sent() {
    let (client, seen) = backend(StatusCode::OK, &success(json!([]))).await;
    let form = account::AccountTransactions {
        address: ACCOUNT.into(),
        limit: Some(20),
    };

    let result = forms::submit(&client, &form).await.unwrap();
    assert_eq!(render(&result), "(no results)");
    assert_eq!(seen.lock().unwrap()[0]["query"], "limit=20");
}

#[tokio::test]
async fn test_http_error_message_is_extracted() {
    let reply = json!({"error": {"message": "Account not found"}}).to_string();
    let (client, _) = backend(StatusCode::INTERNAL_SERVER_ERROR, &reply).await;

    let err = forms::submit(&client, &account::AccountInfo { address: ACCOUNT.into() })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Backend(BackendError::Http { status: 500, .. })
    ));
    assert_eq!(err.user_message(), "Account not found");
}

#[tokio::test]
async fn test_unstructured_error_falls_back_to_generic_message() {
    let (client, _) = backend(StatusCode::BAD_REQUEST, "{}").await;

    let err = forms::submit(&client, &server::ServerInfo).await.unwrap_err();
    assert_eq!(err.user_message(), "An unexpected error occurred");
}

#[tokio::test]
async fn test_envelope_error_is_rejected() {
    let reply = json!({"status": "error", "message": "tecUNFUNDED_PAYMENT"}).to_string();
    let (client, _) = backend(StatusCode::OK, &reply).await;

    let err = forms::submit(&client, &server::Fee).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Backend(BackendError::Rejected { .. })));
    assert_eq!(err.user_message(), "tecUNFUNDED_PAYMENT");
}

#[tokio::test]
async fn test_non_json_success_is_invalid_response() {
    let (client, _) = backend(StatusCode::OK, "<html>").await;

    let err = forms::submit(&client, &server::ServerInfo).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Backend(BackendError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_oracle_prices_are_decoded() {
    let reply = success(json!({
        "Owner": ACCOUNT,
        "PriceDataSeries": [
            {"PriceData": {"BaseAsset": "XRP", "QuoteAsset": "USD", "AssetPrice": "74", "Scale": 2}}
        ]
    }));
    let (client, seen) = backend(StatusCode::OK, &reply).await;
    let form = oracle::GetOracle {
        address: ACCOUNT.into(),
        document_id: 1,
    };

    let result = forms::submit(&client, &form).await.unwrap();
    let price = &result["PriceDataSeries"][0]["PriceData"];
    assert_eq!(price["Price"], "1.16");
    assert_eq!(seen.lock().unwrap()[0]["path"], format!("/api/oracle/{}/1", ACCOUNT));
}
