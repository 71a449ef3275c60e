//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params)
//! 2. Calls the account or balance service
//! 3. Returns HTTP response (JSON, status code)

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    services::{AccountService, BalanceMutationService},
    store::{AccountStore, TransactionLedger},
};

/// Account creation and lookup endpoints
pub mod accounts;
/// Service health endpoint
pub mod health;
/// Deposit, withdrawal and ledger endpoints
pub mod transactions;

/// Shared state handed to every handler.
///
/// Built once at startup from explicitly constructed storage handles.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub balances: BalanceMutationService,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountStore>, ledger: Arc<dyn TransactionLedger>) -> Self {
        Self {
            accounts: AccountService::new(Arc::clone(&accounts)),
            balances: BalanceMutationService::new(accounts, ledger),
        }
    }
}

/// Build the HTTP router with every route and the tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Accounts
        .route("/create-account", post(accounts::create_account))
        .route("/get-account", get(accounts::list_accounts))
        .route("/get-saldo/{no_rekening}", get(accounts::get_balance))
        // Balance mutations
        .route("/tabung", post(transactions::deposit))
        .route("/tarik", post(transactions::withdraw))
        .route(
            "/get-transaksi/{no_rekening}",
            get(transactions::list_transactions),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let store = Arc::new(MemoryStore::new());
        router(AppState::new(store.clone(), store))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn create(app: &Router, saldo: i64) -> String {
        let (status, body) = send(
            app,
            post_json(
                "/create-account",
                json!({
                    "nama": "Budi Santoso",
                    "email": "budi@example.com",
                    "password_hash": "rahasia",
                    "nik": 3171234567890001_i64,
                    "no_hp": "081234567890",
                    "saldo": saldo
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["no-rekening"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_then_read_balance() {
        let app = app();
        let number = create(&app, 125).await;

        assert_eq!(number.len(), 10);

        let (status, body) = send(&app, get(&format!("/get-saldo/{number}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["account"]["saldo"], 125.0);
        assert_eq!(body["account"]["roles"], "USER");
        assert!(body["account"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn create_with_missing_fields_is_bad_request() {
        let app = app();

        let (status, body) = send(
            &app,
            post_json("/create-account", json!({ "nama": "Budi" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app();
        let request = Request::post("/tabung")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn list_accounts_returns_every_account() {
        let app = app();
        create(&app, 0).await;
        create(&app, 10).await;

        let (status, body) = send(&app, get("/get-account")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["account"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let app = app();

        let (status, body) = send(&app, get("/get-saldo/0000000001")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "account_not_found");

        let (status, _) = send(
            &app,
            post_json("/tabung", json!({ "no_rekening": "0000000001", "saldo": 5 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deposit_and_withdraw_flow() {
        let app = app();
        let number = create(&app, 0).await;

        let (status, body) = send(
            &app,
            post_json("/tabung", json!({ "no_rekening": number, "saldo": 500 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["saldo"], 500.0);

        let (status, body) = send(
            &app,
            post_json("/tarik", json!({ "no_rekening": number, "saldo": 200 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["saldo"], 300.0);

        let (status, body) = send(
            &app,
            post_json("/tarik", json!({ "no_rekening": number, "saldo": 1000 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "insufficient_funds");

        let (status, body) = send(&app, get(&format!("/get-transaksi/{number}"))).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body["transactions"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["remark"], "TABUNG");
        assert_eq!(rows[0]["total_amount"], 500.0);
        assert_eq!(rows[1]["remark"], "TARIK");
        assert_eq!(rows[1]["total_amount"], 200.0);
    }

    #[tokio::test]
    async fn zero_deposit_is_bad_request() {
        let app = app();
        let number = create(&app, 0).await;

        let (status, body) = send(
            &app,
            post_json("/tabung", json!({ "no_rekening": number, "saldo": 0 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_amount");
    }

    #[tokio::test]
    async fn health_reports_connected_store() {
        let (status, body) = send(&app(), get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }
}
