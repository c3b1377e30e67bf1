//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use spendwise_core::{types::NewUser, ExpenseStore, User, UserStore};
use spendwise_server::{api, AppState, AuthService, ExpenseService, IdentityResolver};
use spendwise_storage::SqliteStore;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// A router over a fresh file-backed database
pub struct TestApp {
    pub router: Router,
    pub store: Arc<SqliteStore>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let url = format!("sqlite://{}", db_path.display());

        let pool = spendwise_storage::create_pool(&url).await.unwrap();
        spendwise_storage::run_migrations(&pool).await.unwrap();
        let store = Arc::new(SqliteStore::new(pool));

        let auth_service = Arc::new(create_test_auth_service());

        let expense_store: Arc<dyn ExpenseStore> = store.clone();
        let user_store: Arc<dyn UserStore> = store.clone();
        let resolver: Arc<dyn IdentityResolver> = auth_service.clone();

        let app_state = AppState::new(
            ExpenseService::new(expense_store),
            user_store,
            Arc::clone(&auth_service),
        );

        Self {
            router: api::create_router(app_state, resolver),
            store,
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Create a user directly in storage and return an access token for them
    pub async fn user_with_token(&self, name: &str) -> (User, String) {
        let hash = self.auth_service.hash_password(fixtures::TEST_PASSWORD).unwrap();
        let email = format!("{}@example.com", name.to_lowercase());
        let user = self
            .store
            .create_user(NewUser::new(name, &email, hash).unwrap())
            .await
            .unwrap();
        let token = self.auth_service.create_access_token(&user.id).unwrap();
        (user, token)
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }
}

pub fn create_test_auth_service() -> AuthService {
    AuthService::new(
        TEST_SECRET.to_string(),
        1, // 1 hour access token
        1, // 1 day refresh token
    )
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_NAME: &str = "Test User";
    pub const TEST_EMAIL: &str = "testuser@example.com";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
}
