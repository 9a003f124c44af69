use std::sync::Arc;

use auth::CredentialHasher;
use auth::TokenService;
use serde_json::json;
use shop_service::account::models::AdminAllowlist;
use shop_service::account::service::AuthFlowService;
use shop_service::inbound::http::router::create_router;
use shop_service::repositories::InMemoryEntityStore;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Meets every password rule.
pub const STRONG_PASSWORD: &str = "Str0ng!Pass";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub token_service: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_service = Arc::new(TokenService::new(TEST_SECRET));
        let store = Arc::new(InMemoryEntityStore::new());

        // Lowest bcrypt cost keeps the suite fast
        let account_service = Arc::new(
            AuthFlowService::new(store, Arc::clone(&token_service))
                .with_hasher(CredentialHasher::with_cost(4))
                .with_admins(AdminAllowlist::new(["admin@gmail.com", "Boss@Shop.test"])),
        );

        let router = create_router(account_service, token_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            token_service: TokenService::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with the `x-access-token` header
    pub fn get_with_token(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header("x-access-token", token)
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a customer with a strong password, returning the response body
    pub async fn register_customer(&self, email: &str) -> serde_json::Value {
        let response = self
            .post("/register")
            .json(&json!({
                "email": email,
                "password": STRONG_PASSWORD,
                "firstName": "Test",
                "lastName": "Customer"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the issued token
    pub async fn login(&self, path: &str, email: &str, password: &str) -> String {
        let response = self
            .post(path)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("token missing")
            .to_string()
    }

    /// Enrol an employee through the gated route, using `token` as the caller
    pub async fn register_employee(&self, token: &str, email: &str) -> reqwest::Response {
        self.post_authenticated("/employee/register", token)
            .json(&json!({
                "email": email,
                "password": STRONG_PASSWORD,
                "firstName": "Test",
                "lastName": "Employee",
                "salary": 2500.0,
                "position": "Clerk"
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Token for an employee account that only exists in the token itself.
    ///
    /// Needed to enrol the first employee, since enrolment is gated.
    pub fn bootstrap_admin_token(&self) -> String {
        let identity = auth::Identity::new(0, "admin@gmail.com", auth::Role::Admin);
        self.token_service
            .issue(&identity, chrono::Duration::hours(1))
            .expect("Failed to issue token")
            .access_token
    }
}
