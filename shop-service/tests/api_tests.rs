mod common;

use auth::Role;
use common::TestApp;
use common::STRONG_PASSWORD;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "API Running okay");
}

#[tokio::test]
async fn test_register_customer_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "email": "a@x.com",
            "password": "Abcdef1!",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "address": "12 Analytical Row",
            "dob": "1815-12-10"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["kind"], "customer");
    assert_eq!(body["data"]["firstName"], "Ada");
    assert_eq!(body["data"]["dob"], "1815-12-10");
    assert!(body["data"]["id"].is_i64());
    assert!(body["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_register_response_never_contains_credential() {
    let app = TestApp::spawn().await;

    let body = app.register_customer("a@x.com").await;

    let data = body["data"].as_object().expect("data must be an object");
    assert!(!data.contains_key("password"));
    assert!(!data.contains_key("passwordHash"));
    assert!(!data.contains_key("password_hash"));
    assert!(!body.to_string().contains("$2b$"));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register_customer("a@x.com").await;

    let response = app
        .post("/register")
        .json(&json!({ "email": "a@x.com", "password": "Abcdef1!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Conflict");
    assert!(body["details"].as_str().unwrap().contains("a@x.com"));
}

#[tokio::test]
async fn test_register_duplicate_email_in_other_case() {
    let app = TestApp::spawn().await;

    app.register_customer("a@x.com").await;

    let response = app
        .post("/register")
        .json(&json!({ "email": "A@X.Com", "password": STRONG_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Login matches the same account whatever the case
    app.login("/login", "A@x.COM", STRONG_PASSWORD).await;
}

#[tokio::test]
async fn test_register_weak_password_lists_reasons() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({ "email": "a@x.com", "password": "weak" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("Uppercase letter missing"));
    assert!(details.contains("At least one numeric character required"));
    assert!(details.contains("Special character missing"));
    assert!(details.contains("Password length must be between 8 to 15 characters long"));

    // Nothing was persisted: the same email can still register
    app.register_customer("a@x.com").await;
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({ "email": "not-an-email", "password": STRONG_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_customer_success() {
    let app = TestApp::spawn().await;
    let registered = app.register_customer("a@x.com").await;

    let response = app
        .post("/login")
        .json(&json!({ "email": "a@x.com", "password": STRONG_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "CUSTOMER");
    assert_eq!(body["data"]["profile"]["id"], registered["data"]["id"]);
    assert!(body["data"]["expiresAt"].is_string());

    let identity = app
        .token_service
        .verify(body["data"]["token"].as_str().unwrap())
        .expect("token must verify");
    assert_eq!(identity.email, "a@x.com");
    assert_eq!(identity.role, Role::Customer);
    assert_eq!(Some(identity.subject_id), registered["data"]["id"].as_i64());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register_customer("a@x.com").await;

    let mut bodies = Vec::new();
    for (email, password) in [
        ("a@x.com", "Wr0ng!Pass"),
        ("nobody@x.com", STRONG_PASSWORD),
        ("not-an-email", STRONG_PASSWORD),
    ] {
        let response = app
            .post("/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        bodies.push(body);
    }

    assert_eq!(bodies[0]["details"], "Invalid credentials");
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[1], bodies[2]);
}

#[tokio::test]
async fn test_customer_cannot_log_in_as_employee() {
    let app = TestApp::spawn().await;
    app.register_customer("a@x.com").await;

    let response = app
        .post("/employee/login")
        .json(&json!({ "email": "a@x.com", "password": STRONG_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_employee_login_roles() {
    let app = TestApp::spawn().await;
    let bootstrap = app.bootstrap_admin_token();

    for email in ["admin@gmail.com", "boss@shop.test", "clerk@shop.test"] {
        let response = app.register_employee(&bootstrap, email).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let admin = app
        .login("/employee/login", "admin@gmail.com", STRONG_PASSWORD)
        .await;
    let configured_admin = app
        .login("/employee/login", "boss@shop.test", STRONG_PASSWORD)
        .await;
    let clerk = app
        .login("/employee/login", "clerk@shop.test", STRONG_PASSWORD)
        .await;

    assert_eq!(app.token_service.verify(&admin).unwrap().role, Role::Admin);
    assert_eq!(
        app.token_service.verify(&configured_admin).unwrap().role,
        Role::Admin
    );
    assert_eq!(app.token_service.verify(&clerk).unwrap().role, Role::Employee);
}

#[tokio::test]
async fn test_employee_register_requires_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/employee/register")
        .json(&json!({ "email": "clerk@shop.test", "password": STRONG_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["details"], "Missing auth token");
}

#[tokio::test]
async fn test_customer_cannot_register_employee() {
    let app = TestApp::spawn().await;
    app.register_customer("a@x.com").await;
    let token = app.login("/login", "a@x.com", STRONG_PASSWORD).await;

    let response = app.register_employee(&token, "sneaky@x.com").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_employee_cannot_enrol_admin_address() {
    let app = TestApp::spawn().await;
    let bootstrap = app.bootstrap_admin_token();
    app.register_employee(&bootstrap, "clerk@shop.test").await;
    let clerk = app
        .login("/employee/login", "clerk@shop.test", STRONG_PASSWORD)
        .await;

    for reserved in ["admin@gmail.com", "ADMIN@gmail.com", "boss@SHOP.test"] {
        let response = app.register_employee(&clerk, reserved).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "email {}", reserved);
    }

    // Nothing was created, so no admin login is possible
    let response = app
        .post("/employee/login")
        .json(&json!({ "email": "admin@gmail.com", "password": STRONG_PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_address_cannot_be_enrolled_twice() {
    let app = TestApp::spawn().await;
    let bootstrap = app.bootstrap_admin_token();

    let first = app.register_employee(&bootstrap, "admin@gmail.com").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.register_employee(&bootstrap, "ADMIN@gmail.com").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_employee_token_forbidden_on_customer_routes() {
    let app = TestApp::spawn().await;
    let bootstrap = app.bootstrap_admin_token();
    app.register_employee(&bootstrap, "clerk@shop.test").await;
    let token = app
        .login("/employee/login", "clerk@shop.test", STRONG_PASSWORD)
        .await;

    let response = app
        .get_with_token("/customer/1", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_customer_reads_own_profile_with_either_header() {
    let app = TestApp::spawn().await;
    let registered = app.register_customer("a@x.com").await;
    let id = registered["data"]["id"].as_i64().unwrap();
    let token = app.login("/login", "a@x.com", STRONG_PASSWORD).await;

    for request in [
        app.get_with_token(&format!("/customer/{}", id), &token),
        app.get_authenticated(&format!("/customer/{}", id), &token),
    ] {
        let response = request.send().await.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["data"]["email"], "a@x.com");
    }
}

#[tokio::test]
async fn test_customer_cannot_read_other_customers() {
    let app = TestApp::spawn().await;
    app.register_customer("a@x.com").await;
    let other = app.register_customer("b@x.com").await;
    let token = app.login("/login", "a@x.com", STRONG_PASSWORD).await;

    let response = app
        .get_with_token(
            &format!("/customer/{}", other["data"]["id"].as_i64().unwrap()),
            &token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .get_with_token("/customer/", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_reads_customers_and_employees() {
    let app = TestApp::spawn().await;
    let bootstrap = app.bootstrap_admin_token();
    app.register_employee(&bootstrap, "admin@gmail.com").await;
    app.register_customer("a@x.com").await;
    app.register_customer("b@x.com").await;
    let admin = app
        .login("/employee/login", "admin@gmail.com", STRONG_PASSWORD)
        .await;

    let response = app
        .get_with_token("/customer/", &admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let response = app
        .get_with_token("/customer/2", &admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_with_token("/employee/", &admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let employees = body["data"].as_array().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["position"], "Clerk");
    assert_eq!(employees[0]["salary"], 2500.0);
}

#[tokio::test]
async fn test_get_missing_employee() {
    let app = TestApp::spawn().await;

    let response = app
        .get_with_token("/employee/42", &app.bootstrap_admin_token())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_gate_rejects_tampered_and_expired_tokens() {
    let app = TestApp::spawn().await;
    let registered = app.register_customer("a@x.com").await;
    let id = registered["data"]["id"].as_i64().unwrap();
    let token = app.login("/login", "a@x.com", STRONG_PASSWORD).await;

    let mut tampered: Vec<char> = token.chars().collect();
    let idx = tampered.len() - 10;
    tampered[idx] = if tampered[idx] == 'A' { 'B' } else { 'A' };
    let tampered: String = tampered.into_iter().collect();

    let expired = app
        .token_service
        .issue(
            &auth::Identity::new(id, "a@x.com", Role::Customer),
            chrono::Duration::seconds(-10),
        )
        .unwrap()
        .access_token;

    for bad in [tampered, expired, "garbage".to_string()] {
        let response = app
            .get_with_token(&format!("/customer/{}", id), &bad)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_verify_token() {
    let app = TestApp::spawn().await;
    let registered = app.register_customer("a@x.com").await;
    let token = app.login("/login", "a@x.com", STRONG_PASSWORD).await;

    let response = app
        .get_authenticated("/verify", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], registered["data"]["id"]);
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["role"], "CUSTOMER");
    assert_eq!(body["data"]["kind"], "customer");
}

#[tokio::test]
async fn test_verify_token_rejections() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/verify")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get_authenticated("/verify", "garbage")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Validly signed, but no employee with id 0 exists
    let response = app
        .get_authenticated("/verify", &app.bootstrap_admin_token())
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
