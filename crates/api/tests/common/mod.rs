//! Shared harness for router tests: in-memory database, swappable notifier,
//! and signed test tokens.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use api::{AppState, AvatarStore, Claims, TokenVerifier};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use database::{role, Database};
use geocoder::{GeocoderConfig, ReverseGeocoder};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use marketplace_core::{Notifier, Role};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const SECRET: &str = "test-signing-secret";

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub async fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_geocoder(notifier, GeocoderConfig::new("http://127.0.0.1:9")).await
    }

    pub async fn with_geocoder(notifier: Arc<dyn Notifier>, geocoder: GeocoderConfig) -> Self {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();

        let upload_dir = std::env::temp_dir().join(format!(
            "agentwaala-api-test-{}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));

        let state = AppState::new(
            db.clone(),
            notifier,
            ReverseGeocoder::new(geocoder).unwrap(),
            TokenVerifier::new(&SecretString::from(SECRET.to_string())),
            AvatarStore::new(&upload_dir),
        );

        Self {
            router: api::app(state),
            db,
            upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(request(Method::POST, uri, token, Some(body))).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(request(Method::PUT, uri, token, Some(body))).await
    }

    /// Sign up through onboarding and return the user's token.
    pub async fn onboard(&self, user_id: &str, role: &str) -> String {
        let token = token_for(user_id, Some(&format!("{}@example.in", user_id)));
        let (status, body) = self
            .post("/api/onboarding/role", Some(&token), json!({ "role": role }))
            .await;
        assert_eq!(status, StatusCode::OK, "onboarding failed: {}", body);
        token
    }

    /// An agent with a complete profile; returns (token, agent id).
    pub async fn complete_agent(&self, user_id: &str, name: &str) -> (String, String) {
        let token = self.onboard(user_id, "agent").await;
        let (status, body) = self
            .put("/api/me/agent", Some(&token), complete_profile(name))
            .await;
        assert_eq!(status, StatusCode::OK, "profile save failed: {}", body);
        let id = body["agent"]["id"].as_str().unwrap().to_string();
        (token, id)
    }

    /// Admins cannot onboard themselves, so seed the role directly.
    pub async fn admin(&self) -> String {
        role::assign_role(self.db.pool(), "admin-1", Role::Admin)
            .await
            .unwrap();
        token_for("admin-1", Some("admin@example.in"))
    }

    pub async fn verified_agent(&self, admin: &str, user_id: &str, name: &str) -> (String, String) {
        let (token, id) = self.complete_agent(user_id, name).await;
        let (status, _) = self
            .post(&format!("/api/admin/agents/{}/verify", id), Some(admin), json!({}))
            .await;
        assert_eq!(status, StatusCode::OK);
        (token, id)
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn token_for(user_id: &str, email: Option<&str>) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.map(str::to_string),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn complete_profile(name: &str) -> Value {
    json!({
        "name": name,
        "phone": "9876543210",
        "categories": ["real-estate"],
        "state": "Karnataka",
        "city": "Bengaluru",
        "area": "Indiranagar",
        "postal_code": "560038",
        "description": "Residential rentals and sales",
        "offers": ""
    })
}
