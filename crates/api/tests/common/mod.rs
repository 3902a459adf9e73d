#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use alumni_api::auth::jwt::{generate_session_token, JwtConfig};
use alumni_api::auth::oauth::IdentityProvider;
use alumni_api::config::ServerConfig;
use alumni_api::router::build_app_router;
use alumni_api::state::AppState;
use alumni_core::alumni::ValidAlumni;
use alumni_core::audit::AdminAction;
use alumni_core::connection::{RequestCategory, ValidSubmission};
use alumni_core::entity::EntityKind;
use alumni_core::roles::Role;
use alumni_core::types::DbId;
use alumni_db::models::admin_log::AuditDraft;
use alumni_db::models::alumni::Alumni;
use alumni_db::models::connection_request::ConnectionRequest;
use alumni_db::models::user::{CreateUser, User};
use alumni_db::{MemoryStore, Store};
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Password of accounts created with [`TestApp::seed_with_password`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Pages are served from `tests/fixtures/site` so gate tests can tell a
/// pass-through (200) from a redirect (307).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_ttl_hours: 24,
        },
        cookie_secure: false,
        static_dir: Some(fixture_site()),
        google: None,
        bootstrap_admin: None,
    }
}

pub fn fixture_site() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site")
}

/// The production router over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: Arc<ServerConfig>,
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config(), None)
}

pub fn build_test_app_with(
    config: ServerConfig,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let config = Arc::new(config);

    let state = AppState {
        store: store.clone() as Arc<dyn Store>,
        config: Arc::clone(&config),
        identity_provider,
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        config,
    }
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn token_for(&self, user: &User) -> String {
        generate_session_token(user, &self.config.jwt).expect("token generation should succeed")
    }

    async fn insert_user(&self, input: CreateUser) -> User {
        self.store
            .create_user(&input, None)
            .await
            .expect("user creation should succeed")
    }

    /// A staff principal without a password; authenticate with [`Self::token_for`].
    pub async fn seed_staff(&self, name: &str, email: &str, role: Role) -> User {
        self.insert_user(CreateUser {
            name: Some(name.to_string()),
            email: email.to_string(),
            password_hash: None,
            role,
            is_profile_complete: true,
            image: None,
        })
        .await
    }

    pub async fn seed_admin(&self) -> User {
        self.seed_staff("Asha", "asha@example.org", Role::Admin).await
    }

    pub async fn seed_student(&self, email: &str, profile_complete: bool) -> User {
        self.insert_user(CreateUser {
            name: Some("Ravi Kumar".to_string()),
            email: email.to_string(),
            password_hash: None,
            role: Role::Student,
            is_profile_complete: profile_complete,
            image: None,
        })
        .await
    }

    /// A principal that can sign in with [`TEST_PASSWORD`].
    pub async fn seed_with_password(&self, email: &str, role: Role) -> User {
        let hash = alumni_api::auth::password::hash_password(TEST_PASSWORD)
            .expect("hashing should succeed");
        self.insert_user(CreateUser {
            name: Some("Asha".to_string()),
            email: email.to_string(),
            password_hash: Some(hash),
            role,
            is_profile_complete: true,
            image: None,
        })
        .await
    }

    pub async fn seed_alumni(&self, admin: &User, name: &str, company: &str) -> Alumni {
        let input = ValidAlumni {
            name: name.to_string(),
            email: None,
            course: "B.Tech Computer Science".to_string(),
            graduation_year: 2018,
            current_role: Some("Software Engineer".to_string()),
            company: Some(company.to_string()),
            domain: Some("Technology".to_string()),
            location: Some("Bengaluru".to_string()),
            summary: None,
            linkedin: None,
            image: None,
        };
        let draft = AuditDraft::new(
            admin.id,
            AdminAction::AddAlumni,
            EntityKind::Alumni,
            format!("Added alumni: {name}"),
        );
        self.store
            .create_alumni(&input, &draft)
            .await
            .expect("alumni creation should succeed")
    }

    pub async fn seed_request(&self, alumni_id: DbId, student_name: &str) -> ConnectionRequest {
        let input = ValidSubmission {
            student_name: student_name.to_string(),
            student_email: "ravi@example.org".to_string(),
            subject: "Guidance on backend roles".to_string(),
            message: long_message(),
            category: RequestCategory::Mentorship,
            alumni_id,
        };
        self.store
            .create_request(&input)
            .await
            .expect("request creation should succeed")
            .expect("alumni should exist")
    }
}

/// A 110-character message, comfortably over the minimum.
pub fn long_message() -> String {
    "I am a final-year student hoping to learn how you moved into backend engineering. ".repeat(2)[..110]
        .to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request through the router.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// A GET carrying the session in a cookie, the way a browser sends it.
pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}

/// Every `Set-Cookie` value on the response.
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}
