//! Handlers for the `/auth` resource: credentials sign-in, sign-out, the
//! current session, and federated sign-in with Google.

use alumni_core::access::{landing_path, Identity};
use alumni_core::roles::Role;
use alumni_core::types::DbId;
use alumni_db::models::user::{CreateUser, User, UserResponse};
use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Redirect};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{
    build_cookie, expire_cookie, read_cookie, OAUTH_STATE_COOKIE, OAUTH_STATE_MAX_AGE_SECS,
    SESSION_COOKIE,
};
use crate::auth::jwt::generate_session_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by every endpoint that issues a session token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// The principal behind the current session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    pub is_profile_complete: bool,
}

/// Query string Google appends to the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign a session token for `user` and the cookie that carries it.
pub(crate) fn issue_session(state: &AppState, user: &User) -> AppResult<(String, String)> {
    let token = generate_session_token(user, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = build_cookie(
        SESSION_COOKIE,
        &token,
        state.config.jwt.ttl_secs(),
        state.config.cookie_secure,
    );
    Ok((token, cookie))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Sign in with email and password. Principals created through federated
/// sign-in have no password and cannot use this endpoint.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (input.email, input.password) else {
        return Err(AppError::validation("Email and password are required"));
    };
    let email = email.trim().to_lowercase();

    let invalid = || AppError::unauthorized("Invalid email or password");

    let user = state.store.find_user_by_email(&email).await?.ok_or_else(invalid)?;
    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;

    let valid = verify_password(&password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::info!(user_id = user.id, "Rejected sign-in: wrong password");
        return Err(invalid());
    }

    let (token, cookie) = issue_session(&state, &user)?;
    tracing::info!(user_id = user.id, role = %user.role, "Signed in with credentials");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(AuthResponse {
            token,
            expires_in: state.config.jwt.ttl_secs(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Sessions are stateless, so signing out only clears the cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, expire_cookie(SESSION_COOKIE, state.config.cookie_secure))],
    )
}

/// GET /api/auth/session
pub async fn session(RequireAuth(user): RequireAuth) -> Json<DataResponse<SessionView>> {
    Json(DataResponse {
        data: SessionView {
            id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_profile_complete: user.profile_complete,
        },
    })
}

/// GET /api/auth/google
///
/// Send the browser to Google's consent page. The random `state` is also
/// set as a cookie and checked on the way back.
pub async fn google_start(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let provider = state
        .identity_provider
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Google sign-in is not configured".into()))?;

    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let cookie = build_cookie(
        OAUTH_STATE_COOKIE,
        &nonce,
        OAUTH_STATE_MAX_AGE_SECS,
        state.config.cookie_secure,
    );

    Ok((
        [(SET_COOKIE, cookie)],
        Redirect::temporary(&provider.authorize_url(&nonce)),
    ))
}

/// GET /api/auth/google/callback
///
/// Complete federated sign-in. A first sign-in creates a `STUDENT` with an
/// incomplete profile; the browser then lands on onboarding.
pub async fn google_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> AppResult<impl IntoResponse> {
    let provider = state
        .identity_provider
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Google sign-in is not configured".into()))?;

    if let Some(error) = params.error {
        tracing::info!(%error, "Google sign-in cancelled or denied");
        return Err(AppError::unauthorized("Google sign-in was not completed"));
    }

    let expected = read_cookie(&headers, OAUTH_STATE_COOKIE);
    match (expected, params.state.as_deref()) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => return Err(AppError::unauthorized("Invalid sign-in state")),
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::validation("code is required"))?;

    let profile = provider.exchange_code(&code).await.map_err(|e| {
        tracing::warn!(error = %e, "Google code exchange failed");
        AppError::unauthorized("Google sign-in failed")
    })?;

    let user = state
        .store
        .upsert_federated_user(&CreateUser {
            name: profile.name,
            email: profile.email,
            password_hash: None,
            role: Role::Student,
            is_profile_complete: false,
            image: profile.picture,
        })
        .await?;

    let (_, session_cookie) = issue_session(&state, &user)?;
    let identity = Identity {
        role: user.role,
        profile_complete: user.is_profile_complete,
    };
    tracing::info!(user_id = user.id, role = %user.role, "Signed in with Google");

    Ok((
        AppendHeaders([
            (SET_COOKIE, session_cookie),
            (SET_COOKIE, expire_cookie(OAUTH_STATE_COOKIE, state.config.cookie_secure)),
        ]),
        Redirect::temporary(landing_path(&identity)),
    ))
}

