//! Handlers for the `/auth` resource (login, profile).

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use validator::Validate;
use furnitrack_core::error::CoreError;
use furnitrack_core::roles::Role;
use furnitrack_db::models::user::{CreateUser, LoginRequest, User, UserResponse};
use furnitrack_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Successful login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email + password and return a signed token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    input.validate()?;
    let email = input.email.trim().to_lowercase();

    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".into()).into());
    }

    let user = match &state.config.bootstrap {
        Some(bootstrap) if bootstrap.email == email => {
            check_password(&input.password, &bootstrap.password_hash)?;
            bootstrap_user(&state, &email, &bootstrap.password_hash).await?
        }
        _ => {
            let user = UserRepo::find_by_email(&state.pool, &email)
                .await?
                .ok_or_else(invalid_credentials)?;
            check_password(&input.password, &user.password_hash)?;
            user
        }
    };

    let role: Role = user.role.parse()?;
    let token = generate_access_token(user.id, &user.email, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, %role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: user.into(),
    }))
}

/// Argon2 verification; a mismatch is the generic login failure.
fn check_password(password: &str, hash: &str) -> AppResult<()> {
    let valid = verify_password(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if valid {
        Ok(())
    } else {
        Err(invalid_credentials())
    }
}

/// The admin row backing the bootstrap credential, created on first login.
async fn bootstrap_user(state: &AppState, email: &str, password_hash: &str) -> AppResult<User> {
    if let Some(user) = UserRepo::find_by_email(&state.pool, email).await? {
        return Ok(user);
    }

    let user = UserRepo::find_or_create(
        &state.pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: Role::Admin.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Created bootstrap admin user");
    Ok(user)
}

/// GET /api/auth/profile
///
/// The authenticated user's account.
pub async fn profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;

    Ok(Json(user.into()))
}
