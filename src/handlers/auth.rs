// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::{
        error::{field_errors, AppError},
        response::auth_envelope,
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(
        required(message = "The name field is required."),
        length(max = 80, message = "The name may not be greater than 80 characters.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "The email field is required."),
        email(message = "The email must be a valid email address.")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "The password field is required."),
        length(min = 6, message = "The password must be at least 6 characters.")
    )]
    pub password: Option<String>,

    // A confirmação é checada à mão no handler: os dois campos são
    // opcionais até a validação e o derive não cobre esse par.
    #[validate(required(message = "The c_password field is required."))]
    pub c_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

// POST /api/register (público)
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    // O registro responde 400 para validação, diferente dos recursos (422).
    let mut errors = match payload.validate() {
        Ok(()) => Default::default(),
        Err(e) => field_errors(&e),
    };
    if payload.c_password != payload.password {
        errors
            .entry("c_password".to_string())
            .or_default()
            .push("The c_password and password must match.".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::RegisterValidation(errors));
    }

    let name = payload.name.as_deref().unwrap_or_default();
    let email = payload.email.as_deref().unwrap_or_default();
    let password = payload.password.as_deref().unwrap_or_default();

    let (user, token) = app_state.auth_service.register(name, email, password).await?;

    Ok(auth_envelope(
        StatusCode::CREATED,
        json!({ "access_token": token, "name": user.name }),
        "User registered successfully",
    ))
}

// POST /api/login (público)
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (user, token) = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(auth_envelope(
        StatusCode::OK,
        json!({ "access_token": token, "user": user.name, "login": true }),
        "Login successful",
    ))
}

// POST /api/logout
pub async fn logout(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    app_state.auth_service.logout(user.id).await?;

    Ok(auth_envelope(
        StatusCode::OK,
        json!({}),
        "Logout successfully",
    ))
}

// GET /api/user
pub async fn user(AuthenticatedUser(user): AuthenticatedUser) -> impl IntoResponse {
    auth_envelope(
        StatusCode::OK,
        json!({ "id": user.id, "name": user.name, "email": user.email }),
        "User data",
    )
}
