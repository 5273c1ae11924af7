// src/handlers/operators.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, FieldErrors},
        response::envelope,
    },
    config::AppState,
    db::constraints::{bail_if_errors, check_unique},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOperatorPayload {
    #[validate(
        required(message = "The name field is required."),
        length(max = 10, message = "The name may not be greater than 10 characters.")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOperatorPayload {
    #[validate(length(max = 10, message = "The name may not be greater than 10 characters."))]
    pub name: Option<String>,
}

// GET /api/operators
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let operators = app_state.operators.list().await?;

    Ok(envelope(
        StatusCode::OK,
        operators,
        "Operators retrieved successfully",
    ))
}

// POST /api/operators
pub async fn store(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOperatorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(name) = payload.name.as_deref() {
        check_unique(&app_state.db_pool, "operators", "name", name, None, &mut errors).await?;
    }
    bail_if_errors(errors)?;

    let operator = app_state
        .operators
        .create(payload.name.as_deref().unwrap_or_default())
        .await?;

    Ok(envelope(
        StatusCode::CREATED,
        operator,
        "Operator created successfully",
    ))
}

// GET /api/operators/{id}
pub async fn show(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let operator = app_state
        .operators
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Operator"))?;

    Ok(envelope(
        StatusCode::OK,
        operator,
        "Operator retrieved successfully",
    ))
}

// PUT /api/operators/{id}
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOperatorPayload>,
) -> Result<impl IntoResponse, AppError> {
    let operator = app_state
        .operators
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Operator"))?;

    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(name) = payload.name.as_deref() {
        check_unique(
            &app_state.db_pool,
            "operators",
            "name",
            name,
            Some(operator.id),
            &mut errors,
        )
        .await?;
    }
    bail_if_errors(errors)?;

    let updated = app_state
        .operators
        .update(operator.id, payload.name.as_deref())
        .await?;

    Ok(envelope(
        StatusCode::OK,
        updated,
        "Operator updated successfully",
    ))
}

// DELETE /api/operators/{id}
pub async fn destroy(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let operator = app_state
        .operators
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Operator"))?;

    app_state.operators.delete(operator.id).await?;

    Ok(envelope(
        StatusCode::OK,
        serde_json::json!({}),
        "Operator deleted successfully",
    ))
}
