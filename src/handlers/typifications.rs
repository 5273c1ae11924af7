// src/handlers/typifications.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{common::{error::AppError, response::envelope}, config::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTypificationPayload {
    #[validate(
        required(message = "The name field is required."),
        length(max = 100, message = "The name may not be greater than 100 characters.")
    )]
    pub name: Option<String>,
}

// O limite de tamanho difere entre criação e atualização no sistema
// original; mantido assim.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTypificationPayload {
    #[validate(length(max = 255, message = "The name may not be greater than 255 characters."))]
    pub name: Option<String>,
}

// GET /api/typifications
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let typifications = app_state.catalog.list_typifications().await?;

    Ok(envelope(
        StatusCode::OK,
        typifications,
        "Typifications retrieved successfully",
    ))
}

// POST /api/typifications
pub async fn store(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTypificationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let typification = app_state
        .catalog
        .create_typification(payload.name.as_deref().unwrap_or_default())
        .await?;

    Ok(envelope(
        StatusCode::CREATED,
        typification,
        "Typification created successfully",
    ))
}

// GET /api/typifications/{id}
pub async fn show(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let typification = app_state
        .catalog
        .find_typification(id)
        .await?
        .ok_or(AppError::NotFound("Typification"))?;

    Ok(envelope(
        StatusCode::OK,
        typification,
        "Typification retrieved successfully",
    ))
}

// PUT /api/typifications/{id}
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTypificationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let typification = app_state
        .catalog
        .find_typification(id)
        .await?
        .ok_or(AppError::NotFound("Typification"))?;

    payload.validate()?;

    let updated = app_state
        .catalog
        .update_typification(typification.id, payload.name.as_deref())
        .await?;

    Ok(envelope(
        StatusCode::OK,
        updated,
        "Typification updated successfully",
    ))
}

// DELETE /api/typifications/{id}
pub async fn destroy(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let typification = app_state
        .catalog
        .find_typification(id)
        .await?
        .ok_or(AppError::NotFound("Typification"))?;

    app_state
        .catalog
        .delete_typification(typification.id)
        .await?;

    Ok(envelope(
        StatusCode::OK,
        serde_json::json!({}),
        "Typification deleted successfully",
    ))
}
