// src/handlers/sales_types.rs

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
pub struct CreateSalesTypePayload {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name may not be greater than 255 characters.")
    )]
    pub name: Option<String>,

    #[validate(length(
        max = 255,
        message = "The description may not be greater than 255 characters."
    ))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSalesTypePayload {
    #[validate(length(max = 255, message = "The name may not be greater than 255 characters."))]
    pub name: Option<String>,

    #[validate(length(
        max = 255,
        message = "The description may not be greater than 255 characters."
    ))]
    pub description: Option<String>,
}

// GET /api/sales-type
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let types = app_state.catalog.list_sales_types().await?;

    Ok(envelope(
        StatusCode::OK,
        types,
        "Sales types retrieved successfully",
    ))
}

// POST /api/sales-type
pub async fn store(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSalesTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sales_type = app_state
        .catalog
        .create_sales_type(
            payload.name.as_deref().unwrap_or_default(),
            payload.description.as_deref(),
        )
        .await?;

    Ok(envelope(
        StatusCode::CREATED,
        sales_type,
        "Sales type created successfully",
    ))
}

// GET /api/sales-type/{id}
pub async fn show(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sales_type = app_state
        .catalog
        .find_sales_type(id)
        .await?
        .ok_or(AppError::NotFound("Sales type"))?;

    Ok(envelope(
        StatusCode::OK,
        sales_type,
        "Sales type retrieved successfully",
    ))
}

// PUT /api/sales-type/{id}
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSalesTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    let sales_type = app_state
        .catalog
        .find_sales_type(id)
        .await?
        .ok_or(AppError::NotFound("Sales type"))?;

    payload.validate()?;

    let updated = app_state
        .catalog
        .update_sales_type(
            sales_type.id,
            payload.name.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok(envelope(
        StatusCode::OK,
        updated,
        "Sales type updated successfully",
    ))
}

// DELETE /api/sales-type/{id}
pub async fn destroy(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sales_type = app_state
        .catalog
        .find_sales_type(id)
        .await?
        .ok_or(AppError::NotFound("Sales type"))?;

    app_state.catalog.delete_sales_type(sales_type.id).await?;

    Ok(envelope(
        StatusCode::OK,
        serde_json::json!({}),
        "Sales type deleted successfully",
    ))
}
