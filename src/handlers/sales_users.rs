// src/handlers/sales_users.rs

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
    db::constraints::{bail_if_errors, check_exists, check_unique},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSalesUserPayload {
    #[validate(required(message = "The agency_id field is required."))]
    pub agency_id: Option<i64>,

    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name may not be greater than 255 characters.")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSalesUserPayload {
    pub agency_id: Option<i64>,

    #[validate(length(max = 255, message = "The name may not be greater than 255 characters."))]
    pub name: Option<String>,
}

// GET /api/sales-user
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let sales_users = app_state.sales_users.list().await?;

    Ok(envelope(
        StatusCode::OK,
        sales_users,
        "Sales users retrieved successfully",
    ))
}

// POST /api/sales-user
pub async fn store(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSalesUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(agency_id) = payload.agency_id {
        check_exists(&app_state.db_pool, "agencies", "agency_id", agency_id, &mut errors).await?;
    }
    if let Some(name) = payload.name.as_deref() {
        check_unique(&app_state.db_pool, "sales_users", "name", name, None, &mut errors).await?;
    }
    bail_if_errors(errors)?;

    let sales_user = app_state
        .sales_users
        .create(
            payload.agency_id.unwrap_or_default(),
            payload.name.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(envelope(
        StatusCode::CREATED,
        sales_user,
        "Sales user created successfully",
    ))
}

// GET /api/sales-user/{id}
pub async fn show(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sales_user = app_state
        .sales_users
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Sales user"))?;

    Ok(envelope(
        StatusCode::OK,
        sales_user,
        "Sales user retrieved successfully",
    ))
}

// PUT /api/sales-user/{id}
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSalesUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let sales_user = app_state
        .sales_users
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Sales user"))?;

    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(agency_id) = payload.agency_id {
        check_exists(&app_state.db_pool, "agencies", "agency_id", agency_id, &mut errors).await?;
    }
    if let Some(name) = payload.name.as_deref() {
        check_unique(
            &app_state.db_pool,
            "sales_users",
            "name",
            name,
            Some(sales_user.id),
            &mut errors,
        )
        .await?;
    }
    bail_if_errors(errors)?;

    let updated = app_state
        .sales_users
        .update(sales_user.id, payload.agency_id, payload.name.as_deref())
        .await?;

    Ok(envelope(
        StatusCode::OK,
        updated,
        "Sales user updated successfully",
    ))
}

// DELETE /api/sales-user/{id}
pub async fn destroy(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sales_user = app_state
        .sales_users
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Sales user"))?;

    app_state.sales_users.delete(sales_user.id).await?;

    Ok(envelope(
        StatusCode::OK,
        serde_json::json!({}),
        "Sales user deleted successfully",
    ))
}
