// src/handlers/records.rs
//
// Fichas de contato dos clientes. As rotas herdam as chaves do sistema
// original: consulta por user_id, atualização por customer_id e
// exclusão pelo id da ficha.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::{
        error::{AppError, FieldErrors},
        response::{envelope, Page, PageQuery},
        validation::digits_9,
    },
    config::AppState,
    db::constraints::{bail_if_errors, check_exists, check_unique},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecordPayload {
    #[validate(required(message = "The user_id field is required."))]
    pub user_id: Option<i64>,

    #[validate(required(message = "The operator_id field is required."))]
    pub operator_id: Option<i64>,

    #[validate(required(message = "The customer_id field is required."))]
    pub customer_id: Option<i64>,

    #[validate(
        required(message = "The phone field is required."),
        custom(function = "digits_9")
    )]
    pub phone: Option<String>,

    #[validate(length(
        max = 255,
        message = "The schedule_1 may not be greater than 255 characters."
    ))]
    pub schedule_1: Option<String>,

    #[validate(length(
        max = 255,
        message = "The schedule_2 may not be greater than 255 characters."
    ))]
    pub schedule_2: Option<String>,

    #[validate(length(
        max = 255,
        message = "The schedule_3 may not be greater than 255 characters."
    ))]
    pub schedule_3: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecordPayload {
    pub operator_id: Option<i64>,
    pub customer_id: Option<i64>,

    #[validate(custom(function = "digits_9"))]
    pub phone: Option<String>,

    #[validate(length(
        max = 255,
        message = "The schedule_1 may not be greater than 255 characters."
    ))]
    pub schedule_1: Option<String>,

    #[validate(length(
        max = 255,
        message = "The schedule_2 may not be greater than 255 characters."
    ))]
    pub schedule_2: Option<String>,

    #[validate(length(
        max = 255,
        message = "The schedule_3 may not be greater than 255 characters."
    ))]
    pub schedule_3: Option<String>,

    // O fechamento da ficha só acontece na atualização.
    pub status: Option<bool>,
}

// GET /api/customers-records
pub async fn index(
    State(app_state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = query.resolve();
    let total = app_state.records.count().await?;
    let records = app_state.records.list(page, per_page).await?;

    Ok(envelope(
        StatusCode::OK,
        Page::new(records, page, per_page, total),
        "Customer records retrieved successfully",
    ))
}

// POST /api/customers-records
pub async fn store(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateRecordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(user_id) = payload.user_id {
        check_exists(&app_state.db_pool, "users", "user_id", user_id, &mut errors).await?;
    }
    if let Some(operator_id) = payload.operator_id {
        check_exists(&app_state.db_pool, "operators", "operator_id", operator_id, &mut errors)
            .await?;
    }
    if let Some(customer_id) = payload.customer_id {
        check_exists(&app_state.db_pool, "customers", "customer_id", customer_id, &mut errors)
            .await?;
    }
    if let Some(phone) = payload.phone.as_deref() {
        check_unique(&app_state.db_pool, "customer_records", "phone", phone, None, &mut errors)
            .await?;
    }
    bail_if_errors(errors)?;

    let record = app_state
        .records
        .create(
            payload.user_id.unwrap_or_default(),
            payload.operator_id.unwrap_or_default(),
            payload.customer_id.unwrap_or_default(),
            payload.phone.as_deref().unwrap_or_default(),
            payload.schedule_1.as_deref(),
            payload.schedule_2.as_deref(),
            payload.schedule_3.as_deref(),
        )
        .await?;

    Ok(envelope(
        StatusCode::CREATED,
        record,
        "Customer record created successfully",
    ))
}

// GET /api/customers-records/{user_id}
pub async fn show(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state
        .records
        .find_data_by_user(user_id)
        .await?
        .ok_or(AppError::NotFound("Customer record"))?;

    Ok(envelope(
        StatusCode::OK,
        record,
        "Customer record retrieved successfully",
    ))
}

// PUT /api/customers-records/{customer_id}
pub async fn update(
    State(app_state): State<AppState>,
    Path(customer_id): Path<i64>,
    Json(payload): Json<UpdateRecordPayload>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state
        .records
        .find_by_customer(customer_id)
        .await?
        .ok_or(AppError::NotFound("Customer record"))?;

    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(operator_id) = payload.operator_id {
        check_exists(&app_state.db_pool, "operators", "operator_id", operator_id, &mut errors)
            .await?;
    }
    if let Some(new_customer) = payload.customer_id {
        check_exists(&app_state.db_pool, "customers", "customer_id", new_customer, &mut errors)
            .await?;
    }
    if let Some(phone) = payload.phone.as_deref() {
        check_unique(
            &app_state.db_pool,
            "customer_records",
            "phone",
            phone,
            Some(record.id),
            &mut errors,
        )
        .await?;
    }
    bail_if_errors(errors)?;

    let updated = app_state
        .records
        .update(
            record.id,
            payload.operator_id,
            payload.customer_id,
            payload.phone.as_deref(),
            payload.schedule_1.as_deref(),
            payload.schedule_2.as_deref(),
            payload.schedule_3.as_deref(),
            payload.status,
        )
        .await?;

    Ok(envelope(
        StatusCode::OK,
        updated,
        "Customer record updated successfully",
    ))
}

// DELETE /api/customers-records/{id}
pub async fn destroy(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state
        .records
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Customer record"))?;

    app_state.records.delete(record.id).await?;

    Ok(envelope(
        StatusCode::OK,
        serde_json::json!({}),
        "Customer record deleted successfully",
    ))
}
