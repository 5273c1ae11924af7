// src/handlers/phones.rs

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
        validation::{digits_15, digits_9},
    },
    config::AppState,
    db::constraints::{bail_if_errors, check_exists, check_unique},
    models::phone::PhoneData,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePhonePayload {
    #[validate(
        required(message = "The phone field is required."),
        custom(function = "digits_9")
    )]
    pub phone: Option<String>,

    #[validate(required(message = "The customer_id field is required."))]
    pub customer_id: Option<i64>,

    #[validate(required(message = "The operator_id field is required."))]
    pub operator_id: Option<i64>,

    #[validate(length(max = 255, message = "The equip may not be greater than 255 characters."))]
    pub equip: Option<String>,

    #[validate(custom(function = "digits_15"))]
    pub imei: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePhonePayload {
    #[validate(custom(function = "digits_9"))]
    pub phone: Option<String>,

    pub customer_id: Option<i64>,
    pub operator_id: Option<i64>,

    #[validate(length(max = 255, message = "The equip may not be greater than 255 characters."))]
    pub equip: Option<String>,

    #[validate(custom(function = "digits_15"))]
    pub imei: Option<String>,
}

// GET /api/phones
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let phones = app_state.phones.list().await?;
    let data: Vec<PhoneData> = phones.into_iter().map(PhoneData::from).collect();

    Ok(envelope(
        StatusCode::OK,
        data,
        "Phones retrieved successfully",
    ))
}

// POST /api/phones
pub async fn store(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePhonePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(phone) = payload.phone.as_deref() {
        check_unique(&app_state.db_pool, "phones_numbers", "phone", phone, None, &mut errors)
            .await?;
    }
    if let Some(customer_id) = payload.customer_id {
        check_exists(&app_state.db_pool, "customers", "customer_id", customer_id, &mut errors)
            .await?;
    }
    if let Some(operator_id) = payload.operator_id {
        check_exists(&app_state.db_pool, "operators", "operator_id", operator_id, &mut errors)
            .await?;
    }
    if let Some(imei) = payload.imei.as_deref() {
        check_unique(&app_state.db_pool, "phones_numbers", "imei", imei, None, &mut errors)
            .await?;
    }
    bail_if_errors(errors)?;

    let phone = app_state
        .phones
        .create(
            payload.customer_id.unwrap_or_default(),
            payload.operator_id,
            payload.phone.as_deref().unwrap_or_default(),
            payload.equip.as_deref(),
            payload.imei.as_deref(),
        )
        .await?;

    Ok(envelope(
        StatusCode::CREATED,
        PhoneData::from(phone),
        "Phone created successfully",
    ))
}

// GET /api/phones/{id}
pub async fn show(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let phone = app_state
        .phones
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Phone"))?;

    Ok(envelope(
        StatusCode::OK,
        PhoneData::from(phone),
        "Phone retrieved successfully",
    ))
}

// PUT /api/phones/{id}
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePhonePayload>,
) -> Result<impl IntoResponse, AppError> {
    let phone = app_state
        .phones
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Phone"))?;

    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(value) = payload.phone.as_deref() {
        check_unique(
            &app_state.db_pool,
            "phones_numbers",
            "phone",
            value,
            Some(phone.id),
            &mut errors,
        )
        .await?;
    }
    if let Some(customer_id) = payload.customer_id {
        check_exists(&app_state.db_pool, "customers", "customer_id", customer_id, &mut errors)
            .await?;
    }
    if let Some(operator_id) = payload.operator_id {
        check_exists(&app_state.db_pool, "operators", "operator_id", operator_id, &mut errors)
            .await?;
    }
    if let Some(imei) = payload.imei.as_deref() {
        check_unique(
            &app_state.db_pool,
            "phones_numbers",
            "imei",
            imei,
            Some(phone.id),
            &mut errors,
        )
        .await?;
    }
    bail_if_errors(errors)?;

    let updated = app_state
        .phones
        .update(
            phone.id,
            payload.customer_id,
            payload.operator_id,
            payload.phone.as_deref(),
            payload.equip.as_deref(),
            payload.imei.as_deref(),
        )
        .await?;

    Ok(envelope(
        StatusCode::OK,
        PhoneData::from(updated),
        "Phone updated successfully",
    ))
}

// DELETE /api/phones/{id}
pub async fn destroy(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let phone = app_state
        .phones
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Phone"))?;

    app_state.phones.delete(phone.id).await?;

    Ok(envelope(
        StatusCode::OK,
        serde_json::json!({}),
        "Phone deleted successfully",
    ))
}
