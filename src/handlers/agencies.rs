// src/handlers/agencies.rs

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
        validation::digits_9,
    },
    config::AppState,
    db::constraints::{bail_if_errors, check_unique},
    models::agency::AgencyData,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAgencyPayload {
    #[validate(
        required(message = "The name field is required."),
        length(max = 100, message = "The name may not be greater than 100 characters.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "The address field is required."),
        length(max = 100, message = "The address may not be greater than 100 characters.")
    )]
    pub address: Option<String>,

    #[validate(custom(function = "digits_9"))]
    pub phone: Option<String>,

    #[validate(email(message = "The email must be a valid email address."))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAgencyPayload {
    #[validate(length(max = 100, message = "The name may not be greater than 100 characters."))]
    pub name: Option<String>,

    #[validate(length(max = 100, message = "The address may not be greater than 100 characters."))]
    pub address: Option<String>,

    #[validate(custom(function = "digits_9"))]
    pub phone: Option<String>,

    #[validate(email(message = "The email must be a valid email address."))]
    pub email: Option<String>,
}

// GET /api/agencies
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let agencies = app_state.agencies.list().await?;
    let data: Vec<AgencyData> = agencies.into_iter().map(AgencyData::from).collect();

    Ok(envelope(
        StatusCode::OK,
        data,
        "Agencies retrieved successfully",
    ))
}

// POST /api/agencies
pub async fn store(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAgencyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // unique:agencies,email
    let mut errors = FieldErrors::new();
    if let Some(email) = payload.email.as_deref() {
        check_unique(&app_state.db_pool, "agencies", "email", email, None, &mut errors).await?;
    }
    bail_if_errors(errors)?;

    let agency = app_state
        .agencies
        .create(
            payload.name.as_deref().unwrap_or_default(),
            payload.address.as_deref().unwrap_or_default(),
            payload.phone.as_deref(),
            payload.email.as_deref(),
        )
        .await?;

    Ok(envelope(
        StatusCode::CREATED,
        AgencyData::from(agency),
        "Agency created successfully",
    ))
}

// GET /api/agencies/{id}
pub async fn show(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let agency = app_state
        .agencies
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Agency"))?;

    Ok(envelope(
        StatusCode::OK,
        AgencyData::from(agency),
        "Agency retrieved successfully",
    ))
}

// PUT /api/agencies/{id}
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAgencyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let agency = app_state
        .agencies
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Agency"))?;

    payload.validate()?;

    // A checagem de unicidade exclui a própria linha: reenviar o mesmo
    // e-mail não pode falhar.
    let mut errors = FieldErrors::new();
    if let Some(email) = payload.email.as_deref() {
        check_unique(
            &app_state.db_pool,
            "agencies",
            "email",
            email,
            Some(agency.id),
            &mut errors,
        )
        .await?;
    }
    bail_if_errors(errors)?;

    let updated = app_state
        .agencies
        .update(
            agency.id,
            payload.name.as_deref(),
            payload.address.as_deref(),
            payload.phone.as_deref(),
            payload.email.as_deref(),
        )
        .await?;

    Ok(envelope(
        StatusCode::OK,
        AgencyData::from(updated),
        "Agency updated successfully",
    ))
}

// DELETE /api/agencies/{id}
pub async fn destroy(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let agency = app_state
        .agencies
        .find(id)
        .await?
        .ok_or(AppError::NotFound("Agency"))?;

    app_state.agencies.delete(agency.id).await?;

    Ok(envelope(
        StatusCode::OK,
        serde_json::json!({}),
        "Agency deleted successfully",
    ))
}
