// src/handlers/customers.rs

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
    models::customer::CustomerData,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerPayload {
    #[validate(required(message = "The agency_id field is required."))]
    pub agency_id: Option<i64>,

    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name may not be greater than 255 characters.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "The dni field is required."),
        length(max = 8, message = "The dni may not be greater than 8 characters.")
    )]
    pub dni: Option<String>,

    // Telefone inicial opcional, criado junto com o cliente.
    #[validate(custom(function = "digits_9"))]
    pub phone: Option<String>,

    pub operator_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerPayload {
    pub agency_id: Option<i64>,

    #[validate(length(max = 255, message = "The name may not be greater than 255 characters."))]
    pub name: Option<String>,

    #[validate(length(max = 8, message = "The dni may not be greater than 8 characters."))]
    pub dni: Option<String>,

    // Aceito e validado por compatibilidade, mas o cliente não guarda
    // operadora; o campo fica fora da lista de escrita.
    pub operator_id: Option<i64>,
}

// GET /api/customers
pub async fn index(
    State(app_state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = query.resolve();
    let total = app_state.customers.count().await?;
    let customers = app_state.customers.list(page, per_page).await?;

    // Os telefones (com nome da operadora) são resolvidos na leitura.
    let mut data = Vec::with_capacity(customers.len());
    for customer in customers {
        let phones = app_state.customers.phones_for(customer.id).await?;
        data.push(CustomerData::new(customer, phones));
    }

    Ok(envelope(
        StatusCode::OK,
        Page::new(data, page, per_page, total),
        "Customers retrieved successfully",
    ))
}

// POST /api/customers
pub async fn store(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(agency_id) = payload.agency_id {
        check_exists(&app_state.db_pool, "agencies", "agency_id", agency_id, &mut errors).await?;
    }
    if let Some(phone) = payload.phone.as_deref() {
        check_unique(&app_state.db_pool, "phones_numbers", "phone", phone, None, &mut errors)
            .await?;
    }
    if let Some(operator_id) = payload.operator_id {
        check_exists(&app_state.db_pool, "operators", "operator_id", operator_id, &mut errors)
            .await?;
    }
    bail_if_errors(errors)?;

    let customer = app_state
        .customers
        .create(
            payload.agency_id.unwrap_or_default(),
            payload.name.as_deref().unwrap_or_default(),
            payload.dni.as_deref().unwrap_or_default(),
            payload.phone.as_deref(),
            payload.operator_id,
        )
        .await?;

    let phones = app_state.customers.phones_for(customer.id).await?;
    Ok(envelope(
        StatusCode::CREATED,
        CustomerData::new(customer, phones),
        "Customer created successfully",
    ))
}

// GET /api/customers/{dni} — consulta pela chave de negócio, não pelo id.
pub async fn show(
    State(app_state): State<AppState>,
    Path(dni): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .customers
        .find_by_dni(&dni)
        .await?
        .ok_or(AppError::NotFound("Customer"))?;

    let phones = app_state.customers.phones_for(customer.id).await?;
    Ok(envelope(
        StatusCode::OK,
        CustomerData::new(customer, phones),
        "Customer retrieved successfully",
    ))
}

// PUT /api/customers/{dni}
pub async fn update(
    State(app_state): State<AppState>,
    Path(dni): Path<String>,
    Json(payload): Json<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .customers
        .find_by_dni(&dni)
        .await?
        .ok_or(AppError::NotFound("Customer"))?;

    payload.validate()?;

    let mut errors = FieldErrors::new();
    if let Some(agency_id) = payload.agency_id {
        check_exists(&app_state.db_pool, "agencies", "agency_id", agency_id, &mut errors).await?;
    }
    if let Some(operator_id) = payload.operator_id {
        check_exists(&app_state.db_pool, "operators", "operator_id", operator_id, &mut errors)
            .await?;
    }
    bail_if_errors(errors)?;

    let updated = app_state
        .customers
        .update(
            customer.id,
            payload.agency_id,
            payload.name.as_deref(),
            payload.dni.as_deref(),
        )
        .await?;

    let phones = app_state.customers.phones_for(updated.id).await?;
    Ok(envelope(
        StatusCode::OK,
        CustomerData::new(updated, phones),
        "Customer updated successfully",
    ))
}

// DELETE /api/customers/{dni} — arrasta telefones e fichas do cliente.
pub async fn destroy(
    State(app_state): State<AppState>,
    Path(dni): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .customers
        .find_by_dni(&dni)
        .await?
        .ok_or(AppError::NotFound("Customer"))?;

    app_state.customers.delete(customer.id).await?;

    Ok(envelope(
        StatusCode::OK,
        serde_json::json!({}),
        "Customer deleted successfully",
    ))
}
