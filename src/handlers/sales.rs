// src/handlers/sales.rs

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
        validation::{digits_15, digits_9},
    },
    config::AppState,
    db::constraints::{bail_if_errors, check_exists, check_unique},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSalePayload {
    #[validate(required(message = "The user_id field is required."))]
    pub user_id: Option<i64>,

    #[validate(required(message = "The sales_user_id field is required."))]
    pub sales_user_id: Option<i64>,

    #[validate(required(message = "The customer_id field is required."))]
    pub customer_id: Option<i64>,

    #[validate(required(message = "The operator_id field is required."))]
    pub operator_id: Option<i64>,

    #[validate(required(message = "The sales_type_id field is required."))]
    pub sales_type_id: Option<i64>,

    #[validate(required(message = "The typification_id field is required."))]
    pub typification_id: Option<i64>,

    #[validate(
        required(message = "The origin field is required."),
        length(max = 255, message = "The origin may not be greater than 255 characters.")
    )]
    pub origin: Option<String>,

    #[validate(
        required(message = "The sales_order field is required."),
        length(max = 9, message = "The sales_order may not be greater than 9 characters.")
    )]
    pub sales_order: Option<String>,

    #[validate(
        required(message = "The phone field is required."),
        custom(function = "digits_9")
    )]
    pub phone: Option<String>,

    #[validate(length(max = 255, message = "The equip may not be greater than 255 characters."))]
    pub equip: Option<String>,

    #[validate(custom(function = "digits_15"))]
    pub imei: Option<String>,

    #[validate(length(max = 255, message = "The notes may not be greater than 255 characters."))]
    pub notes: Option<String>,
}

// Atualização não aceita sales_type_id; o tipo de venda é fixado na
// criação.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSalePayload {
    pub user_id: Option<i64>,
    pub sales_user_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub operator_id: Option<i64>,
    pub typification_id: Option<i64>,

    #[validate(length(max = 255, message = "The origin may not be greater than 255 characters."))]
    pub origin: Option<String>,

    #[validate(length(max = 9, message = "The sales_order may not be greater than 9 characters."))]
    pub sales_order: Option<String>,

    #[validate(custom(function = "digits_9"))]
    pub phone: Option<String>,

    #[validate(length(max = 255, message = "The equip may not be greater than 255 characters."))]
    pub equip: Option<String>,

    #[validate(custom(function = "digits_15"))]
    pub imei: Option<String>,

    #[validate(length(max = 255, message = "The notes may not be greater than 255 characters."))]
    pub notes: Option<String>,
}

async fn check_sale_fks(
    app_state: &AppState,
    user_id: Option<i64>,
    sales_user_id: Option<i64>,
    customer_id: Option<i64>,
    operator_id: Option<i64>,
    typification_id: Option<i64>,
    errors: &mut FieldErrors,
) -> Result<(), AppError> {
    if let Some(id) = user_id {
        check_exists(&app_state.db_pool, "users", "user_id", id, errors).await?;
    }
    if let Some(id) = sales_user_id {
        check_exists(&app_state.db_pool, "sales_users", "sales_user_id", id, errors).await?;
    }
    if let Some(id) = customer_id {
        check_exists(&app_state.db_pool, "customers", "customer_id", id, errors).await?;
    }
    if let Some(id) = operator_id {
        check_exists(&app_state.db_pool, "operators", "operator_id", id, errors).await?;
    }
    if let Some(id) = typification_id {
        check_exists(&app_state.db_pool, "typifications", "typification_id", id, errors).await?;
    }
    Ok(())
}

// GET /api/sales
pub async fn index(
    State(app_state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, per_page) = query.resolve();
    let total = app_state.sales.count().await?;
    let sales = app_state.sales.list(page, per_page).await?;

    Ok(envelope(
        StatusCode::OK,
        Page::new(sales, page, per_page, total),
        "Sales retrieved successfully",
    ))
}

// POST /api/sales
pub async fn store(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut errors = FieldErrors::new();
    check_sale_fks(
        &app_state,
        payload.user_id,
        payload.sales_user_id,
        payload.customer_id,
        payload.operator_id,
        payload.typification_id,
        &mut errors,
    )
    .await?;
    if let Some(id) = payload.sales_type_id {
        check_exists(&app_state.db_pool, "sales_types", "sales_type_id", id, &mut errors).await?;
    }
    if let Some(sales_order) = payload.sales_order.as_deref() {
        check_unique(&app_state.db_pool, "sales", "sales_order", sales_order, None, &mut errors)
            .await?;
    }
    if let Some(imei) = payload.imei.as_deref() {
        check_unique(&app_state.db_pool, "sales", "imei", imei, None, &mut errors).await?;
    }
    bail_if_errors(errors)?;

    let sale = app_state
        .sales
        .create(
            payload.user_id.unwrap_or_default(),
            payload.sales_user_id.unwrap_or_default(),
            payload.customer_id.unwrap_or_default(),
            payload.operator_id.unwrap_or_default(),
            payload.sales_type_id.unwrap_or_default(),
            payload.typification_id.unwrap_or_default(),
            payload.origin.as_deref().unwrap_or_default(),
            payload.sales_order.as_deref().unwrap_or_default(),
            payload.phone.as_deref().unwrap_or_default(),
            payload.equip.as_deref(),
            payload.imei.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    // Devolve a venda já com os relacionamentos resolvidos.
    let data = app_state
        .sales
        .find_data_by_order(&sale.sales_order)
        .await?
        .ok_or(AppError::NotFound("Sale"))?;

    Ok(envelope(
        StatusCode::CREATED,
        data,
        "Sale created successfully",
    ))
}

// GET /api/sales/{sales_order} — consulta pelo número do pedido.
pub async fn show(
    State(app_state): State<AppState>,
    Path(sales_order): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .sales
        .find_data_by_order(&sales_order)
        .await?
        .ok_or(AppError::NotFound("Sale"))?;

    Ok(envelope(
        StatusCode::OK,
        sale,
        "Sale retrieved successfully",
    ))
}

// PUT /api/sales/{sales_order}
pub async fn update(
    State(app_state): State<AppState>,
    Path(sales_order): Path<String>,
    Json(payload): Json<UpdateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .sales
        .find_by_order(&sales_order)
        .await?
        .ok_or(AppError::NotFound("Sale"))?;

    payload.validate()?;

    let mut errors = FieldErrors::new();
    check_sale_fks(
        &app_state,
        payload.user_id,
        payload.sales_user_id,
        payload.customer_id,
        payload.operator_id,
        payload.typification_id,
        &mut errors,
    )
    .await?;
    if let Some(order) = payload.sales_order.as_deref() {
        check_unique(
            &app_state.db_pool,
            "sales",
            "sales_order",
            order,
            Some(sale.id),
            &mut errors,
        )
        .await?;
    }
    if let Some(imei) = payload.imei.as_deref() {
        check_unique(&app_state.db_pool, "sales", "imei", imei, Some(sale.id), &mut errors)
            .await?;
    }
    bail_if_errors(errors)?;

    let updated = app_state
        .sales
        .update(
            sale.id,
            payload.user_id,
            payload.sales_user_id,
            payload.customer_id,
            payload.operator_id,
            payload.typification_id,
            payload.origin.as_deref(),
            payload.sales_order.as_deref(),
            payload.phone.as_deref(),
            payload.equip.as_deref(),
            payload.imei.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    let data = app_state
        .sales
        .find_data_by_order(&updated.sales_order)
        .await?
        .ok_or(AppError::NotFound("Sale"))?;

    Ok(envelope(
        StatusCode::OK,
        data,
        "Sale updated successfully",
    ))
}

// DELETE /api/sales/{sales_order}
pub async fn destroy(
    State(app_state): State<AppState>,
    Path(sales_order): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .sales
        .find_by_order(&sales_order)
        .await?
        .ok_or(AppError::NotFound("Sale"))?;

    app_state.sales.delete(sale.id).await?;

    Ok(envelope(
        StatusCode::OK,
        serde_json::json!({}),
        "Sale deleted successfully",
    ))
}
