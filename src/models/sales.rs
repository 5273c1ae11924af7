// src/models/sales.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Sale {
    pub id: i64,
    pub user_id: i64,
    pub sales_user_id: i64,
    pub customer_id: i64,
    pub typification_id: i64,
    pub operator_id: i64,
    pub sales_type_id: i64,
    pub origin: String,
    pub phone: String,
    pub equip: Option<String>,
    pub imei: Option<String>,
    pub sales_order: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Forma de leitura com os relacionamentos resolvidos por JOIN:
// consultor (users), conta de venda e agência (sales_users -> agencies),
// cliente (customers) e tipificação.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SaleData {
    pub id: i64,
    pub agency: String,
    pub consultant: String,
    pub sales_user: String,
    pub customer: String,
    pub dni: String,
    pub origin: String,
    pub typification: String,
    pub sales_order: String,
    pub phone: String,
    pub equip: String,
    pub imei: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}
