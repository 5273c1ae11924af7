// src/models/phone.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PhoneNumber {
    pub id: i64,
    pub customer_id: i64,
    pub operator_id: Option<i64>,
    pub phone: String,
    pub equip: Option<String>,
    pub imei: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PhoneData {
    pub id: i64,
    pub customer_id: i64,
    pub operator_id: Option<i64>,
    pub phone: String,
    pub equip: String,
    pub imei: String,
    pub created_at: DateTime<Utc>,
}

impl From<PhoneNumber> for PhoneData {
    fn from(row: PhoneNumber) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            operator_id: row.operator_id,
            phone: row.phone,
            equip: row.equip.unwrap_or_default(),
            imei: row.imei.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}
