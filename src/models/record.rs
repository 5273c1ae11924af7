// src/models/record.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomerRecord {
    pub id: i64,
    pub user_id: i64,
    pub operator_id: i64,
    pub customer_id: i64,
    pub sales_id: Option<i64>,
    pub phone: String,
    pub schedule_1: Option<String>,
    pub schedule_2: Option<String>,
    pub schedule_3: Option<String>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Forma de leitura com cliente, usuário e operadora resolvidos por JOIN.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RecordData {
    pub id: i64,
    pub name: String,
    pub dni: String,
    pub phone: String,
    pub schedule_1: String,
    pub schedule_2: String,
    pub schedule_3: String,
    pub status: bool,
    pub user: String,
    pub operator: String,
    pub created_at: DateTime<Utc>,
}
