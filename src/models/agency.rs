// src/models/agency.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Agency {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Forma de resposta: campos nulos viram string vazia, como no
// sistema original.
#[derive(Debug, Serialize)]
pub struct AgencyData {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Agency> for AgencyData {
    fn from(agency: Agency) -> Self {
        Self {
            id: agency.id,
            name: agency.name,
            address: agency.address.unwrap_or_default(),
            phone: agency.phone.unwrap_or_default(),
            email: agency.email.unwrap_or_default(),
            created_at: agency.created_at,
        }
    }
}
