// src/models/customer.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub agency_id: i64,
    pub name: String,
    pub dni: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Telefone embutido na resposta do cliente, com o nome da operadora
// resolvido por JOIN na leitura.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CustomerPhone {
    pub phone: String,
    pub operator_id: Option<i64>,
    pub operator: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerData {
    pub id: i64,
    pub agency_id: i64,
    pub dni: String,
    pub name: String,
    pub phone_numbers: Vec<CustomerPhone>,
    pub created_at: DateTime<Utc>,
}

impl CustomerData {
    pub fn new(customer: Customer, phone_numbers: Vec<CustomerPhone>) -> Self {
        Self {
            id: customer.id,
            agency_id: customer.agency_id,
            dni: customer.dni,
            name: customer.name,
            phone_numbers,
            created_at: customer.created_at,
        }
    }
}
