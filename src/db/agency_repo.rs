// src/db/agency_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::constraints::{count_refs, unique_violation},
    models::agency::Agency,
};

#[derive(Clone)]
pub struct AgencyRepository {
    pool: SqlitePool,
}

impl AgencyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Agency>, AppError> {
        let agencies = sqlx::query_as::<_, Agency>("SELECT * FROM agencies ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(agencies)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Agency>, AppError> {
        let maybe = sqlx::query_as::<_, Agency>("SELECT * FROM agencies WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn create(
        &self,
        name: &str,
        address: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Agency, AppError> {
        let now = Utc::now();
        let agency = sqlx::query_as::<_, Agency>(
            r#"
            INSERT INTO agencies (name, address, phone, email, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(email)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "email"))?;

        Ok(agency)
    }

    // Atualização parcial: campos ausentes ficam como estão.
    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<Agency, AppError> {
        let agency = sqlx::query_as::<_, Agency>(
            r#"
            UPDATE agencies SET
                name = COALESCE(?, name),
                address = COALESCE(?, address),
                phone = COALESCE(?, phone),
                email = COALESCE(?, email),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(email)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "email"))?;

        Ok(agency)
    }

    // Exclusão restrita: agência com consultores ou clientes não pode
    // ser apagada.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sales_users = count_refs(&self.pool, "sales_users", "agency_id", id).await?;
        let customers = count_refs(&self.pool, "customers", "agency_id", id).await?;
        if sales_users > 0 || customers > 0 {
            return Err(AppError::Conflict(
                "Agency is still referenced by other records".to_string(),
            ));
        }

        sqlx::query("DELETE FROM agencies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
