// src/db/phone_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError, db::constraints::unique_violation, models::phone::PhoneNumber,
};

#[derive(Clone)]
pub struct PhoneRepository {
    pool: SqlitePool,
}

impl PhoneRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PhoneNumber>, AppError> {
        let phones =
            sqlx::query_as::<_, PhoneNumber>("SELECT * FROM phones_numbers ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(phones)
    }

    pub async fn find(&self, id: i64) -> Result<Option<PhoneNumber>, AppError> {
        let maybe = sqlx::query_as::<_, PhoneNumber>("SELECT * FROM phones_numbers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn create(
        &self,
        customer_id: i64,
        operator_id: Option<i64>,
        phone: &str,
        equip: Option<&str>,
        imei: Option<&str>,
    ) -> Result<PhoneNumber, AppError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, PhoneNumber>(
            r#"
            INSERT INTO phones_numbers (customer_id, operator_id, phone, equip, imei, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(operator_id)
        .bind(phone)
        .bind(equip)
        .bind(imei)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "phone"))?;

        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        customer_id: Option<i64>,
        operator_id: Option<i64>,
        phone: Option<&str>,
        equip: Option<&str>,
        imei: Option<&str>,
    ) -> Result<PhoneNumber, AppError> {
        let row = sqlx::query_as::<_, PhoneNumber>(
            r#"
            UPDATE phones_numbers SET
                customer_id = COALESCE(?, customer_id),
                operator_id = COALESCE(?, operator_id),
                phone = COALESCE(?, phone),
                equip = COALESCE(?, equip),
                imei = COALESCE(?, imei),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(operator_id)
        .bind(phone)
        .bind(equip)
        .bind(imei)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "phone"))?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM phones_numbers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
