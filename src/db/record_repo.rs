// src/db/record_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::constraints::unique_violation,
    models::record::{CustomerRecord, RecordData},
};

const RECORD_DATA_SELECT: &str = r#"
SELECT
    r.id,
    COALESCE(c.name, '') AS name,
    COALESCE(c.dni, '')  AS dni,
    r.phone,
    COALESCE(r.schedule_1, '') AS schedule_1,
    COALESCE(r.schedule_2, '') AS schedule_2,
    COALESCE(r.schedule_3, '') AS schedule_3,
    r.status,
    COALESCE(u.name, '') AS user,
    COALESCE(o.name, '') AS operator,
    r.created_at
FROM customer_records r
LEFT JOIN customers c ON c.id = r.customer_id
LEFT JOIN users u     ON u.id = r.user_id
LEFT JOIN operators o ON o.id = r.operator_id
"#;

#[derive(Clone)]
pub struct RecordRepository {
    pool: SqlitePool,
}

impl RecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer_records")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<Vec<RecordData>, AppError> {
        let sql = format!("{RECORD_DATA_SELECT} ORDER BY r.id ASC LIMIT ? OFFSET ?");
        let records = sqlx::query_as::<_, RecordData>(&sql)
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    // A consulta de uma ficha é feita pelo usuário dono, não pelo id.
    // Inconsistência herdada do sistema original, preservada de propósito.
    pub async fn find_data_by_user(&self, user_id: i64) -> Result<Option<RecordData>, AppError> {
        let sql = format!("{RECORD_DATA_SELECT} WHERE r.user_id = ? ORDER BY r.id ASC LIMIT 1");
        let maybe = sqlx::query_as::<_, RecordData>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // Já o update é chaveado pelo cliente. Também herdado.
    pub async fn find_by_customer(
        &self,
        customer_id: i64,
    ) -> Result<Option<CustomerRecord>, AppError> {
        let maybe = sqlx::query_as::<_, CustomerRecord>(
            "SELECT * FROM customer_records WHERE customer_id = ? ORDER BY id ASC LIMIT 1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn find(&self, id: i64) -> Result<Option<CustomerRecord>, AppError> {
        let maybe = sqlx::query_as::<_, CustomerRecord>("SELECT * FROM customer_records WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: i64,
        operator_id: i64,
        customer_id: i64,
        phone: &str,
        schedule_1: Option<&str>,
        schedule_2: Option<&str>,
        schedule_3: Option<&str>,
    ) -> Result<CustomerRecord, AppError> {
        let now = Utc::now();
        let record = sqlx::query_as::<_, CustomerRecord>(
            r#"
            INSERT INTO customer_records (
                user_id, operator_id, customer_id, phone,
                schedule_1, schedule_2, schedule_3, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(operator_id)
        .bind(customer_id)
        .bind(phone)
        .bind(schedule_1)
        .bind(schedule_2)
        .bind(schedule_3)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "phone"))?;

        Ok(record)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        operator_id: Option<i64>,
        customer_id: Option<i64>,
        phone: Option<&str>,
        schedule_1: Option<&str>,
        schedule_2: Option<&str>,
        schedule_3: Option<&str>,
        status: Option<bool>,
    ) -> Result<CustomerRecord, AppError> {
        let record = sqlx::query_as::<_, CustomerRecord>(
            r#"
            UPDATE customer_records SET
                operator_id = COALESCE(?, operator_id),
                customer_id = COALESCE(?, customer_id),
                phone = COALESCE(?, phone),
                schedule_1 = COALESCE(?, schedule_1),
                schedule_2 = COALESCE(?, schedule_2),
                schedule_3 = COALESCE(?, schedule_3),
                status = COALESCE(?, status),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(operator_id)
        .bind(customer_id)
        .bind(phone)
        .bind(schedule_1)
        .bind(schedule_2)
        .bind(schedule_3)
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "phone"))?;

        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM customer_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
