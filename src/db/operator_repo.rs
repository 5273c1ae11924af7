// src/db/operator_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::constraints::{count_refs, unique_violation},
    models::operator::Operator,
};

#[derive(Clone)]
pub struct OperatorRepository {
    pool: SqlitePool,
}

impl OperatorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Operator>, AppError> {
        let operators = sqlx::query_as::<_, Operator>("SELECT * FROM operators ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(operators)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Operator>, AppError> {
        let maybe = sqlx::query_as::<_, Operator>("SELECT * FROM operators WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn create(&self, name: &str) -> Result<Operator, AppError> {
        let now = Utc::now();
        let operator = sqlx::query_as::<_, Operator>(
            r#"
            INSERT INTO operators (name, created_at, updated_at)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "name"))?;

        Ok(operator)
    }

    pub async fn update(&self, id: i64, name: Option<&str>) -> Result<Operator, AppError> {
        let operator = sqlx::query_as::<_, Operator>(
            r#"
            UPDATE operators SET
                name = COALESCE(?, name),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "name"))?;

        Ok(operator)
    }

    // Operadora referenciada por telefones, vendas ou fichas não pode
    // ser apagada.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let phones = count_refs(&self.pool, "phones_numbers", "operator_id", id).await?;
        let sales = count_refs(&self.pool, "sales", "operator_id", id).await?;
        let records = count_refs(&self.pool, "customer_records", "operator_id", id).await?;
        if phones > 0 || sales > 0 || records > 0 {
            return Err(AppError::Conflict(
                "Operator is still referenced by other records".to_string(),
            ));
        }

        sqlx::query("DELETE FROM operators WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
