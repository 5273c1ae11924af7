// src/db/sales_user_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::constraints::{count_refs, unique_violation},
    models::sales_user::SalesUser,
};

#[derive(Clone)]
pub struct SalesUserRepository {
    pool: SqlitePool,
}

impl SalesUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<SalesUser>, AppError> {
        let sales_users =
            sqlx::query_as::<_, SalesUser>("SELECT * FROM sales_users ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(sales_users)
    }

    pub async fn find(&self, id: i64) -> Result<Option<SalesUser>, AppError> {
        let maybe = sqlx::query_as::<_, SalesUser>("SELECT * FROM sales_users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn create(&self, agency_id: i64, name: &str) -> Result<SalesUser, AppError> {
        let now = Utc::now();
        let sales_user = sqlx::query_as::<_, SalesUser>(
            r#"
            INSERT INTO sales_users (agency_id, name, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "name"))?;

        Ok(sales_user)
    }

    pub async fn update(
        &self,
        id: i64,
        agency_id: Option<i64>,
        name: Option<&str>,
    ) -> Result<SalesUser, AppError> {
        let sales_user = sqlx::query_as::<_, SalesUser>(
            r#"
            UPDATE sales_users SET
                agency_id = COALESCE(?, agency_id),
                name = COALESCE(?, name),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(name)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "name"))?;

        Ok(sales_user)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sales = count_refs(&self.pool, "sales", "sales_user_id", id).await?;
        if sales > 0 {
            return Err(AppError::Conflict(
                "Sales user is still referenced by sales".to_string(),
            ));
        }

        sqlx::query("DELETE FROM sales_users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
