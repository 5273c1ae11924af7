// src/db/catalog_repo.rs
//
// Catálogos simples: tipos de venda e tipificações.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::constraints::count_refs,
    models::catalog::{SalesType, Typification},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  TIPOS DE VENDA
    // =========================================================================

    // Listagem ordenada por nome, como no sistema original.
    pub async fn list_sales_types(&self) -> Result<Vec<SalesType>, AppError> {
        let types = sqlx::query_as::<_, SalesType>("SELECT * FROM sales_types ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(types)
    }

    pub async fn find_sales_type(&self, id: i64) -> Result<Option<SalesType>, AppError> {
        let maybe = sqlx::query_as::<_, SalesType>("SELECT * FROM sales_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn create_sales_type(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<SalesType, AppError> {
        let now = Utc::now();
        let sales_type = sqlx::query_as::<_, SalesType>(
            r#"
            INSERT INTO sales_types (name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(sales_type)
    }

    pub async fn update_sales_type(
        &self,
        id: i64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<SalesType, AppError> {
        let sales_type = sqlx::query_as::<_, SalesType>(
            r#"
            UPDATE sales_types SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(sales_type)
    }

    pub async fn delete_sales_type(&self, id: i64) -> Result<(), AppError> {
        let sales = count_refs(&self.pool, "sales", "sales_type_id", id).await?;
        if sales > 0 {
            return Err(AppError::Conflict(
                "Sales type is still referenced by sales".to_string(),
            ));
        }

        sqlx::query("DELETE FROM sales_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // =========================================================================
    //  TIPIFICAÇÕES
    // =========================================================================

    pub async fn list_typifications(&self) -> Result<Vec<Typification>, AppError> {
        let typifications =
            sqlx::query_as::<_, Typification>("SELECT * FROM typifications ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(typifications)
    }

    pub async fn find_typification(&self, id: i64) -> Result<Option<Typification>, AppError> {
        let maybe = sqlx::query_as::<_, Typification>("SELECT * FROM typifications WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    pub async fn create_typification(&self, name: &str) -> Result<Typification, AppError> {
        let now = Utc::now();
        let typification = sqlx::query_as::<_, Typification>(
            r#"
            INSERT INTO typifications (name, created_at, updated_at)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(typification)
    }

    pub async fn update_typification(
        &self,
        id: i64,
        name: Option<&str>,
    ) -> Result<Typification, AppError> {
        let typification = sqlx::query_as::<_, Typification>(
            r#"
            UPDATE typifications SET
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
        .await?;
        Ok(typification)
    }

    pub async fn delete_typification(&self, id: i64) -> Result<(), AppError> {
        let sales = count_refs(&self.pool, "sales", "typification_id", id).await?;
        if sales > 0 {
            return Err(AppError::Conflict(
                "Typification is still referenced by sales".to_string(),
            ));
        }

        sqlx::query("DELETE FROM typifications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
