// src/db/customer_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::constraints::{count_refs, unique_violation},
    models::customer::{Customer, CustomerPhone},
};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers ORDER BY id ASC LIMIT ? OFFSET ?",
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    // Telefones do cliente com o nome da operadora resolvido na leitura.
    pub async fn phones_for(&self, customer_id: i64) -> Result<Vec<CustomerPhone>, AppError> {
        let phones = sqlx::query_as::<_, CustomerPhone>(
            r#"
            SELECT p.phone, p.operator_id, COALESCE(o.name, '') AS operator
            FROM phones_numbers p
            LEFT JOIN operators o ON o.id = p.operator_id
            WHERE p.customer_id = ?
            ORDER BY p.id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(phones)
    }

    // O DNI é a chave de consulta externa dos clientes.
    pub async fn find_by_dni(&self, dni: &str) -> Result<Option<Customer>, AppError> {
        let maybe = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE dni = ? ORDER BY id ASC LIMIT 1",
        )
        .bind(dni)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Cria o cliente e, quando informado, seu primeiro telefone na mesma
    // transação: nunca fica visível um cliente "meio criado".
    pub async fn create(
        &self,
        agency_id: i64,
        name: &str,
        dni: &str,
        phone: Option<&str>,
        operator_id: Option<i64>,
    ) -> Result<Customer, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (agency_id, name, dni, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(name)
        .bind(dni)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(phone) = phone {
            sqlx::query(
                r#"
                INSERT INTO phones_numbers (customer_id, operator_id, phone, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(customer.id)
            .bind(operator_id)
            .bind(phone)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| unique_violation(e, "phone"))?;
        }

        tx.commit().await?;
        Ok(customer)
    }

    pub async fn update(
        &self,
        id: i64,
        agency_id: Option<i64>,
        name: Option<&str>,
        dni: Option<&str>,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                agency_id = COALESCE(?, agency_id),
                name = COALESCE(?, name),
                dni = COALESCE(?, dni),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(agency_id)
        .bind(name)
        .bind(dni)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(customer)
    }

    // Apagar um cliente arrasta os telefones e as fichas de acompanhamento
    // na mesma transação. Vendas continuam restringindo a exclusão.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sales = count_refs(&self.pool, "sales", "customer_id", id).await?;
        if sales > 0 {
            return Err(AppError::Conflict(
                "Customer is still referenced by sales".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM customer_records WHERE customer_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM phones_numbers WHERE customer_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
