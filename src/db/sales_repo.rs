// src/db/sales_repo.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::constraints::{count_refs, unique_violation},
    models::sales::{Sale, SaleData},
};

// SELECT com os relacionamentos já resolvidos; usado na listagem e na
// consulta por pedido.
const SALE_DATA_SELECT: &str = r#"
SELECT
    s.id,
    COALESCE(a.name, '')  AS agency,
    COALESCE(u.name, '')  AS consultant,
    COALESCE(su.name, '') AS sales_user,
    COALESCE(c.name, '')  AS customer,
    COALESCE(c.dni, '')   AS dni,
    s.origin,
    COALESCE(t.name, '')  AS typification,
    s.sales_order,
    s.phone,
    COALESCE(s.equip, '') AS equip,
    COALESCE(s.imei, '')  AS imei,
    COALESCE(s.notes, '') AS notes,
    s.created_at
FROM sales s
LEFT JOIN users u          ON u.id = s.user_id
LEFT JOIN sales_users su   ON su.id = s.sales_user_id
LEFT JOIN agencies a       ON a.id = su.agency_id
LEFT JOIN customers c      ON c.id = s.customer_id
LEFT JOIN typifications t  ON t.id = s.typification_id
"#;

#[derive(Clone)]
pub struct SalesRepository {
    pool: SqlitePool,
}

impl SalesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<Vec<SaleData>, AppError> {
        let sql = format!("{SALE_DATA_SELECT} ORDER BY s.id ASC LIMIT ? OFFSET ?");
        let sales = sqlx::query_as::<_, SaleData>(&sql)
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await?;
        Ok(sales)
    }

    // O número do pedido é a chave de consulta externa das vendas.
    pub async fn find_data_by_order(&self, sales_order: &str) -> Result<Option<SaleData>, AppError> {
        let sql = format!("{SALE_DATA_SELECT} WHERE s.sales_order = ?");
        let maybe = sqlx::query_as::<_, SaleData>(&sql)
            .bind(sales_order)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    // Linha crua, para updates e exclusões que precisam do id.
    pub async fn find_by_order(&self, sales_order: &str) -> Result<Option<Sale>, AppError> {
        let maybe = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE sales_order = ?")
            .bind(sales_order)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: i64,
        sales_user_id: i64,
        customer_id: i64,
        operator_id: i64,
        sales_type_id: i64,
        typification_id: i64,
        origin: &str,
        sales_order: &str,
        phone: &str,
        equip: Option<&str>,
        imei: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Sale, AppError> {
        let now = Utc::now();
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (
                user_id, sales_user_id, customer_id, typification_id,
                operator_id, sales_type_id, origin, phone, equip, imei,
                sales_order, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(sales_user_id)
        .bind(customer_id)
        .bind(typification_id)
        .bind(operator_id)
        .bind(sales_type_id)
        .bind(origin)
        .bind(phone)
        .bind(equip)
        .bind(imei)
        .bind(sales_order)
        .bind(notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "sales_order"))?;

        Ok(sale)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        user_id: Option<i64>,
        sales_user_id: Option<i64>,
        customer_id: Option<i64>,
        operator_id: Option<i64>,
        typification_id: Option<i64>,
        origin: Option<&str>,
        sales_order: Option<&str>,
        phone: Option<&str>,
        equip: Option<&str>,
        imei: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales SET
                user_id = COALESCE(?, user_id),
                sales_user_id = COALESCE(?, sales_user_id),
                customer_id = COALESCE(?, customer_id),
                operator_id = COALESCE(?, operator_id),
                typification_id = COALESCE(?, typification_id),
                origin = COALESCE(?, origin),
                sales_order = COALESCE(?, sales_order),
                phone = COALESCE(?, phone),
                equip = COALESCE(?, equip),
                imei = COALESCE(?, imei),
                notes = COALESCE(?, notes),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(sales_user_id)
        .bind(customer_id)
        .bind(operator_id)
        .bind(typification_id)
        .bind(origin)
        .bind(sales_order)
        .bind(phone)
        .bind(equip)
        .bind(imei)
        .bind(notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "sales_order"))?;

        Ok(sale)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let records = count_refs(&self.pool, "customer_records", "sales_id", id).await?;
        if records > 0 {
            return Err(AppError::Conflict(
                "Sale is still referenced by customer records".to_string(),
            ));
        }

        sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
