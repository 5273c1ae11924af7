// src/db/constraints.rs
//
// Regras declarativas de integridade (`exists:tabela,id` e
// `unique:tabela,coluna`) verificadas contra o banco vivo, no mesmo
// espírito das regras de validação do sistema original. As mensagens
// seguem o formato que os clientes da API já conhecem.

use sqlx::SqlitePool;

use crate::common::error::{AppError, FieldErrors};

/// Verifica se a linha `id` existe em `table`.
pub async fn id_exists(pool: &SqlitePool, table: &str, id: i64) -> Result<bool, AppError> {
    // Nomes de tabela vêm sempre de literais internos, nunca do cliente.
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = ?)");
    let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(pool).await?;
    Ok(exists)
}

/// Regra `exists`: acumula um erro de campo se a chave estrangeira não
/// apontar para uma linha existente.
pub async fn check_exists(
    pool: &SqlitePool,
    table: &str,
    field: &str,
    id: i64,
    errors: &mut FieldErrors,
) -> Result<(), AppError> {
    if !id_exists(pool, table, id).await? {
        errors
            .entry(field.to_string())
            .or_default()
            .push(format!("The selected {field} is invalid."));
    }
    Ok(())
}

/// Regra `unique`: acumula um erro de campo se o valor já estiver em uso.
/// Em updates, `exclude_id` tira a própria linha da checagem para não
/// rejeitar um reenvio do mesmo valor.
pub async fn check_unique(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    value: &str,
    exclude_id: Option<i64>,
    errors: &mut FieldErrors,
) -> Result<(), AppError> {
    let taken: bool = match exclude_id {
        Some(id) => {
            let sql =
                format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE {column} = ? AND id <> ?)");
            sqlx::query_scalar(&sql)
                .bind(value)
                .bind(id)
                .fetch_one(pool)
                .await?
        }
        None => {
            let sql = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE {column} = ?)");
            sqlx::query_scalar(&sql).bind(value).fetch_one(pool).await?
        }
    };
    if taken {
        errors
            .entry(column.to_string())
            .or_default()
            .push(format!("The {column} has already been taken."));
    }
    Ok(())
}

/// Encerra a fase de validação: se algum erro foi acumulado, devolve 422.
pub fn bail_if_errors(errors: FieldErrors) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Quantas linhas de `table` ainda referenciam `id` via `column`.
/// Usado para bloquear exclusões com dependentes (409).
pub async fn count_refs(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    id: i64,
) -> Result<i64, AppError> {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?");
    let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(pool).await?;
    Ok(count)
}

/// Mapeia violação de chave única do banco para erro de validação do
/// campo indicado. As pré-checagens cobrem o caso comum; isto é o
/// fecho transacional contra corridas entre requisições.
pub fn unique_violation(e: sqlx::Error, field: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::field(field, format!("The {field} has already been taken."));
        }
    }
    e.into()
}
