// src/db/token_repo.rs
//
// A loja de tokens é um repositório explícito injetado nos handlers,
// nunca um singleton. Cada requisição autenticada resolve o token
// contra o banco; não há verificação "stateless".

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User};

#[derive(Clone)]
pub struct TokenRepository {
    pool: SqlitePool,
}

impl TokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Emite um token opaco novo para o usuário. Tokens anteriores
    // continuam válidos até o logout.
    pub async fn issue<'e, E>(&self, executor: E, user_id: i64) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let token = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO tokens (id, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&token)
            .bind(user_id)
            .bind(Utc::now())
            .execute(executor)
            .await?;
        Ok(token)
    }

    // Resolve um token para o usuário dono. `None` para token
    // desconhecido ou já revogado.
    pub async fn resolve(&self, token: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.*
            FROM users u
            INNER JOIN tokens t ON t.user_id = u.id
            WHERE t.id = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Logout é global: apaga todos os tokens do usuário.
    pub async fn revoke_all(&self, user_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
