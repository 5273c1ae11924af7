// src/services/auth.rs

use bcrypt::{hash, verify};
use sqlx::SqlitePool;

use crate::{
    common::error::{AppError, FieldErrors},
    db::{TokenRepository, UserRepository},
    models::auth::User,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    token_repo: TokenRepository,
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, token_repo: TokenRepository, pool: SqlitePool) -> Self {
        Self {
            user_repo,
            token_repo,
            pool,
        }
    }

    /// Registra um usuário novo e já emite o primeiro token de acesso.
    /// Usuário e token nascem na mesma transação.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        // A unicidade do e-mail é um erro de validação no registro (400).
        if self.user_repo.email_taken(email).await? {
            let mut errors = FieldErrors::new();
            errors.insert(
                "email".to_string(),
                vec!["The email has already been taken.".to_string()],
            );
            return Err(AppError::RegisterValidation(errors));
        }

        // O hashing é pesado; sai do executor async.
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {e}"))??;

        let mut tx = self.pool.begin().await?;
        let user = self
            .user_repo
            .create(&mut *tx, name, email, &hashed_password)
            .await?;
        let token = self.token_repo.issue(&mut *tx, user.id).await?;
        tx.commit().await?;

        tracing::info!(user_id = user.id, "novo usuário registrado");
        Ok((user, token))
    }

    /// Login por e-mail e senha. E-mail desconhecido e senha errada
    /// retornam o mesmo erro: nada de vazar qual campo falhou.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash = user.password.clone();
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {e}"))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Um token novo por login; os anteriores seguem valendo.
        let token = self.token_repo.issue(&self.pool, user.id).await?;
        Ok((user, token))
    }

    /// Logout global: revoga todos os tokens do usuário.
    pub async fn logout(&self, user_id: i64) -> Result<(), AppError> {
        let revoked = self.token_repo.revoke_all(user_id).await?;
        tracing::info!(user_id, revoked, "logout efetuado");
        Ok(())
    }

    /// Resolve o token opaco para o usuário dono, consultando a loja de
    /// tokens a cada requisição.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        self.token_repo
            .resolve(token)
            .await?
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn service() -> AuthService {
        let pool = test_pool().await;
        AuthService::new(
            UserRepository::new(pool.clone()),
            TokenRepository::new(pool.clone()),
            pool,
        )
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let auth = service().await;
        let (user, token) = auth
            .register("John Doe", "john@example.com", "secret1")
            .await
            .expect("registro deveria passar");
        assert!(!token.is_empty());

        let (logged, fresh) = auth
            .login("john@example.com", "secret1")
            .await
            .expect("login deveria passar");
        assert_eq!(logged.id, user.id);
        assert_ne!(fresh, token, "cada login emite token novo");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_a_row() {
        let auth = service().await;
        auth.register("John", "john@example.com", "secret1")
            .await
            .unwrap();

        let err = auth
            .register("Impostor", "john@example.com", "secret2")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RegisterValidation(_)));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let auth = service().await;
        auth.register("John", "john@example.com", "secret1")
            .await
            .unwrap();

        let err = auth.login("john@example.com", "wrong!!").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));

        // E-mail inexistente cai no mesmo erro.
        let err = auth.login("ghost@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn logout_revokes_every_token() {
        let auth = service().await;
        let (user, first) = auth
            .register("John", "john@example.com", "secret1")
            .await
            .unwrap();
        let (_, second) = auth.login("john@example.com", "secret1").await.unwrap();

        auth.logout(user.id).await.unwrap();

        assert!(auth.validate_token(&first).await.is_err());
        assert!(auth.validate_token(&second).await.is_err());
    }
}
