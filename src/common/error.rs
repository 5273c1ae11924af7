use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Mensagens de validação agrupadas por campo.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante corresponde a um status HTTP fixo.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha de validação nos endpoints de recursos (422).
    #[error("Erro de validação")]
    Validation(FieldErrors),

    // O registro usa 400 para falha de validação, por contrato da API.
    #[error("Erro de validação no registro")]
    RegisterValidation(FieldErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("{0} not found")]
    NotFound(&'static str),

    // Exclusão bloqueada por registros que ainda referenciam a linha (409).
    #[error("{0}")]
    Conflict(String),

    #[error("Erro de banco de dados")]
    Database(#[from] sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Erro de validação de um único campo.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(errors)
    }
}

/// Converte os erros do `validator` para o nosso mapa campo -> mensagens.
pub fn field_errors(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut details = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {field} field is invalid."))
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    details
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "The given data was invalid.".to_string(),
                Some(details),
            ),
            AppError::RegisterValidation(details) => (
                StatusCode::BAD_REQUEST,
                "Validation error".to_string(),
                Some(details),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".to_string(),
                None,
            ),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None)
            }
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"), None)
            }
            AppError::Conflict(message) => (StatusCode::CONFLICT, message, None),

            // Database, Bcrypt e Internal viram 500. O detalhe fica apenas
            // no log; o cliente recebe uma mensagem fixa.
            ref e => {
                tracing::error!("Erro interno do servidor: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        // Mesmo envelope das respostas de sucesso; o status aparece
        // repetido no corpo por contrato da API.
        let mut body = json!({
            "data": {},
            "message": message,
            "status": status.as_u16(),
        });
        if let Some(details) = errors {
            body["errors"] = json!(details);
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_builds_single_entry_map() {
        let err = AppError::field("phone", "The phone has already been taken.");
        match err {
            AppError::Validation(map) => {
                assert_eq!(map.len(), 1);
                assert_eq!(map["phone"], vec!["The phone has already been taken."]);
            }
            other => panic!("variante inesperada: {other:?}"),
        }
    }
}
