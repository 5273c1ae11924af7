// src/common/response.rs

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

/// Envelope fixo de todas as respostas: `{data, message, status}`.
/// O status HTTP é repetido no corpo por contrato da API.
pub fn envelope<T: Serialize>(status: StatusCode, data: T, message: &str) -> impl IntoResponse {
    (
        status,
        Json(json!({
            "data": data,
            "message": message,
            "status": status.as_u16(),
        })),
    )
}

/// Variante dos endpoints de autenticação, que também carregam `errors`.
pub fn auth_envelope<T: Serialize>(
    status: StatusCode,
    data: T,
    message: &str,
) -> impl IntoResponse {
    (
        status,
        Json(json!({
            "data": data,
            "message": message,
            "status": status.as_u16(),
            "errors": {},
        })),
    )
}

/// Metadados de paginação, no mesmo formato do sistema original.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub total: i64,
    pub per_page: i64,
    pub last_page: i64,
}

/// Uma página de resultados com seus metadados.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T: Serialize> Page<T> {
    pub fn new(data: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            data,
            meta: PageMeta {
                current_page: page,
                total,
                per_page,
                last_page,
            },
        }
    }
}

/// Parâmetros de paginação lidos da query string (`?page=&per_page=`).
#[derive(Debug, serde::Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    /// Página corrente (mínimo 1) e tamanho (padrão 10).
    pub fn resolve(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(10).clamp(1, 100);
        (page, per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_rounds_up() {
        let page: Page<i64> = Page::new(vec![], 1, 10, 21);
        assert_eq!(page.meta.last_page, 3);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let page: Page<i64> = Page::new(vec![], 1, 10, 0);
        assert_eq!(page.meta.last_page, 1);
    }

    #[test]
    fn page_query_defaults() {
        let query = PageQuery {
            page: None,
            per_page: None,
        };
        assert_eq!(query.resolve(), (1, 10));
    }
}
