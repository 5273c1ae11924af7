pub mod constraints;

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod token_repo;
pub use token_repo::TokenRepository;
pub mod agency_repo;
pub use agency_repo::AgencyRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod phone_repo;
pub use phone_repo::PhoneRepository;
pub mod operator_repo;
pub use operator_repo::OperatorRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod sales_user_repo;
pub use sales_user_repo::SalesUserRepository;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod record_repo;
pub use record_repo::RecordRepository;

// Banco em memória já migrado, para os testes de unidade dos
// repositórios e serviços.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    // Uma única conexão: cada conexão "sqlite::memory:" nova abriria um
    // banco vazio próprio.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    crate::MIGRATOR.run(&pool).await.unwrap();
    pool
}
