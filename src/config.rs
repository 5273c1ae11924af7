// src/config.rs

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{env, str::FromStr, time::Duration};

use crate::{
    db::{
        AgencyRepository, CatalogRepository, CustomerRepository, OperatorRepository,
        PhoneRepository, RecordRepository, SalesRepository, SalesUserRepository, TokenRepository,
        UserRepository,
    },
    services::auth::AuthService,
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth_service: AuthService,
    pub agencies: AgencyRepository,
    pub customers: CustomerRepository,
    pub phones: PhoneRepository,
    pub operators: OperatorRepository,
    pub catalog: CatalogRepository,
    pub sales_users: SalesUserRepository,
    pub sales: SalesRepository,
    pub records: RecordRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let options = SqliteConnectOptions::from_str(&database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool))
    }

    // Monta o gráfico de dependências a partir de um pool já aberto.
    // Também é o ponto de entrada dos testes de integração.
    pub fn from_pool(db_pool: SqlitePool) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let token_repo = TokenRepository::new(db_pool.clone());
        let auth_service = AuthService::new(user_repo, token_repo, db_pool.clone());

        Self {
            auth_service,
            agencies: AgencyRepository::new(db_pool.clone()),
            customers: CustomerRepository::new(db_pool.clone()),
            phones: PhoneRepository::new(db_pool.clone()),
            operators: OperatorRepository::new(db_pool.clone()),
            catalog: CatalogRepository::new(db_pool.clone()),
            sales_users: SalesUserRepository::new(db_pool.clone()),
            sales: SalesRepository::new(db_pool.clone()),
            records: RecordRepository::new(db_pool.clone()),
            db_pool,
        }
    }
}
