// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

// Migrações embutidas no binário; também usadas pelos testes para
// montar bancos em memória.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
