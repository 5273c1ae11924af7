// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::{config::AppState, handlers, middleware::auth::auth_guard};

// Monta o router completo. Separado do main para que os testes de
// integração consigam montar a aplicação sobre um pool em memória.
pub fn app(app_state: AppState) -> Router {
    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Todo o resto exige o token Bearer
    let protected_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/user", get(handlers::auth::user))
        .route(
            "/agencies",
            get(handlers::agencies::index).post(handlers::agencies::store),
        )
        .route(
            "/agencies/{id}",
            get(handlers::agencies::show)
                .put(handlers::agencies::update)
                .delete(handlers::agencies::destroy),
        )
        .route(
            "/customers",
            get(handlers::customers::index).post(handlers::customers::store),
        )
        // Clientes são endereçados pelo dni nas rotas de item.
        .route(
            "/customers/{dni}",
            get(handlers::customers::show)
                .put(handlers::customers::update)
                .delete(handlers::customers::destroy),
        )
        .route(
            "/phones",
            get(handlers::phones::index).post(handlers::phones::store),
        )
        .route(
            "/phones/{id}",
            get(handlers::phones::show)
                .put(handlers::phones::update)
                .delete(handlers::phones::destroy),
        )
        .route(
            "/operators",
            get(handlers::operators::index).post(handlers::operators::store),
        )
        .route(
            "/operators/{id}",
            get(handlers::operators::show)
                .put(handlers::operators::update)
                .delete(handlers::operators::destroy),
        )
        .route(
            "/sales-type",
            get(handlers::sales_types::index).post(handlers::sales_types::store),
        )
        .route(
            "/sales-type/{id}",
            get(handlers::sales_types::show)
                .put(handlers::sales_types::update)
                .delete(handlers::sales_types::destroy),
        )
        .route(
            "/typifications",
            get(handlers::typifications::index).post(handlers::typifications::store),
        )
        .route(
            "/typifications/{id}",
            get(handlers::typifications::show)
                .put(handlers::typifications::update)
                .delete(handlers::typifications::destroy),
        )
        .route(
            "/sales-user",
            get(handlers::sales_users::index).post(handlers::sales_users::store),
        )
        .route(
            "/sales-user/{id}",
            get(handlers::sales_users::show)
                .put(handlers::sales_users::update)
                .delete(handlers::sales_users::destroy),
        )
        .route(
            "/sales",
            get(handlers::sales::index).post(handlers::sales::store),
        )
        // Vendas são endereçadas pelo número do pedido.
        .route(
            "/sales/{sales_order}",
            get(handlers::sales::show)
                .put(handlers::sales::update)
                .delete(handlers::sales::destroy),
        )
        .route(
            "/customers-records",
            get(handlers::records::index).post(handlers::records::store),
        )
        .route(
            "/customers-records/{key}",
            get(handlers::records::show)
                .put(handlers::records::update)
                .delete(handlers::records::destroy),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", auth_routes.merge(protected_routes))
        .with_state(app_state)
}
