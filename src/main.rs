//src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod docs;
mod handlers;
mod models;
mod services;
mod store;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Rotas de propostas (CRUD + duplicação)
    let proposta_routes = Router::new()
        .route(
            "/",
            get(handlers::propostas::listar).post(handlers::propostas::criar),
        )
        .route(
            "/{id}",
            put(handlers::propostas::atualizar).delete(handlers::propostas::excluir),
        )
        .route("/{id}/duplicar", post(handlers::propostas::duplicar));

    let dashboard_routes = Router::new()
        .route("/resumo", get(handlers::dashboard::resumo))
        .route("/valores", get(handlers::dashboard::valores));

    let backup_routes = Router::new()
        .route("/export", get(handlers::backup::exportar))
        .route("/import", post(handlers::backup::importar));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/propostas", proposta_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/backup", backup_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("PROPOSTAS_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
