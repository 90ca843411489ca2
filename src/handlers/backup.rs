// src/handlers/backup.rs

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::{common::error::AppError, config::AppState};

// GET /api/backup/export
#[utoipa::path(
    get,
    path = "/api/backup/export",
    tag = "Backup",
    responses(
        (status = 200, description = "Documento de backup como download (JSON formatado)")
    )
)]
pub async fn exportar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let documento = app_state.backup_service.exportar();
    let corpo = serde_json::to_string_pretty(&documento)?;

    let nome = app_state.backup_service.nome_arquivo_backup();
    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{nome}\""),
        ),
    ];

    Ok((StatusCode::OK, headers, corpo))
}

// POST /api/backup/import
#[utoipa::path(
    post,
    path = "/api/backup/import",
    tag = "Backup",
    responses(
        (status = 200, description = "Mesclagem aplicada e persistida", body = crate::models::backup::ResultadoImportacao),
        (status = 400, description = "Payload não é um array nem um objeto com items")
    )
)]
pub async fn importar(
    State(app_state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state.backup_service.importar(&payload)?;

    tracing::info!(
        "Importação concluída: {} registro(s) aplicados, {} na coleção",
        resultado.importados,
        resultado.total
    );

    Ok((StatusCode::OK, Json(resultado)))
}
