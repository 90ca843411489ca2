// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState};

// GET /api/dashboard/resumo
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contadores e valor em aberto", body = crate::models::dashboard::ResumoPropostas)
    )
)]
pub async fn resumo(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state.dashboard_service.resumo();

    Ok((StatusCode::OK, Json(resumo)))
}

// GET /api/dashboard/valores
#[utoipa::path(
    get,
    path = "/api/dashboard/valores",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Valores por desfecho (ganhas, perdidas/canceladas, em aberto)", body = crate::models::dashboard::ValoresResumo)
    )
)]
pub async fn valores(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let valores = app_state.dashboard_service.valores();

    Ok((StatusCode::OK, Json(valores)))
}
