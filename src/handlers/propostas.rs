// src/handlers/propostas.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::proposta::{Etapa, Ordenacao, SalvarPropostaPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ParametrosListagem {
    /// Busca textual (cliente, parceiro, serviço, cidade, contato, observações)
    pub q: Option<String>,

    /// Rótulo exato da etapa; rótulo desconhecido não restringe nada
    pub stage: Option<String>,

    /// updated_desc | due_asc | value_desc | client_asc
    pub sort: Option<String>,
}

// GET /api/propostas
#[utoipa::path(
    get,
    path = "/api/propostas",
    tag = "Propostas",
    params(ParametrosListagem),
    responses(
        (status = 200, description = "Lista filtrada e ordenada", body = Vec<crate::models::proposta::Proposta>)
    )
)]
pub async fn listar(
    State(app_state): State<AppState>,
    Query(params): Query<ParametrosListagem>,
) -> Result<impl IntoResponse, AppError> {
    let etapa = params.stage.as_deref().and_then(Etapa::do_rotulo);
    let ordenacao = params
        .sort
        .as_deref()
        .map(Ordenacao::do_parametro)
        .unwrap_or_default();

    let propostas =
        app_state
            .proposta_service
            .listar(params.q.as_deref().unwrap_or(""), etapa, ordenacao);

    Ok((StatusCode::OK, Json(propostas)))
}

// POST /api/propostas
#[utoipa::path(
    post,
    path = "/api/propostas",
    tag = "Propostas",
    request_body = SalvarPropostaPayload,
    responses(
        (status = 201, description = "Proposta criada", body = crate::models::proposta::Proposta),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<SalvarPropostaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let proposta = app_state.proposta_service.criar(payload)?;

    Ok((StatusCode::CREATED, Json(proposta)))
}

// PUT /api/propostas/{id}
#[utoipa::path(
    put,
    path = "/api/propostas/{id}",
    tag = "Propostas",
    request_body = SalvarPropostaPayload,
    params(("id" = String, Path, description = "Identidade da proposta")),
    responses(
        (status = 200, description = "Proposta atualizada", body = crate::models::proposta::Proposta),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Proposta não encontrada")
    )
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SalvarPropostaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let proposta = app_state.proposta_service.atualizar(&id, payload)?;

    Ok((StatusCode::OK, Json(proposta)))
}

// DELETE /api/propostas/{id}
#[utoipa::path(
    delete,
    path = "/api/propostas/{id}",
    tag = "Propostas",
    params(("id" = String, Path, description = "Identidade da proposta")),
    responses(
        (status = 200, description = "Proposta removida", body = crate::models::proposta::Proposta),
        (status = 404, description = "Proposta não encontrada")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removida = app_state.proposta_service.excluir(&id)?;

    Ok((StatusCode::OK, Json(removida)))
}

// POST /api/propostas/{id}/duplicar
#[utoipa::path(
    post,
    path = "/api/propostas/{id}/duplicar",
    tag = "Propostas",
    params(("id" = String, Path, description = "Identidade da proposta de origem")),
    responses(
        (status = 201, description = "Cópia criada com status ABERTA", body = crate::models::proposta::Proposta),
        (status = 404, description = "Proposta não encontrada")
    )
)]
pub async fn duplicar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let copia = app_state.proposta_service.duplicar(&id)?;

    Ok((StatusCode::CREATED, Json(copia)))
}
