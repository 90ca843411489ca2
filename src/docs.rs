// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Propostas ---
        handlers::propostas::listar,
        handlers::propostas::criar,
        handlers::propostas::atualizar,
        handlers::propostas::excluir,
        handlers::propostas::duplicar,

        // --- Dashboard ---
        handlers::dashboard::resumo,
        handlers::dashboard::valores,

        // --- Backup ---
        handlers::backup::exportar,
        handlers::backup::importar,
    ),
    components(
        schemas(
            // --- Propostas ---
            models::proposta::Proposta,
            models::proposta::Etapa,
            models::proposta::Status,
            models::proposta::SalvarPropostaPayload,

            // --- Dashboard ---
            models::dashboard::ResumoPropostas,
            models::dashboard::ValoresResumo,

            // --- Backup ---
            models::backup::ExportacaoBackup,
            models::backup::ResultadoImportacao,
        )
    ),
    tags(
        (name = "Propostas", description = "Cadastro e listagem de propostas"),
        (name = "Dashboard", description = "Resumo e valores por desfecho"),
        (name = "Backup", description = "Exportação e importação de backups JSON")
    ),
    info(
        title = "CRM de Propostas",
        description = "API local de propostas comerciais, persistida em arquivo JSON."
    )
)]
pub struct ApiDoc;
