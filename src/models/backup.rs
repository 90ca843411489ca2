// src/models/backup.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::proposta::Proposta;

/// Documento de backup, no mesmo formato que a importação aceita de volta.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportacaoBackup {
    pub exported_at: DateTime<Utc>,
    pub items: Vec<Proposta>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoImportacao {
    /// Registros recebidos aplicados (com id não vazio)
    pub importados: usize,
    /// Tamanho da coleção após a mesclagem
    pub total: usize,
}
