// src/config.rs

use std::env;

use crate::services::{BackupService, DashboardService, PropostaService};
use crate::store::PropostaStore;

#[derive(Clone)]
pub struct AppState {
    pub proposta_service: PropostaService,
    pub dashboard_service: DashboardService,
    pub backup_service: BackupService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let data_file =
            env::var("PROPOSTAS_DATA_FILE").unwrap_or_else(|_| "propostas.json".to_string());

        // Abre o arquivo de dados (ausência/corrupção degrada para vazio)
        let store = PropostaStore::open(&data_file);
        store.semear_se_vazio()?;

        tracing::info!("✅ Arquivo de dados pronto: {}", data_file);

        // --- Monta o gráfico de dependências ---
        let proposta_service = PropostaService::new(store.clone());
        let dashboard_service = DashboardService::new(store.clone());
        let backup_service = BackupService::new(store);

        Ok(Self {
            proposta_service,
            dashboard_service,
            backup_service,
        })
    }
}
