// src/services/backup_service.rs

use chrono::{Local, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    common::error::AppError,
    models::{
        backup::{ExportacaoBackup, ResultadoImportacao},
        proposta::Proposta,
    },
    store::PropostaStore,
};

#[derive(Clone)]
pub struct BackupService {
    store: PropostaStore,
}

impl BackupService {
    pub fn new(store: PropostaStore) -> Self {
        Self { store }
    }

    pub fn exportar(&self) -> ExportacaoBackup {
        ExportacaoBackup {
            exported_at: Utc::now(),
            items: self.store.snapshot(),
        }
    }

    pub fn nome_arquivo_backup(&self) -> String {
        format!("crm_propostas_backup_{}.json", Local::now().date_naive())
    }

    /// Aplica a mesclagem e persiste a coleção resultante. Em payload
    /// malformado nada muda: o erro sai antes de qualquer escrita.
    pub fn importar(&self, payload: &Value) -> Result<ResultadoImportacao, AppError> {
        let (mescladas, importados) = mesclar(self.store.snapshot(), payload)?;
        let total = mescladas.len();
        self.store.substituir_tudo(mescladas)?;
        Ok(ResultadoImportacao { importados, total })
    }
}

/// Reconciliação por identidade: o payload deve ser um array de propostas ou
/// um objeto com um array `items`; qualquer outra forma é rejeitada inteira.
/// Em colisão de id o registro recebido vence: substituição integral do
/// registro, não mesclagem campo a campo (decisão de projeto do formato).
pub fn mesclar(
    existentes: Vec<Proposta>,
    payload: &Value,
) -> Result<(Vec<Proposta>, usize), AppError> {
    let recebidos = match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => obj
            .get("items")
            .and_then(Value::as_array)
            .map(|v| v.as_slice())
            .ok_or(AppError::FormatoImportacaoInvalido)?,
        _ => return Err(AppError::FormatoImportacaoInvalido),
    };

    // IndexMap preserva a ordem de inserção: resultado determinístico
    // mesmo antes da ordenação final.
    let mut mapa: IndexMap<String, Proposta> = existentes
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    let mut importados = 0;
    for valor in recebidos {
        let Some(mut proposta) = Proposta::from_value(valor) else {
            continue;
        };
        // Sem id não há identidade para reconciliar: ignorado em silêncio
        if proposta.id.is_empty() {
            continue;
        }
        // compat: backups antigos podem vir sem data de entrada
        if proposta.entry.is_none() {
            proposta.entry = Some(Local::now().date_naive());
        }
        mapa.insert(proposta.id.clone(), proposta);
        importados += 1;
    }

    let mut resultado: Vec<Proposta> = mapa.into_values().collect();
    resultado.sort_by_key(|p| std::cmp::Reverse(p.updated_at));
    Ok((resultado, importados))
}
