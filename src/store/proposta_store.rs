// src/store/proposta_store.rs

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::proposta::{Etapa, Proposta, Status},
};

/// Adaptador de persistência: dono exclusivo da coleção em memória,
/// espelhada em um arquivo JSON (um array de propostas). Toda mutação
/// regrava o arquivo inteiro, de forma síncrona, segurando o lock
/// (um único escritor lógico por vez).
#[derive(Clone)]
pub struct PropostaStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    items: Mutex<Vec<Proposta>>,
}

impl PropostaStore {
    /// Abre o arquivo de dados. Ausência ou corrupção degradam para uma
    /// coleção vazia, nunca para erro.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<Proposta>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(
                        "Arquivo de dados corrompido ({}), iniciando vazio: {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            inner: Arc::new(StoreInner {
                path,
                items: Mutex::new(items),
            }),
        }
    }

    fn itens(&self) -> MutexGuard<'_, Vec<Proposta>> {
        self.inner.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persistir(&self, items: &[Proposta]) -> Result<(), AppError> {
        let json = serde_json::to_string(items)?;
        std::fs::write(&self.inner.path, json)?;
        Ok(())
    }

    /// Cópia somente leitura da coleção inteira.
    pub fn snapshot(&self) -> Vec<Proposta> {
        self.itens().clone()
    }

    /// Insere no topo da coleção (propostas novas aparecem primeiro).
    pub fn inserir_primeiro(&self, proposta: Proposta) -> Result<Proposta, AppError> {
        let mut items = self.itens();
        items.insert(0, proposta.clone());
        self.persistir(items.as_slice())?;
        Ok(proposta)
    }

    pub fn atualizar<F>(&self, id: &str, aplicar: F) -> Result<Proposta, AppError>
    where
        F: FnOnce(&mut Proposta),
    {
        let mut items = self.itens();
        let alvo = items
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::PropostaNaoEncontrada)?;
        aplicar(alvo);
        let atualizado = alvo.clone();
        self.persistir(items.as_slice())?;
        Ok(atualizado)
    }

    pub fn remover(&self, id: &str) -> Result<Proposta, AppError> {
        let mut items = self.itens();
        let idx = items
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::PropostaNaoEncontrada)?;
        let removido = items.remove(idx);
        self.persistir(items.as_slice())?;
        Ok(removido)
    }

    /// Troca a coleção inteira (usado pela mesclagem da importação).
    pub fn substituir_tudo(&self, novos: Vec<Proposta>) -> Result<(), AppError> {
        let mut items = self.itens();
        *items = novos;
        self.persistir(items.as_slice())
    }

    /// Na primeira execução semeia a coleção com uma proposta de exemplo,
    /// para a tela não nascer vazia.
    pub fn semear_se_vazio(&self) -> Result<(), AppError> {
        let mut items = self.itens();
        if !items.is_empty() {
            return Ok(());
        }
        let agora = Utc::now().timestamp_millis();
        items.push(Proposta {
            id: Uuid::new_v4().to_string(),
            client: "Exemplo Cliente".to_string(),
            contact: "65 9xxxx-xxxx".to_string(),
            service: "Projeto Elétrico / Medição Agrupada".to_string(),
            city: "Cuiabá/MT".to_string(),
            partner: "Parceiro Exemplo".to_string(),
            entry: Some(Local::now().date_naive()),
            value: Decimal::from(5500),
            due: None,
            stage: Etapa::PropostaEnviada,
            status: Status::Aberta,
            notes: "Exemplo de observação.".to_string(),
            created_at: agora,
            updated_at: agora,
        });
        self.persistir(items.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn proposta(id: &str) -> Proposta {
        Proposta::from_value(&json!({ "id": id, "client": "Cliente" })).unwrap()
    }

    #[test]
    fn arquivo_ausente_abre_vazio() {
        let dir = tempfile::tempdir().unwrap();
        let store = PropostaStore::open(dir.path().join("nao_existe.json"));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn arquivo_corrompido_degrada_para_vazio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("propostas.json");
        std::fs::write(&path, "{isso nao é json").unwrap();
        let store = PropostaStore::open(&path);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn mutacoes_persistem_e_sobrevivem_a_reabertura() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("propostas.json");

        let store = PropostaStore::open(&path);
        store.inserir_primeiro(proposta("a")).unwrap();
        store.inserir_primeiro(proposta("b")).unwrap();
        store
            .atualizar("a", |p| p.client = "Outro".to_string())
            .unwrap();

        let reaberto = PropostaStore::open(&path);
        let items = reaberto.snapshot();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "b");
        assert_eq!(items[1].client, "Outro");
    }

    #[test]
    fn remover_id_desconhecido_da_nao_encontrada() {
        let dir = tempfile::tempdir().unwrap();
        let store = PropostaStore::open(dir.path().join("p.json"));
        let err = store.remover("nao-existe").unwrap_err();
        assert!(matches!(err, AppError::PropostaNaoEncontrada));
    }

    #[test]
    fn semear_so_acontece_com_colecao_vazia() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");

        let store = PropostaStore::open(&path);
        store.semear_se_vazio().unwrap();
        assert_eq!(store.snapshot().len(), 1);

        store.semear_se_vazio().unwrap();
        assert_eq!(store.snapshot().len(), 1);
    }
}
