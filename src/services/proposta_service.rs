// src/services/proposta_service.rs

use chrono::{Local, Utc};
use uuid::Uuid;

use crate::{
    common::{error::AppError, money::parse_money},
    models::proposta::{Etapa, Ordenacao, Proposta, SalvarPropostaPayload, Status},
    services::consulta,
    store::PropostaStore,
};

#[derive(Clone)]
pub struct PropostaService {
    store: PropostaStore,
}

impl PropostaService {
    pub fn new(store: PropostaStore) -> Self {
        Self { store }
    }

    pub fn listar(&self, texto: &str, etapa: Option<Etapa>, ordenacao: Ordenacao) -> Vec<Proposta> {
        consulta::filtrar(&self.store.snapshot(), texto, etapa, ordenacao)
    }

    pub fn criar(&self, payload: SalvarPropostaPayload) -> Result<Proposta, AppError> {
        let entry = payload
            .entry
            .ok_or_else(|| erro_campo_obrigatorio("entry"))?;
        let agora = Utc::now().timestamp_millis();
        let proposta = Proposta {
            id: Uuid::new_v4().to_string(),
            client: normalizar(Some(payload.client)),
            contact: normalizar(payload.contact),
            service: normalizar(Some(payload.service)),
            city: normalizar(payload.city),
            partner: normalizar(payload.partner),
            entry: Some(entry),
            value: parse_money(payload.value.as_deref().unwrap_or("")),
            due: payload.due,
            stage: payload.stage.unwrap_or_default(),
            status: payload.status.unwrap_or_default(),
            notes: normalizar(payload.notes),
            created_at: agora,
            updated_at: agora,
        };
        self.store.inserir_primeiro(proposta)
    }

    /// Substitui os campos do formulário no registro existente, preservando
    /// id e createdAt; `updatedAt` é renovado.
    pub fn atualizar(&self, id: &str, payload: SalvarPropostaPayload) -> Result<Proposta, AppError> {
        let entry = payload
            .entry
            .ok_or_else(|| erro_campo_obrigatorio("entry"))?;
        let agora = Utc::now().timestamp_millis();
        self.store.atualizar(id, |p| {
            p.client = normalizar(Some(payload.client));
            p.contact = normalizar(payload.contact);
            p.service = normalizar(Some(payload.service));
            p.city = normalizar(payload.city);
            p.partner = normalizar(payload.partner);
            p.entry = Some(entry);
            p.value = parse_money(payload.value.as_deref().unwrap_or(""));
            p.due = payload.due;
            p.stage = payload.stage.unwrap_or(p.stage);
            p.status = payload.status.unwrap_or(p.status);
            p.notes = normalizar(payload.notes);
            p.updated_at = agora;
        })
    }

    pub fn excluir(&self, id: &str) -> Result<Proposta, AppError> {
        self.store.remover(id)
    }

    /// Cópia com identidade nova: id e timestamps renovados, data de entrada
    /// vira hoje e o status volta para ABERTA.
    pub fn duplicar(&self, id: &str) -> Result<Proposta, AppError> {
        let original = self
            .store
            .snapshot()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(AppError::PropostaNaoEncontrada)?;
        let agora = Utc::now().timestamp_millis();
        let copia = Proposta {
            id: Uuid::new_v4().to_string(),
            entry: Some(Local::now().date_naive()),
            status: Status::Aberta,
            created_at: agora,
            updated_at: agora,
            ..original
        };
        self.store.inserir_primeiro(copia)
    }
}

fn normalizar(campo: Option<String>) -> String {
    campo.unwrap_or_default().trim().to_string()
}

// Constrói um ValidationErrors para um campo obrigatório ausente.
fn erro_campo_obrigatorio(campo: &str) -> AppError {
    let mut err = validator::ValidationErrors::new();
    let mut validation_err = validator::ValidationError::new("required");
    validation_err.message = Some("required".to_string().into());

    // Leak seguro para erro estático
    let campo_estatico: &'static str = Box::leak(campo.to_string().into_boxed_str());
    err.add(campo_estatico, validation_err);

    AppError::ValidationError(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn service() -> (PropostaService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = PropostaStore::open(dir.path().join("propostas.json"));
        (PropostaService::new(store), dir)
    }

    fn payload(client: &str) -> SalvarPropostaPayload {
        SalvarPropostaPayload {
            client: client.to_string(),
            contact: None,
            service: "Projeto Elétrico".to_string(),
            city: Some("Cuiabá/MT".to_string()),
            partner: None,
            entry: NaiveDate::from_ymd_opt(2026, 8, 30),
            value: Some("R$ 5.500,00".to_string()),
            due: None,
            stage: None,
            status: None,
            notes: Some("  com espaços  ".to_string()),
        }
    }

    #[test]
    fn criar_gera_id_parseia_valor_e_insere_no_topo() {
        let (service, _dir) = service();
        let primeira = service.criar(payload("Cliente A")).unwrap();
        let segunda = service.criar(payload("Cliente B")).unwrap();

        assert!(!primeira.id.is_empty());
        assert_ne!(primeira.id, segunda.id);
        assert_eq!(primeira.value, Decimal::new(550000, 2));
        assert_eq!(primeira.notes, "com espaços");
        assert_eq!(primeira.status, Status::Aberta);
        assert!(primeira.created_at > 0);

        let ids: Vec<String> = service
            .listar("", None, Ordenacao::Nenhuma)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![segunda.id, primeira.id]);
    }

    #[test]
    fn criar_sem_data_de_entrada_e_erro_de_validacao() {
        let (service, _dir) = service();
        let mut p = payload("Cliente");
        p.entry = None;
        let err = service.criar(p).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn atualizar_substitui_campos_e_renova_updated_at() {
        let (service, _dir) = service();
        let criada = service.criar(payload("Cliente")).unwrap();

        let mut novo = payload("Cliente Renomeado");
        novo.value = Some("100,00".to_string());
        novo.status = Some(Status::Ganha);
        let atualizada = service.atualizar(&criada.id, novo).unwrap();

        assert_eq!(atualizada.id, criada.id);
        assert_eq!(atualizada.client, "Cliente Renomeado");
        assert_eq!(atualizada.value, Decimal::from(100));
        assert_eq!(atualizada.status, Status::Ganha);
        assert_eq!(atualizada.created_at, criada.created_at);
        assert!(atualizada.updated_at >= criada.updated_at);
    }

    #[test]
    fn atualizar_id_desconhecido_da_nao_encontrada() {
        let (service, _dir) = service();
        let err = service.atualizar("nao-existe", payload("X")).unwrap_err();
        assert!(matches!(err, AppError::PropostaNaoEncontrada));
    }

    #[test]
    fn duplicar_renova_identidade_e_forca_aberta() {
        let (service, _dir) = service();
        let mut p = payload("Cliente");
        p.status = Some(Status::Perdida);
        p.stage = Some(Etapa::Negociacao);
        let original = service.criar(p).unwrap();

        let copia = service.duplicar(&original.id).unwrap();
        assert_ne!(copia.id, original.id);
        assert_eq!(copia.client, original.client);
        assert_eq!(copia.stage, Etapa::Negociacao);
        assert_eq!(copia.status, Status::Aberta);
        assert_eq!(copia.entry, Some(Local::now().date_naive()));

        // A cópia entra no topo da coleção
        let visao = service.listar("", None, Ordenacao::Nenhuma);
        assert_eq!(visao[0].id, copia.id);
        assert_eq!(visao.len(), 2);
    }

    #[test]
    fn excluir_remove_da_colecao() {
        let (service, _dir) = service();
        let criada = service.criar(payload("Cliente")).unwrap();
        service.excluir(&criada.id).unwrap();
        assert!(service.listar("", None, Ordenacao::Nenhuma).is_empty());
    }
}
