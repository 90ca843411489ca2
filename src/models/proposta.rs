// src/models/proposta.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::money::parse_money;

// --- ENUMS ---

// As 8 etapas fixas do funil. A ordem das variantes é a ordem do funil,
// por isso derivamos Ord.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, ToSchema,
)]
pub enum Etapa {
    #[default]
    #[serde(rename = "LEAD RECEBIDO")]
    LeadRecebido,
    #[serde(rename = "QUALIFICAÇÃO")]
    Qualificacao,
    #[serde(rename = "LEVANTAMENTO")]
    Levantamento,
    #[serde(rename = "PROPOSTA EM ELABORAÇÃO")]
    PropostaEmElaboracao,
    #[serde(rename = "PROPOSTA ENVIADA")]
    PropostaEnviada,
    #[serde(rename = "NEGOCIAÇÃO")]
    Negociacao,
    #[serde(rename = "FECHADO (GANHO)")]
    FechadoGanho,
    #[serde(rename = "PERDIDO / CANCELADO")]
    PerdidoCancelado,
}

impl Etapa {
    pub const TODAS: [Etapa; 8] = [
        Etapa::LeadRecebido,
        Etapa::Qualificacao,
        Etapa::Levantamento,
        Etapa::PropostaEmElaboracao,
        Etapa::PropostaEnviada,
        Etapa::Negociacao,
        Etapa::FechadoGanho,
        Etapa::PerdidoCancelado,
    ];

    pub fn rotulo(&self) -> &'static str {
        match self {
            Etapa::LeadRecebido => "LEAD RECEBIDO",
            Etapa::Qualificacao => "QUALIFICAÇÃO",
            Etapa::Levantamento => "LEVANTAMENTO",
            Etapa::PropostaEmElaboracao => "PROPOSTA EM ELABORAÇÃO",
            Etapa::PropostaEnviada => "PROPOSTA ENVIADA",
            Etapa::Negociacao => "NEGOCIAÇÃO",
            Etapa::FechadoGanho => "FECHADO (GANHO)",
            Etapa::PerdidoCancelado => "PERDIDO / CANCELADO",
        }
    }

    pub fn do_rotulo(rotulo: &str) -> Option<Etapa> {
        Etapa::TODAS.into_iter().find(|e| e.rotulo() == rotulo)
    }
}

// Estado do ciclo de vida, independente da etapa do funil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Aberta,
    Ganha,
    Perdida,
    Cancelada,
}

impl Status {
    fn do_rotulo(rotulo: &str) -> Option<Status> {
        match rotulo {
            "ABERTA" => Some(Status::Aberta),
            "GANHA" => Some(Status::Ganha),
            "PERDIDA" => Some(Status::Perdida),
            "CANCELADA" => Some(Status::Cancelada),
            _ => None,
        }
    }
}

// Modo de ordenação da listagem. Valor desconhecido vira Nenhuma
// (mantém a ordem armazenada).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordenacao {
    AtualizacaoDesc,
    VencimentoAsc,
    ValorDesc,
    ClienteAsc,
    #[default]
    Nenhuma,
}

impl Ordenacao {
    pub fn do_parametro(parametro: &str) -> Ordenacao {
        match parametro {
            "updated_desc" => Ordenacao::AtualizacaoDesc,
            "due_asc" => Ordenacao::VencimentoAsc,
            "value_desc" => Ordenacao::ValorDesc,
            "client_asc" => Ordenacao::ClienteAsc,
            _ => Ordenacao::Nenhuma,
        }
    }
}

// --- PROPOSTA (O Dado) ---

/// Um registro de proposta, no mesmo formato JSON (camelCase) do arquivo
/// de dados e dos backups exportados.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Proposta {
    pub id: String,
    pub client: String,
    pub contact: String,
    pub service: String,
    pub city: String,
    pub partner: String,
    pub entry: Option<NaiveDate>,
    pub value: Decimal,
    pub due: Option<NaiveDate>,
    pub stage: Etapa,
    pub status: Status,
    pub notes: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Proposta {
    /// Leitura tolerante de um objeto JSON: campos ausentes ou inválidos
    /// degradam para o valor padrão, nunca para erro. Retorna None apenas
    /// quando o valor nem é um objeto.
    pub fn from_value(valor: &Value) -> Option<Proposta> {
        let obj = valor.as_object()?;
        Some(Proposta {
            id: campo_texto(obj.get("id")),
            client: campo_texto(obj.get("client")),
            contact: campo_texto(obj.get("contact")),
            service: campo_texto(obj.get("service")),
            city: campo_texto(obj.get("city")),
            partner: campo_texto(obj.get("partner")),
            entry: campo_data(obj.get("entry")),
            value: campo_valor(obj.get("value")),
            due: campo_data(obj.get("due")),
            stage: obj
                .get("stage")
                .and_then(Value::as_str)
                .and_then(Etapa::do_rotulo)
                .unwrap_or_default(),
            status: obj
                .get("status")
                .and_then(Value::as_str)
                .and_then(Status::do_rotulo)
                .unwrap_or_default(),
            notes: campo_texto(obj.get("notes")),
            created_at: campo_millis(obj.get("createdAt")),
            updated_at: campo_millis(obj.get("updatedAt")),
        })
    }

    /// Atrasada: vencimento definido, já passado (comparação de calendário)
    /// e a proposta ainda em aberto.
    pub fn atrasada(&self, hoje: NaiveDate) -> bool {
        matches!(self.due, Some(d) if d < hoje) && self.status == Status::Aberta
    }
}

impl<'de> Deserialize<'de> for Proposta {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let valor = Value::deserialize(deserializer)?;
        Proposta::from_value(&valor)
            .ok_or_else(|| serde::de::Error::custom("proposta deve ser um objeto JSON"))
    }
}

fn campo_texto(valor: Option<&Value>) -> String {
    valor
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Aceita "YYYY-MM-DD"; string vazia, null, ausência ou lixo viram None.
fn campo_data(valor: Option<&Value>) -> Option<NaiveDate> {
    valor
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

// Aceita número JSON ou texto livre de dinheiro; nunca fica negativo.
fn campo_valor(valor: Option<&Value>) -> Decimal {
    let parseado = match valor {
        Some(Value::Number(n)) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        Some(Value::String(s)) => Some(parse_money(s)),
        _ => None,
    };
    match parseado {
        Some(n) if n.is_sign_negative() => Decimal::ZERO,
        Some(n) => n,
        None => Decimal::ZERO,
    }
}

fn campo_millis(valor: Option<&Value>) -> i64 {
    match valor {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalvarPropostaPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Exemplo Cliente")]
    pub client: String,

    #[schema(example = "65 9xxxx-xxxx")]
    pub contact: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Projeto Elétrico / Medição Agrupada")]
    pub service: String,

    #[schema(example = "Cuiabá/MT")]
    pub city: Option<String>,

    #[schema(example = "Parceiro Exemplo")]
    pub partner: Option<String>,

    #[schema(example = "2026-08-30")]
    pub entry: Option<NaiveDate>,

    // Texto livre de dinheiro, convenção pt-BR ("5.500,00")
    #[schema(example = "5.500,00")]
    pub value: Option<String>,

    pub due: Option<NaiveDate>,

    pub stage: Option<Etapa>,

    pub status: Option<Status>,

    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_com_campos_ausentes_usa_padroes() {
        let p = Proposta::from_value(&json!({ "id": "a1" })).unwrap();
        assert_eq!(p.id, "a1");
        assert_eq!(p.client, "");
        assert_eq!(p.partner, "");
        assert_eq!(p.value, Decimal::ZERO);
        assert_eq!(p.entry, None);
        assert_eq!(p.stage, Etapa::LeadRecebido);
        assert_eq!(p.status, Status::Aberta);
        assert_eq!(p.updated_at, 0);
    }

    #[test]
    fn from_value_rejeita_apenas_nao_objetos() {
        assert!(Proposta::from_value(&json!("texto")).is_none());
        assert!(Proposta::from_value(&json!(42)).is_none());
        assert!(Proposta::from_value(&json!({})).is_some());
    }

    #[test]
    fn data_vazia_ou_invalida_degrada_para_none() {
        let p = Proposta::from_value(&json!({ "id": "a", "due": "", "entry": "30/08/2026" })).unwrap();
        assert_eq!(p.due, None);
        assert_eq!(p.entry, None);

        let p = Proposta::from_value(&json!({ "id": "a", "due": "2026-01-15" })).unwrap();
        assert_eq!(p.due, NaiveDate::from_ymd_opt(2026, 1, 15));
    }

    #[test]
    fn valor_negativo_ou_invalido_vira_zero() {
        let p = Proposta::from_value(&json!({ "id": "a", "value": -50 })).unwrap();
        assert_eq!(p.value, Decimal::ZERO);

        let p = Proposta::from_value(&json!({ "id": "a", "value": "abc" })).unwrap();
        assert_eq!(p.value, Decimal::ZERO);

        let p = Proposta::from_value(&json!({ "id": "a", "value": 5500 })).unwrap();
        assert_eq!(p.value, Decimal::from(5500));
    }

    #[test]
    fn etapa_e_status_desconhecidos_degradam_para_padrao() {
        let p = Proposta::from_value(&json!({
            "id": "a",
            "stage": "ETAPA INEXISTENTE",
            "status": "PENDENTE"
        }))
        .unwrap();
        assert_eq!(p.stage, Etapa::LeadRecebido);
        assert_eq!(p.status, Status::Aberta);
    }

    #[test]
    fn serializa_com_chaves_camel_case_e_rotulos_originais() {
        let p = Proposta::from_value(&json!({
            "id": "a",
            "stage": "PROPOSTA ENVIADA",
            "status": "GANHA",
            "updatedAt": 123
        }))
        .unwrap();
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["stage"], "PROPOSTA ENVIADA");
        assert_eq!(v["status"], "GANHA");
        assert_eq!(v["updatedAt"], 123);
    }

    #[test]
    fn atrasada_exige_vencimento_passado_e_status_aberta() {
        let hoje = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let ontem = hoje.pred_opt().unwrap();

        let mut p = Proposta::from_value(&json!({ "id": "a" })).unwrap();
        p.due = Some(ontem);
        p.status = Status::Aberta;
        assert!(p.atrasada(hoje));

        p.status = Status::Ganha;
        assert!(!p.atrasada(hoje));

        p.status = Status::Aberta;
        p.due = Some(hoje);
        assert!(!p.atrasada(hoje));

        p.due = None;
        assert!(!p.atrasada(hoje));
    }

    #[test]
    fn ordenacao_desconhecida_vira_nenhuma() {
        assert_eq!(Ordenacao::do_parametro("value_desc"), Ordenacao::ValorDesc);
        assert_eq!(Ordenacao::do_parametro("qualquer"), Ordenacao::Nenhuma);
    }

    #[test]
    fn etapa_do_rotulo_cobre_as_oito_etapas() {
        for etapa in Etapa::TODAS {
            assert_eq!(Etapa::do_rotulo(etapa.rotulo()), Some(etapa));
        }
        assert_eq!(Etapa::do_rotulo("OUTRA"), None);
    }
}
