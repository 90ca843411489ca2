// src/services/consulta.rs

use chrono::NaiveDate;

use crate::models::proposta::{Etapa, Ordenacao, Proposta};

/// Deriva a visão filtrada e ordenada da coleção. Retorna uma coleção nova;
/// a entrada nunca é modificada. Ordenação estável (Vec::sort_by é estável),
/// empates mantêm a ordem armazenada.
pub fn filtrar(
    items: &[Proposta],
    texto: &str,
    etapa: Option<Etapa>,
    ordenacao: Ordenacao,
) -> Vec<Proposta> {
    let busca = texto.trim().to_lowercase();

    let mut visao: Vec<Proposta> = items
        .iter()
        .filter(|p| busca.is_empty() || campos_pesquisaveis(p).contains(&busca))
        .filter(|p| etapa.map_or(true, |e| p.stage == e))
        .cloned()
        .collect();

    match ordenacao {
        Ordenacao::AtualizacaoDesc => {
            visao.sort_by_key(|p| std::cmp::Reverse(p.updated_at));
        }
        // Sem vencimento ordena por último
        Ordenacao::VencimentoAsc => {
            visao.sort_by_key(|p| p.due.unwrap_or(NaiveDate::MAX));
        }
        Ordenacao::ValorDesc => {
            visao.sort_by(|a, b| b.value.cmp(&a.value));
        }
        Ordenacao::ClienteAsc => {
            visao.sort_by(|a, b| a.client.to_lowercase().cmp(&b.client.to_lowercase()));
        }
        Ordenacao::Nenhuma => {}
    }

    visao
}

// Campos pesquisáveis concatenados em minúsculas; campos vazios ficam de fora.
fn campos_pesquisaveis(p: &Proposta) -> String {
    [
        &p.client, &p.partner, &p.service, &p.city, &p.contact, &p.notes,
    ]
    .iter()
    .filter(|s| !s.is_empty())
    .map(|s| s.as_str())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}
