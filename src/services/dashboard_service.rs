// src/services/dashboard_service.rs

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    common::money::format_brl,
    models::{
        dashboard::{ResumoPropostas, ValoresResumo},
        proposta::{Proposta, Status},
    },
    store::PropostaStore,
};

#[derive(Clone)]
pub struct DashboardService {
    store: PropostaStore,
}

impl DashboardService {
    pub fn new(store: PropostaStore) -> Self {
        Self { store }
    }

    pub fn resumo(&self) -> ResumoPropostas {
        resumo_em(&self.store.snapshot(), Local::now().date_naive())
    }

    pub fn valores(&self) -> ValoresResumo {
        valores_de(&self.store.snapshot())
    }
}

/// Estatísticas agregadas sobre o instantâneo da coleção. Função pura;
/// coleção vazia produz tudo zero.
pub fn resumo_em(items: &[Proposta], hoje: NaiveDate) -> ResumoPropostas {
    let open_value_total: Decimal = items
        .iter()
        .filter(|p| p.status == Status::Aberta)
        .map(|p| p.value)
        .sum();

    ResumoPropostas {
        total: items.len(),
        open: items.iter().filter(|p| p.status == Status::Aberta).count(),
        won: items.iter().filter(|p| p.status == Status::Ganha).count(),
        overdue: items.iter().filter(|p| p.atrasada(hoje)).count(),
        open_value_total,
        open_value_total_brl: format_brl(open_value_total),
    }
}

/// Soma de valores em três baldes de desfecho, na ordem fixa do gráfico:
/// ganhas, perdidas/canceladas, em aberto. Cada proposta cai em exatamente
/// um balde.
pub fn valores_de(items: &[Proposta]) -> ValoresResumo {
    let soma = |filtro: fn(&Status) -> bool| -> Decimal {
        items
            .iter()
            .filter(|p| filtro(&p.status))
            .map(|p| p.value)
            .sum()
    };

    ValoresResumo {
        won: soma(|s| *s == Status::Ganha),
        lost_or_cancelled: soma(|s| matches!(s, Status::Perdida | Status::Cancelada)),
        open: soma(|s| *s == Status::Aberta),
    }
}
