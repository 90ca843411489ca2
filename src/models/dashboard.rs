// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. Resumo (Os Cards do Topo)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoPropostas {
    pub total: usize,   // Todas as propostas
    pub open: usize,    // status ABERTA
    pub won: usize,     // status GANHA
    pub overdue: usize, // Abertas com vencimento passado
    pub open_value_total: Decimal,
    pub open_value_total_brl: String, // Já formatado para exibição ("R$ 1.234,56")
}

// 2. Gráfico de barras (valores por desfecho, nesta ordem fixa)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValoresResumo {
    pub won: Decimal,
    pub lost_or_cancelled: Decimal,
    pub open: Decimal,
}
