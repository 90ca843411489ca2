// src/common/money.rs

use rust_decimal::Decimal;

/// Converte texto livre de dinheiro para Decimal, na convenção pt-BR:
/// '.' é separador de milhar e ',' é o separador decimal.
/// Entrada inválida degrada para 0; o resultado nunca é negativo.
pub fn parse_money(texto: &str) -> Decimal {
    let limpo: String = texto
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    let normalizado = limpo.replace('.', "").replace(',', ".");
    match normalizado.parse::<Decimal>() {
        Ok(n) if n.is_sign_negative() => Decimal::ZERO,
        Ok(n) => n,
        Err(_) => Decimal::ZERO,
    }
}

/// Formata como moeda brasileira: "R$ 1.234,56".
/// Substituto fixo de duas casas para quando não há formatador de locale.
pub fn format_brl(valor: Decimal) -> String {
    let arredondado = valor.round_dp(2);
    let texto = arredondado.abs().to_string();
    let (inteiro, fracao) = match texto.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (texto, "00".to_string()),
    };

    let mut invertido = String::new();
    for (idx, c) in inteiro.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            invertido.push('.');
        }
        invertido.push(c);
    }
    let agrupado: String = invertido.chars().rev().collect();

    let sinal = if arredondado.is_sign_negative() { "-" } else { "" };
    format!("R$ {sinal}{agrupado},{fracao}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_money_convencao_brasileira() {
        assert_eq!(parse_money("5.500,00"), Decimal::new(550000, 2));
        assert_eq!(parse_money("R$ 1.234,56"), Decimal::new(123456, 2));
        assert_eq!(parse_money("1200"), Decimal::from(1200));
    }

    #[test]
    fn parse_money_entrada_invalida_vira_zero() {
        assert_eq!(parse_money(""), Decimal::ZERO);
        assert_eq!(parse_money("abc"), Decimal::ZERO);
        assert_eq!(parse_money("-"), Decimal::ZERO);
    }

    #[test]
    fn parse_money_nunca_negativo() {
        assert_eq!(parse_money("-500,00"), Decimal::ZERO);
    }

    #[test]
    fn format_brl_agrupa_milhares() {
        assert_eq!(format_brl(Decimal::new(123456, 2)), "R$ 1.234,56");
        assert_eq!(format_brl(Decimal::from(5500)), "R$ 5.500,00");
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
    }

    #[test]
    fn format_brl_completa_casas_decimais() {
        assert_eq!(format_brl(Decimal::new(15, 1)), "R$ 1,50");
        assert_eq!(format_brl(Decimal::from(1000000)), "R$ 1.000.000,00");
    }
}
