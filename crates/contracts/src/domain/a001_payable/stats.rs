use crate::shared::lenient;
use serde::{Deserialize, Serialize};

/// Response of `/financeiro/contas-pagar/estatisticas/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayableStatsDto {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_pendente: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub vencidas_count: u64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub vencidas_valor: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub pagas_hoje: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub proximos_vencimentos: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverdueSummary {
    pub count: u64,
    pub amount: f64,
}

/// Aggregate counters shown above the list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PayableStats {
    pub total_pending: f64,
    pub overdue: OverdueSummary,
    pub paid_today: u64,
    pub upcoming_due: u64,
}

impl From<PayableStatsDto> for PayableStats {
    fn from(dto: PayableStatsDto) -> Self {
        Self {
            total_pending: dto.total_pendente,
            overdue: OverdueSummary {
                count: dto.vencidas_count,
                amount: dto.vencidas_valor,
            },
            paid_today: dto.pagas_hoje,
            upcoming_due: dto.proximos_vencimentos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_from_decimal_strings() {
        let dto: PayableStatsDto = serde_json::from_str(
            r#"{"total_pendente":"12500.75","vencidas_count":3,"vencidas_valor":"980.10","pagas_hoje":"2"}"#,
        )
        .unwrap();
        let stats = PayableStats::from(dto);

        assert_eq!(stats.total_pending, 12500.75);
        assert_eq!(stats.overdue.count, 3);
        assert_eq!(stats.overdue.amount, 980.10);
        assert_eq!(stats.paid_today, 2);
        assert_eq!(stats.upcoming_due, 0);
    }
}
