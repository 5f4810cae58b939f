use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /financeiro/contas-pagar/{id}/pagar/`.
///
/// `valor_pago` already includes penalty and interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRequest {
    pub valor_pago: f64,
    pub data_pagamento: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_request_wire_format() {
        let req = PayRequest {
            valor_pago: 115.0,
            data_pagamento: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"valor_pago":115.0,"data_pagamento":"2024-06-15"}"#
        );
    }
}
