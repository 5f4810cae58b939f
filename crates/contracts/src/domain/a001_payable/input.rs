use super::RecurrenceFrequency;
use crate::domain::common::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /financeiro/contas-pagar/` and `PUT /financeiro/contas-pagar/{id}/`.
///
/// Optional fields are left out of the body when empty so the server keeps
/// its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayableInput {
    pub filial: EntityId,
    pub fornecedor: EntityId,
    pub categoria: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forma_pagamento: Option<EntityId>,
    pub descricao: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_documento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_boleto: Option<String>,
    pub valor_original: f64,
    #[serde(default)]
    pub desconto: f64,
    #[serde(default)]
    pub juros: f64,
    #[serde(default)]
    pub multa: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_emissao: Option<NaiveDate>,
    pub data_vencimento: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub e_recorrente: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequencia_recorrencia: Option<RecurrenceFrequency>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn id(s: &str) -> EntityId {
        EntityId::from_string(s).unwrap()
    }

    #[test]
    fn test_minimal_body_omits_empty_optionals() {
        let input = PayableInput {
            filial: id("1"),
            fornecedor: id("2"),
            categoria: id("3"),
            forma_pagamento: None,
            descricao: "Aluguel".into(),
            numero_documento: None,
            numero_boleto: None,
            valor_original: 1500.0,
            desconto: 0.0,
            juros: 0.0,
            multa: 0.0,
            data_emissao: None,
            data_vencimento: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            observacoes: None,
            e_recorrente: false,
            frequencia_recorrencia: None,
        };
        let body: Value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            json!({
                "filial": "1",
                "fornecedor": "2",
                "categoria": "3",
                "descricao": "Aluguel",
                "valor_original": 1500.0,
                "desconto": 0.0,
                "juros": 0.0,
                "multa": 0.0,
                "data_vencimento": "2024-07-10",
                "e_recorrente": false
            })
        );
    }

    #[test]
    fn test_recurrence_uses_wire_names() {
        let body = json!({
            "filial": 1,
            "fornecedor": 2,
            "categoria": 3,
            "descricao": "Internet",
            "valor_original": 99.9,
            "data_vencimento": "2024-07-10",
            "e_recorrente": true,
            "frequencia_recorrencia": "mensal"
        });
        let input: PayableInput = serde_json::from_value(body).unwrap();
        assert_eq!(input.frequencia_recorrencia, Some(RecurrenceFrequency::Mensal));
        assert_eq!(input.filial, id("1"));
        assert_eq!(input.desconto, 0.0);
    }
}
