use super::aggregate::{PayableRecord, PayableStatus, RecurrenceFrequency};
use crate::domain::common::{EntityId, EntityRef};
use crate::shared::lenient::{
    amount_from_value, date_from_value, id_from_value, name_from_value,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire shape of `/financeiro/contas-pagar/` items.
///
/// Every field is kept as a raw `Value` because list and detail serializers
/// disagree on types: foreign keys come as `fornecedor_id`, `fornecedor`
/// or a nested `fornecedor_detalhes`, amounts as numbers or decimal strings.
/// `into_record` is the single place where those variants are resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayableRecordDto {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub numero_documento: Option<Value>,
    #[serde(default)]
    pub numero_boleto: Option<Value>,

    #[serde(default)]
    pub fornecedor_id: Option<Value>,
    #[serde(default)]
    pub fornecedor: Option<Value>,
    #[serde(default)]
    pub fornecedor_nome: Option<String>,
    #[serde(default)]
    pub fornecedor_detalhes: Option<Value>,

    #[serde(default)]
    pub filial_id: Option<Value>,
    #[serde(default)]
    pub filial: Option<Value>,
    #[serde(default)]
    pub filial_nome: Option<String>,
    #[serde(default)]
    pub filial_detalhes: Option<Value>,

    #[serde(default)]
    pub categoria_id: Option<Value>,
    #[serde(default)]
    pub categoria: Option<Value>,
    #[serde(default)]
    pub categoria_nome: Option<String>,
    #[serde(default)]
    pub categoria_detalhes: Option<Value>,

    #[serde(default)]
    pub forma_pagamento_nome: Option<String>,
    #[serde(default)]
    pub forma_pagamento_detalhes: Option<Value>,

    #[serde(default)]
    pub valor_original: Option<Value>,
    #[serde(default)]
    pub desconto: Option<Value>,
    #[serde(default)]
    pub juros: Option<Value>,
    #[serde(default)]
    pub multa: Option<Value>,
    #[serde(default)]
    pub valor_pago: Option<Value>,

    #[serde(default)]
    pub data_emissao: Option<Value>,
    #[serde(default)]
    pub data_vencimento: Option<Value>,
    #[serde(default)]
    pub data_pagamento: Option<Value>,

    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub e_recorrente: Option<bool>,
    #[serde(default)]
    pub frequencia_recorrencia: Option<String>,
}

fn entity_ref(
    explicit_id: Option<&Value>,
    plain: Option<&Value>,
    name: Option<&String>,
    details: Option<&Value>,
) -> EntityRef {
    let id = explicit_id
        .and_then(id_from_value)
        .or_else(|| plain.and_then(id_from_value))
        .or_else(|| details.and_then(id_from_value))
        .map(EntityId::new);

    let name = name
        .filter(|n| !n.trim().is_empty())
        .cloned()
        .or_else(|| details.and_then(name_from_value))
        .or_else(|| plain.and_then(name_from_value));

    EntityRef { id, name }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn amount(value: Option<&Value>) -> f64 {
    value.and_then(amount_from_value).unwrap_or(0.0)
}

impl PayableRecordDto {
    /// Normalises the wire item. Fails only when the record cannot be
    /// identified or placed on the calendar (no id, no due date, unknown status).
    pub fn into_record(self) -> Result<PayableRecord, String> {
        let id = self
            .id
            .as_ref()
            .and_then(id_from_value)
            .map(EntityId::new)
            .ok_or_else(|| "Record without id".to_string())?;

        let due_date = self
            .data_vencimento
            .as_ref()
            .and_then(date_from_value)
            .ok_or_else(|| format!("Record {}: invalid data_vencimento", id))?;

        let status = match self.status.as_deref() {
            Some(s) => s
                .parse::<PayableStatus>()
                .map_err(|e| format!("Record {}: {}", id, e))?,
            None => PayableStatus::Pending,
        };

        let recurrence = if self.e_recorrente.unwrap_or(false) {
            self.frequencia_recorrencia
                .as_deref()
                .and_then(|f| f.parse::<RecurrenceFrequency>().ok())
        } else {
            None
        };

        let payment_method_name = self
            .forma_pagamento_nome
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                self.forma_pagamento_detalhes
                    .as_ref()
                    .and_then(name_from_value)
            });

        Ok(PayableRecord {
            description: self.descricao.clone().unwrap_or_default(),
            document_number: text(self.numero_documento.as_ref())
                .or_else(|| text(self.numero_boleto.as_ref())),
            supplier: entity_ref(
                self.fornecedor_id.as_ref(),
                self.fornecedor.as_ref(),
                self.fornecedor_nome.as_ref(),
                self.fornecedor_detalhes.as_ref(),
            ),
            branch: entity_ref(
                self.filial_id.as_ref(),
                self.filial.as_ref(),
                self.filial_nome.as_ref(),
                self.filial_detalhes.as_ref(),
            ),
            category: entity_ref(
                self.categoria_id.as_ref(),
                self.categoria.as_ref(),
                self.categoria_nome.as_ref(),
                self.categoria_detalhes.as_ref(),
            ),
            payment_method_name,
            original_amount: amount(self.valor_original.as_ref()),
            discount: amount(self.desconto.as_ref()),
            interest: amount(self.juros.as_ref()),
            penalty: amount(self.multa.as_ref()),
            amount_paid: amount(self.valor_pago.as_ref()),
            issue_date: self.data_emissao.as_ref().and_then(date_from_value),
            due_date,
            payment_date: self.data_pagamento.as_ref().and_then(date_from_value),
            status,
            notes: self.observacoes.filter(|n| !n.trim().is_empty()),
            recurrence,
            id,
        })
    }
}

/// Normalises a page of wire items. Unusable items are dropped and their
/// errors returned for logging.
pub fn normalize_all(items: Vec<PayableRecordDto>) -> (Vec<PayableRecord>, Vec<String>) {
    let mut records = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for item in items {
        match item.into_record() {
            Ok(record) => records.push(record),
            Err(e) => errors.push(e),
        }
    }
    (records, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn parse(value: Value) -> Result<PayableRecord, String> {
        serde_json::from_value::<PayableRecordDto>(value)
            .map_err(|e| e.to_string())?
            .into_record()
    }

    #[test]
    fn test_string_amounts_and_derivations() {
        let rec = parse(json!({
            "id": 10,
            "descricao": "Aluguel",
            "valor_original": "1500.00",
            "desconto": "100.00",
            "juros": 5,
            "multa": "30.5",
            "valor_pago": null,
            "data_vencimento": "2024-05-10",
            "status": "pendente"
        }))
        .unwrap();

        assert_eq!(rec.id.as_str(), "10");
        assert_eq!(rec.final_amount(), 1435.5);
        assert_eq!(rec.remaining_amount(), 1435.5);
        assert_eq!(rec.status, PayableStatus::Pending);
    }

    #[test]
    fn test_foreign_key_fallbacks() {
        let rec = parse(json!({
            "id": "7",
            "fornecedor": 3,
            "fornecedor_nome": "ACME",
            "filial_id": "2",
            "filial": 99,
            "categoria_detalhes": {"id": 5, "nome": "Energia"},
            "forma_pagamento_detalhes": {"id": 1, "nome": "PIX"},
            "data_vencimento": "2024-05-10T00:00:00Z",
            "status": "vencida"
        }))
        .unwrap();

        assert_eq!(rec.supplier.id, Some(EntityId::from("3")));
        assert_eq!(rec.supplier.display_name(), "ACME");
        // explicit *_id wins over the plain field
        assert_eq!(rec.branch.id, Some(EntityId::from("2")));
        assert_eq!(rec.branch.display_name(), "-");
        assert_eq!(rec.category.id, Some(EntityId::from("5")));
        assert_eq!(rec.category.name.as_deref(), Some("Energia"));
        assert_eq!(rec.payment_method_name.as_deref(), Some("PIX"));
        assert_eq!(rec.due_date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
    }

    #[test]
    fn test_recurrence_only_when_flagged() {
        let rec = parse(json!({
            "id": 1,
            "data_vencimento": "2024-01-01",
            "e_recorrente": false,
            "frequencia_recorrencia": "mensal"
        }))
        .unwrap();
        assert_eq!(rec.recurrence, None);

        let rec = parse(json!({
            "id": 1,
            "data_vencimento": "2024-01-01",
            "e_recorrente": true,
            "frequencia_recorrencia": "mensal"
        }))
        .unwrap();
        assert_eq!(rec.recurrence, Some(RecurrenceFrequency::Mensal));
    }

    #[test]
    fn test_normalize_all_skips_bad_items() {
        let items: Vec<PayableRecordDto> = serde_json::from_value(json!([
            {"id": 1, "data_vencimento": "2024-01-01"},
            {"id": 2},
            {"id": 3, "data_vencimento": "2024-01-03", "status": "paga"}
        ]))
        .unwrap();
        let (records, errors) = normalize_all(items);
        assert_eq!(records.len(), 2);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Record 2"));
    }

    #[test]
    fn test_rejects_unusable_records() {
        assert!(parse(json!({"descricao": "x", "data_vencimento": "2024-01-01"})).is_err());
        assert!(parse(json!({"id": 1, "data_vencimento": "01/01/2024"})).is_err());
        assert!(parse(json!({"id": 1, "data_vencimento": "2024-01-01", "status": "x"})).is_err());
    }
}
