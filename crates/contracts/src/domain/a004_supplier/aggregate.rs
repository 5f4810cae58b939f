use crate::domain::common::{EntityId, LookupOption};
use serde::{Deserialize, Serialize};

/// Fornecedor (supplier)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: EntityId,
    pub nome: String,
    #[serde(default)]
    pub nome_fantasia: Option<String>,
    #[serde(default)]
    pub cpf_cnpj: Option<String>,
}

impl From<Supplier> for LookupOption {
    fn from(supplier: Supplier) -> Self {
        LookupOption::new(supplier.id, supplier.nome)
    }
}
