use crate::domain::common::{EntityId, LookupOption};
use serde::{Deserialize, Serialize};

/// Forma de pagamento
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: EntityId,
    pub nome: String,
}

impl From<PaymentMethod> for LookupOption {
    fn from(method: PaymentMethod) -> Self {
        LookupOption::new(method.id, method.nome)
    }
}
