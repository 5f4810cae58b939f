use crate::domain::common::{EntityId, LookupOption};
use serde::{Deserialize, Serialize};

/// Filial (branch) of the company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: EntityId,
    pub nome: String,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default = "default_true")]
    pub ativa: bool,
}

fn default_true() -> bool {
    true
}

impl From<Branch> for LookupOption {
    fn from(branch: Branch) -> Self {
        LookupOption::new(branch.id, branch.nome)
    }
}
