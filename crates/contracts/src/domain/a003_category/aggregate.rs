use crate::domain::common::{EntityId, LookupOption};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Receita,
    Despesa,
}

/// Categoria financeira
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub nome: String,
    #[serde(default)]
    pub tipo: Option<CategoryKind>,
    #[serde(default)]
    pub cor: Option<String>,
}

impl From<Category> for LookupOption {
    fn from(category: Category) -> Self {
        LookupOption::new(category.id, category.nome)
    }
}
