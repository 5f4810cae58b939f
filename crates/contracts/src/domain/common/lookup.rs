use super::EntityId;
use serde::{Deserialize, Serialize};

/// One entry of a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOption {
    pub value: EntityId,
    pub label: String,
}

impl LookupOption {
    pub fn new(value: EntityId, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

