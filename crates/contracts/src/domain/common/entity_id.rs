use crate::shared::lenient::id_from_value;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of any server-side entity.
///
/// The API mixes integer and string ids; both collapse into one string
/// representation here so that comparisons never depend on the wire type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Empty id".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        id_from_value(&value)
            .map(EntityId)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {}", value)))
    }
}

/// Foreign key plus the display name the list serializer ships alongside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRef {
    pub id: Option<EntityId>,
    pub name: Option<String>,
}

impl EntityRef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_are_equal() {
        let a: EntityId = serde_json::from_str("12").unwrap();
        let b: EntityId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"12\"");
    }

    #[test]
    fn test_from_string_rejects_blank() {
        assert!(EntityId::from_string("  ").is_err());
        assert_eq!(EntityId::from_string(" 5 ").unwrap().as_str(), "5");
    }
}
