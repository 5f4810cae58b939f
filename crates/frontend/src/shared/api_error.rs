use serde_json::Value;
use thiserror::Error;

/// Failure at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Falha de comunicação com o servidor: {0}")]
    Network(String),
    #[error("Sessão expirada. Faça login novamente.")]
    Unauthorized,
    #[error("{detail}")]
    Http { status: u16, detail: String },
    #[error("Resposta inesperada do servidor: {0}")]
    Decode(String),
    #[error("Armazenamento do navegador indisponível: {0}")]
    Storage(String),
}

impl ApiError {
    /// Builds an error from a non-2xx response, extracting the DRF message.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| detail_from_body(&v))
            .unwrap_or_else(|| format!("Erro {} ao processar a requisição", status));
        ApiError::Http { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

/// `{"detail": ..}`, `{"error": ..}`, `{"non_field_errors": [..]}` or the
/// first field error of a validation response.
fn detail_from_body(body: &Value) -> Option<String> {
    let first_text = |v: &Value| -> Option<String> {
        match v {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items.iter().find_map(|i| i.as_str().map(String::from)),
            _ => None,
        }
    };

    let obj = body.as_object()?;
    for key in ["detail", "error", "non_field_errors"] {
        if let Some(text) = obj.get(key).and_then(first_text) {
            return Some(text);
        }
    }
    obj.iter()
        .find_map(|(field, v)| first_text(v).map(|msg| format!("{}: {}", field, msg)))
}
