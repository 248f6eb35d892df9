/// Error types for calls to the analysis service
use clima_core::analysis::REJECTED_FALLBACK;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, CORS)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `body` is the response text, or the status reason
    /// when the body was empty.
    #[error("Error {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered `ok: false`
    #[error("{}", .message.as_deref().unwrap_or(REJECTED_FALLBACK))]
    Rejected { message: Option<String> },

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(status: StatusCode, body: &str) -> Self {
        let body = body.trim();
        let body = if body.is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            body.to_string()
        };
        ApiError::Status {
            status: status.as_u16(),
            body,
        }
    }

    pub fn rejected(message: Option<String>) -> Self {
        ApiError::Rejected {
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Text shown to the user. Status and rejection errors carry their own
    /// message; anything else shows `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { .. } | ApiError::Rejected { .. } => self.to_string(),
            ApiError::Transport(_) | ApiError::Decode(_) => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_body_or_reason() {
        let err = ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "Error 500: Internal Server Error");

        let err = ApiError::status(StatusCode::BAD_REQUEST, "latitude out of range\n");
        assert_eq!(err.to_string(), "Error 400: latitude out of range");
        assert_eq!(err.user_message("x"), "Error 400: latitude out of range");
    }

    #[test]
    fn test_rejected_message() {
        assert_eq!(
            ApiError::rejected(Some("Fuera de cobertura".into())).to_string(),
            "Fuera de cobertura"
        );
        assert_eq!(ApiError::rejected(None).to_string(), "Solicitud rechazada");
        assert_eq!(
            ApiError::rejected(Some("  ".into())).to_string(),
            "Solicitud rechazada"
        );
    }

    #[test]
    fn test_decode_falls_back() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(
            err.user_message("Error al conectar con el servicio"),
            "Error al conectar con el servicio"
        );
    }
}
