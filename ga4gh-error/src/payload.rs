//! Wire representation of a raised error

use crate::{code, Error, ErrorKind, RegistryError};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// The only thing an external client ever sees of a failure.
///
/// ```json
/// { "errorCode": 2639844098, "message": "Request page size '-1' is invalid" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(rename = "errorCode")]
    pub error_code: u32,
    pub message: String,
}

/// Failure to turn a received body back into a registered kind
#[derive(Debug, ThisError)]
pub enum DecodeError {
    #[error("malformed error payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ErrorPayload {
    pub fn new(error_code: u32, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
        }
    }

    /// Resolve the kind that produced this payload
    pub fn kind(&self) -> Result<ErrorKind, RegistryError> {
        code::resolve(self.error_code)
    }

    /// Parse a response body and resolve its kind
    pub fn decode(body: &str) -> Result<(ErrorKind, ErrorPayload), DecodeError> {
        let payload: ErrorPayload = serde_json::from_str(body)?;
        let kind = payload.kind()?;
        Ok((kind, payload))
    }

    /// Whether a transport status observed alongside this payload agrees
    /// with the status class of its kind. Unknown codes never agree.
    pub fn matches_status(&self, status: StatusCode) -> bool {
        self.kind()
            .map(|kind| kind.status_class().http_status() == status)
            .unwrap_or(false)
    }
}

impl From<&Error> for ErrorPayload {
    fn from(err: &Error) -> Self {
        err.to_payload()
    }
}

impl From<Error> for ErrorPayload {
    fn from(err: Error) -> Self {
        err.into_parts().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let payload = ErrorPayload::from(Error::bad_page_size("-1"));
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "errorCode": 2639844098u32,
                "message": "Request page size '-1' is invalid",
            })
        );
    }

    #[test]
    fn test_decode() {
        let body = r#"{"errorCode": 1524712338, "message": "VariantSet 'vs1' was not found"}"#;
        let (kind, payload) = ErrorPayload::decode(body).unwrap();

        assert_eq!(kind, ErrorKind::VariantSetNotFound);
        assert!(payload.message.contains("vs1"));
        assert!(payload.matches_status(StatusCode::NOT_FOUND));
        assert!(!payload.matches_status(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_decode_unknown_code() {
        let body = r#"{"errorCode": 7, "message": "?"}"#;
        let err = ErrorPayload::decode(body).unwrap_err();

        assert!(matches!(
            err,
            DecodeError::Registry(RegistryError::UnknownCode { code: 7 })
        ));
        assert_eq!(err.to_string(), "error code 7 is not assigned to any kind");
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(
            ErrorPayload::decode("<html>404</html>"),
            Err(DecodeError::Json(_))
        ));
        // Codes are unsigned 32-bit on the wire.
        assert!(matches!(
            ErrorPayload::decode(r#"{"errorCode": -1, "message": ""}"#),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn test_unknown_code_never_matches_status() {
        let payload = ErrorPayload::new(7, "?");
        assert!(!payload.matches_status(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
