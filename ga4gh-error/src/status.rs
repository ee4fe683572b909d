//! Transport status classes for error kinds

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the transport layer should surface a failure.
///
/// Each class maps to exactly one HTTP status. The first four are client
/// faults: the client can observably fix the request. The last two are
/// server faults: a bug or a missing feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 415
    UnsupportedMedia,
    /// 500
    InternalError,
    /// 501, an internal error that names a missing feature
    NotImplemented,
}

impl StatusClass {
    /// All status classes, in HTTP status order
    pub const ALL: [StatusClass; 6] = [
        StatusClass::BadRequest,
        StatusClass::NotFound,
        StatusClass::MethodNotAllowed,
        StatusClass::UnsupportedMedia,
        StatusClass::InternalError,
        StatusClass::NotImplemented,
    ];

    /// Returns the status class as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::BadRequest => "BadRequest",
            StatusClass::NotFound => "NotFound",
            StatusClass::MethodNotAllowed => "MethodNotAllowed",
            StatusClass::UnsupportedMedia => "UnsupportedMedia",
            StatusClass::InternalError => "InternalError",
            StatusClass::NotImplemented => "NotImplemented",
        }
    }

    /// The HTTP status a response carrying this class must use
    pub fn http_status(&self) -> StatusCode {
        match self {
            StatusClass::BadRequest => StatusCode::BAD_REQUEST,
            StatusClass::NotFound => StatusCode::NOT_FOUND,
            StatusClass::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            StatusClass::UnsupportedMedia => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            StatusClass::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            StatusClass::NotImplemented => StatusCode::NOT_IMPLEMENTED,
        }
    }

    /// Reverse of [`StatusClass::http_status`]. Statuses outside the
    /// taxonomy return `None`.
    pub fn from_http_status(status: StatusCode) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.http_status() == status)
    }

    /// The client sent something it can fix
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            StatusClass::BadRequest
                | StatusClass::NotFound
                | StatusClass::MethodNotAllowed
                | StatusClass::UnsupportedMedia
        )
    }

    /// The server has a bug or lacks a feature
    pub fn is_server_fault(&self) -> bool {
        !self.is_client_fault()
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(StatusClass::BadRequest.http_status().as_u16(), 400);
        assert_eq!(StatusClass::NotFound.http_status().as_u16(), 404);
        assert_eq!(StatusClass::MethodNotAllowed.http_status().as_u16(), 405);
        assert_eq!(StatusClass::UnsupportedMedia.http_status().as_u16(), 415);
        assert_eq!(StatusClass::InternalError.http_status().as_u16(), 500);
        assert_eq!(StatusClass::NotImplemented.http_status().as_u16(), 501);
    }

    #[test]
    fn test_from_http_status() {
        for class in StatusClass::ALL {
            assert_eq!(StatusClass::from_http_status(class.http_status()), Some(class));
        }
        assert_eq!(StatusClass::from_http_status(StatusCode::OK), None);
        assert_eq!(StatusClass::from_http_status(StatusCode::BAD_GATEWAY), None);
    }

    #[test]
    fn test_fault_strata() {
        assert!(StatusClass::NotFound.is_client_fault());
        assert!(StatusClass::UnsupportedMedia.is_client_fault());
        assert!(StatusClass::InternalError.is_server_fault());
        assert!(StatusClass::NotImplemented.is_server_fault());
        assert!(!StatusClass::NotImplemented.is_client_fault());
    }

    #[test]
    fn test_status_class_serde() {
        let json = serde_json::to_string(&StatusClass::UnsupportedMedia).unwrap();
        assert_eq!(json, "\"unsupported_media\"");
    }
}
