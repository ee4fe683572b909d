//! Failures raised by data backends
//!
//! Backends report what went wrong in their own terms; the request layer
//! turns each into the registered kind of the same name before it goes on
//! the wire. The mapping is an exhaustive match, so a variant added here
//! without a registered counterpart does not compile.

use crate::{Error, ErrorKind};
use thiserror::Error as ThisError;

/// Failures a backend can raise while answering a search or lookup
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("callSet '{call_set_id}' not in variantSet '{variant_set_id}'")]
    CallSetNotInVariantSet {
        call_set_id: String,
        variant_set_id: String,
    },

    #[error("variant set '{variant_set_id}' not found")]
    VariantSetNotFound { variant_set_id: String },

    #[error("read group '{read_group_id}' not found")]
    ReadGroupNotFound { read_group_id: String },

    #[error("object not found")]
    ObjectNotFound,

    #[error("invalid page token '{page_token}'")]
    BadPageToken { page_token: String },

    #[error("invalid page size '{page_size}'")]
    BadPageSize { page_size: String },
}

impl BackendError {
    /// The registered kind this failure is reported as
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::CallSetNotInVariantSet { .. } => ErrorKind::CallSetNotInVariantSet,
            BackendError::VariantSetNotFound { .. } => ErrorKind::VariantSetNotFound,
            BackendError::ReadGroupNotFound { .. } => ErrorKind::ReadGroupNotFound,
            BackendError::ObjectNotFound => ErrorKind::ObjectNotFound,
            BackendError::BadPageToken { .. } => ErrorKind::BadPageToken,
            BackendError::BadPageSize { .. } => ErrorKind::BadPageSize,
        }
    }
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::CallSetNotInVariantSet {
                call_set_id,
                variant_set_id,
            } => Error::call_set_not_in_variant_set(call_set_id, variant_set_id),
            BackendError::VariantSetNotFound { variant_set_id } => {
                Error::variant_set_not_found(variant_set_id)
            }
            BackendError::ReadGroupNotFound { read_group_id } => {
                Error::read_group_not_found(read_group_id)
            }
            BackendError::ObjectNotFound => Error::object_not_found(),
            BackendError::BadPageToken { page_token } => Error::bad_page_token(page_token),
            BackendError::BadPageSize { page_size } => Error::bad_page_size(page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<BackendError> {
        vec![
            BackendError::CallSetNotInVariantSet {
                call_set_id: "csId".to_string(),
                variant_set_id: "vsId".to_string(),
            },
            BackendError::VariantSetNotFound {
                variant_set_id: "vs1".to_string(),
            },
            BackendError::ReadGroupNotFound {
                read_group_id: "rg1".to_string(),
            },
            BackendError::ObjectNotFound,
            BackendError::BadPageToken {
                page_token: "1:x".to_string(),
            },
            BackendError::BadPageSize {
                page_size: "-1".to_string(),
            },
        ]
    }

    #[test]
    fn test_every_backend_error_maps_to_its_kind() {
        for backend in samples() {
            let expected = backend.kind();
            let err = Error::from(backend);
            assert_eq!(err.kind(), expected);
        }
    }

    #[test]
    fn test_mapped_kind_keeps_the_name() {
        for backend in samples() {
            let variant = format!("{:?}", backend);
            let variant = variant
                .split(|c: char| !c.is_alphanumeric())
                .next()
                .unwrap_or_default();
            assert!(
                backend.kind().name().starts_with(variant),
                "{variant} maps to {}",
                backend.kind()
            );
        }
    }

    #[test]
    fn test_call_set_not_in_variant_set_is_not_found() {
        let err = Error::from(BackendError::CallSetNotInVariantSet {
            call_set_id: "csId".to_string(),
            variant_set_id: "vsId".to_string(),
        });
        assert_eq!(err.http_status().as_u16(), 404);
        assert_eq!(err.message(), "callSet 'csId' not in variantSet 'vsId'");
    }

    #[test]
    fn test_bad_page_size_message() {
        let err = Error::from(BackendError::BadPageSize {
            page_size: "-1".to_string(),
        });
        assert_eq!(err.message(), "Request page size '-1' is invalid");
    }
}
