//! The main Error type for the GA4GH server

use crate::{ErrorKind, ErrorPayload, MessageSource, StatusClass};
use http::StatusCode;
use std::fmt;
use thiserror::Error as ThisError;

/// A raised instance of an [`ErrorKind`].
///
/// This error type provides:
/// - `kind`: Which registered kind occurred (and thus its wire code)
/// - `message`: The client-facing message, fixed at construction
/// - `context`: Key-value pairs for server-side debugging, never sent
///
/// Instances are built through the typed constructors, one per kind, so a
/// kind whose message needs context cannot be created without it.
///
/// # Example
///
/// ```rust
/// use ga4gh_error::{Error, ErrorKind, StatusClass};
///
/// let err = Error::bad_page_size("-1");
///
/// assert_eq!(err.kind(), ErrorKind::BadPageSize);
/// assert_eq!(err.status_class(), StatusClass::BadRequest);
/// assert_eq!(err.message(), "Request page size '-1' is invalid");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
}

/// Rejected attempt to build a kind from its static message alone
#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("{kind} needs constructor arguments to build its message")]
    ContextRequired { kind: ErrorKind },

    #[error("{kind} needs a caller-supplied message")]
    MessageRequired { kind: ErrorKind },
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Build an instance of a kind that carries a static message.
    ///
    /// Kinds whose message is computed from context, or supplied by the
    /// caller, are rejected: use their typed constructor instead.
    pub fn from_kind(kind: ErrorKind) -> Result<Self, ConstructionError> {
        match kind.message_source() {
            MessageSource::Static => Ok(Self::new(kind, kind.default_message())),
            MessageSource::Context => Err(ConstructionError::ContextRequired { kind }),
            MessageSource::Caller => Err(ConstructionError::MessageRequired { kind }),
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the client-facing message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the wire code
    pub fn code(&self) -> u32 {
        self.kind.code()
    }

    /// Get the transport status class
    pub fn status_class(&self) -> StatusClass {
        self.kind.status_class()
    }

    /// Get the HTTP status for a response carrying this error
    pub fn http_status(&self) -> StatusCode {
        self.status_class().http_status()
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Add server-side context. It never reaches the wire payload.
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize into the wire payload. Never fails.
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload::new(self.code(), self.message.clone())
    }

    /// Split into the pieces a response needs: status and payload
    pub fn into_parts(self) -> (StatusCode, ErrorPayload) {
        let status = self.http_status();
        let payload = ErrorPayload::new(self.code(), self.message);
        (status, payload)
    }
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({})",
            self.kind,
            self.code(),
            self.status_class()
        )?;

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        write!(f, " => {}", self.message)
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.kind, self.status_class())?;
        writeln!(f)?;
        writeln!(f, "    Code: {}", self.code())?;
        writeln!(f, "    Message: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

// =============================================================================
// Constructors, one per kind
// =============================================================================

impl Error {
    /// Create a BadRequest error
    pub fn bad_request() -> Self {
        Self::new(ErrorKind::BadRequest, ErrorKind::BadRequest.default_message())
    }

    /// Create a BadPageSize error
    pub fn bad_page_size(page_size: impl fmt::Display) -> Self {
        let page_size = page_size.to_string();
        Self::new(
            ErrorKind::BadPageSize,
            format!("Request page size '{}' is invalid", page_size),
        )
        .with_context("page_size", page_size)
    }

    /// Create a BadPageToken error
    pub fn bad_page_token(page_token: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadPageToken, ErrorKind::BadPageToken.default_message())
            .with_context("page_token", page_token)
    }

    /// Create an InvalidJson error
    pub fn invalid_json(json: impl Into<String>) -> Self {
        let json = json.into();
        Self::new(ErrorKind::InvalidJson, format!("Cannot parse JSON: '{}'", json))
    }

    /// Create a RequestValidationFailure error
    pub fn request_validation_failure(json: impl fmt::Display, schema: impl Into<String>) -> Self {
        let schema = schema.into();
        Self::new(
            ErrorKind::RequestValidationFailure,
            format!("Request '{}' is not a valid instance of {}", json, schema),
        )
        .with_context("schema", schema)
    }

    /// Create a BadReadsSearchRequestBothRefs error
    pub fn bad_reads_search_request_both_refs() -> Self {
        Self::new(
            ErrorKind::BadReadsSearchRequestBothRefs,
            ErrorKind::BadReadsSearchRequestBothRefs.default_message(),
        )
    }

    /// Create a NotFound error
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound, ErrorKind::NotFound.default_message())
    }

    /// Create a PathNotFound error
    pub fn path_not_found(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::PathNotFound, ErrorKind::PathNotFound.default_message())
            .with_context("path", path)
    }

    /// Create an ObjectNotFound error
    pub fn object_not_found() -> Self {
        Self::new(ErrorKind::ObjectNotFound, ErrorKind::ObjectNotFound.default_message())
    }

    /// Create a VariantSetNotFound error
    pub fn variant_set_not_found(variant_set_id: impl Into<String>) -> Self {
        let variant_set_id = variant_set_id.into();
        Self::new(
            ErrorKind::VariantSetNotFound,
            format!("The requested VariantSet '{}' was not found", variant_set_id),
        )
        .with_context("variant_set_id", variant_set_id)
    }

    /// Create a ReadGroupNotFound error
    pub fn read_group_not_found(read_group_id: impl Into<String>) -> Self {
        let read_group_id = read_group_id.into();
        Self::new(
            ErrorKind::ReadGroupNotFound,
            format!("readGroupId '{}' not found", read_group_id),
        )
        .with_context("read_group_id", read_group_id)
    }

    /// Create a DatasetNotFound error
    pub fn dataset_not_found(dataset_id: impl Into<String>) -> Self {
        let dataset_id = dataset_id.into();
        Self::new(
            ErrorKind::DatasetNotFound,
            format!("The requested Dataset '{}' was not found", dataset_id),
        )
        .with_context("dataset_id", dataset_id)
    }

    /// Create a ReferenceSetNotFound error
    pub fn reference_set_not_found(reference_set_id: impl Into<String>) -> Self {
        let reference_set_id = reference_set_id.into();
        Self::new(
            ErrorKind::ReferenceSetNotFound,
            format!("The requested ReferenceSet '{}' was not found", reference_set_id),
        )
        .with_context("reference_set_id", reference_set_id)
    }

    /// Create a ReferenceNotFound error
    pub fn reference_not_found(
        reference_id: impl Into<String>,
        reference_set_id: impl Into<String>,
    ) -> Self {
        let reference_id = reference_id.into();
        let reference_set_id = reference_set_id.into();
        Self::new(
            ErrorKind::ReferenceNotFound,
            format!(
                "The requested Reference '{}' was not found in ReferenceSet '{}'",
                reference_id, reference_set_id
            ),
        )
        .with_context("reference_id", reference_id)
        .with_context("reference_set_id", reference_set_id)
    }

    /// Create a CallSetNotFound error
    pub fn call_set_not_found(
        call_set_id: impl Into<String>,
        variant_set_id: impl Into<String>,
    ) -> Self {
        let call_set_id = call_set_id.into();
        let variant_set_id = variant_set_id.into();
        Self::new(
            ErrorKind::CallSetNotFound,
            format!(
                "The requested CallSet '{}' was not found in VariantSet '{}'",
                call_set_id, variant_set_id
            ),
        )
        .with_context("call_set_id", call_set_id)
        .with_context("variant_set_id", variant_set_id)
    }

    /// Create a VersionNotSupported error
    pub fn version_not_supported(version: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::VersionNotSupported,
            ErrorKind::VersionNotSupported.default_message(),
        )
        .with_context("version", version)
    }

    /// Create a CallSetNotInVariantSet error
    pub fn call_set_not_in_variant_set(
        call_set_id: impl Into<String>,
        variant_set_id: impl Into<String>,
    ) -> Self {
        let call_set_id = call_set_id.into();
        let variant_set_id = variant_set_id.into();
        Self::new(
            ErrorKind::CallSetNotInVariantSet,
            format!("callSet '{}' not in variantSet '{}'", call_set_id, variant_set_id),
        )
        .with_context("call_set_id", call_set_id)
        .with_context("variant_set_id", variant_set_id)
    }

    /// Create an UnsupportedMediaType error
    pub fn unsupported_media_type(content_type: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnsupportedMediaType,
            ErrorKind::UnsupportedMediaType.default_message(),
        )
        .with_context("content_type", content_type)
    }

    /// Create a MethodNotAllowed error
    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::MethodNotAllowed,
            ErrorKind::MethodNotAllowed.default_message(),
        )
        .with_context("method", method)
    }

    /// Create a NotImplemented error. The message is sent to the client as is
    /// and must not be blank.
    pub fn not_implemented(message: impl Into<String>) -> Result<Self, ConstructionError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ConstructionError::MessageRequired {
                kind: ErrorKind::NotImplemented,
            });
        }
        Ok(Self::new(ErrorKind::NotImplemented, message))
    }

    /// Create a ServerError. Carries the generic message only.
    pub fn server_error() -> Self {
        Self::new(ErrorKind::ServerError, ErrorKind::ServerError.default_message())
    }

    /// Create a ResponseValidationFailure error
    pub fn response_validation_failure(json: impl fmt::Display, schema: impl Into<String>) -> Self {
        let schema = schema.into();
        Self::new(
            ErrorKind::ResponseValidationFailure,
            format!(
                "Response '{}' is not a valid instance of {}. Please file a bug report.",
                json, schema
            ),
        )
        .with_context("schema", schema)
    }
}
