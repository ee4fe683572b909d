//! Error kinds raised while serving GA4GH requests

use crate::StatusClass;
use std::fmt;

/// Status class of the abstract root every kind descends from.
pub const ROOT_STATUS_CLASS: StatusClass = StatusClass::InternalError;

/// Message of the abstract root. No registered kind may ever surface it,
/// so seeing it in a response means a kind forgot to define its message.
pub const ROOT_MESSAGE: &str = "Error code not set; this is a bug";

/// The kind of error that occurred.
///
/// Every variant is a concrete, raisable kind. Its [`name`](ErrorKind::name)
/// is part of the wire format: the numeric error code is derived from it, so
/// a name must never change once released.
///
/// Kinds form a classification tree through [`parent`](ErrorKind::parent).
/// Top-level kinds (`BadRequest`, `NotFound`, `ServerError`, ...) define the
/// status class and default message that their descendants inherit.
///
/// New variants must be appended to [`ALL_KINDS`] in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // Bad request (400)
    // =========================================================================
    /// A request that we don't like was sent to the server
    BadRequest,

    /// The requested page size is not a usable number
    BadPageSize,

    /// The page token does not decode to a position in the result set
    BadPageToken,

    /// The request body is not JSON
    InvalidJson,

    /// The request body is JSON but does not match the request schema
    RequestValidationFailure,

    /// A reads search named both a reference id and a reference name
    BadReadsSearchRequestBothRefs,

    // =========================================================================
    // Not found (404)
    // =========================================================================
    /// Some resource was not found
    NotFound,

    /// No route matches the request path
    PathNotFound,

    /// Generic object lookup failure
    ObjectNotFound,

    /// Variant set id is unknown
    VariantSetNotFound,

    /// Read group id is unknown
    ReadGroupNotFound,

    /// Dataset id is unknown
    DatasetNotFound,

    /// Reference set id is unknown
    ReferenceSetNotFound,

    /// Reference id is unknown within its reference set
    ReferenceNotFound,

    /// Call set id is unknown within its variant set
    CallSetNotFound,

    /// The versioned API prefix names a version this server does not serve
    VersionNotSupported,

    /// A call set was requested under a variant set it does not belong to
    CallSetNotInVariantSet,

    // =========================================================================
    // Transport-level rejections
    // =========================================================================
    /// The request content type is not JSON
    UnsupportedMediaType,

    /// The route exists but not for this HTTP method
    MethodNotAllowed,

    // =========================================================================
    // Server faults (500/501)
    // =========================================================================
    /// Part of the API has not been implemented
    NotImplemented,

    /// A bug occurred in the server
    ServerError,

    /// The server produced a response that does not match its own schema
    ResponseValidationFailure,
}

/// Every registered kind, in declaration order.
///
/// This list is the registry: code resolution and every consistency check
/// walk it, so a kind missing here cannot be decoded by clients.
pub const ALL_KINDS: &[ErrorKind] = &[
    ErrorKind::BadRequest,
    ErrorKind::BadPageSize,
    ErrorKind::BadPageToken,
    ErrorKind::InvalidJson,
    ErrorKind::RequestValidationFailure,
    ErrorKind::BadReadsSearchRequestBothRefs,
    ErrorKind::NotFound,
    ErrorKind::PathNotFound,
    ErrorKind::ObjectNotFound,
    ErrorKind::VariantSetNotFound,
    ErrorKind::ReadGroupNotFound,
    ErrorKind::DatasetNotFound,
    ErrorKind::ReferenceSetNotFound,
    ErrorKind::ReferenceNotFound,
    ErrorKind::CallSetNotFound,
    ErrorKind::VersionNotSupported,
    ErrorKind::CallSetNotInVariantSet,
    ErrorKind::UnsupportedMediaType,
    ErrorKind::MethodNotAllowed,
    ErrorKind::NotImplemented,
    ErrorKind::ServerError,
    ErrorKind::ResponseValidationFailure,
];

/// Where an instance of a kind gets its message from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    /// A fixed message, own or inherited
    Static,
    /// Built from constructor arguments such as an identifier
    Context,
    /// Supplied verbatim by the caller; there is no sensible default
    Caller,
}

impl ErrorKind {
    /// Returns the wire name of the kind. The error code is derived from it.
    pub fn name(&self) -> &'static str {
        match self {
            // Bad request
            ErrorKind::BadRequest => "BadRequestException",
            ErrorKind::BadPageSize => "BadPageSizeException",
            ErrorKind::BadPageToken => "BadPageTokenException",
            ErrorKind::InvalidJson => "InvalidJsonException",
            ErrorKind::RequestValidationFailure => "RequestValidationFailureException",
            ErrorKind::BadReadsSearchRequestBothRefs => "BadReadsSearchRequestBothRefs",

            // Not found
            ErrorKind::NotFound => "NotFoundException",
            ErrorKind::PathNotFound => "PathNotFoundException",
            ErrorKind::ObjectNotFound => "ObjectNotFoundException",
            ErrorKind::VariantSetNotFound => "VariantSetNotFound",
            ErrorKind::ReadGroupNotFound => "ReadGroupNotFoundException",
            ErrorKind::DatasetNotFound => "DatasetNotFoundException",
            ErrorKind::ReferenceSetNotFound => "ReferenceSetNotFoundException",
            ErrorKind::ReferenceNotFound => "ReferenceNotFoundException",
            ErrorKind::CallSetNotFound => "CallSetNotFoundException",
            ErrorKind::VersionNotSupported => "VersionNotSupportedException",
            ErrorKind::CallSetNotInVariantSet => "CallSetNotInVariantSetException",

            // Transport
            ErrorKind::UnsupportedMediaType => "UnsupportedMediaTypeException",
            ErrorKind::MethodNotAllowed => "MethodNotAllowedException",

            // Server
            ErrorKind::NotImplemented => "NotImplementedException",
            ErrorKind::ServerError => "ServerError",
            ErrorKind::ResponseValidationFailure => "ResponseValidationFailureException",
        }
    }

    /// Looks a kind up by its wire name
    pub fn from_name(name: &str) -> Option<ErrorKind> {
        ALL_KINDS.iter().copied().find(|kind| kind.name() == name)
    }

    /// The numeric wire code, CRC-32 of [`ErrorKind::name`]
    pub fn code(&self) -> u32 {
        crate::code::code_of(self.name())
    }

    /// The direct ancestor. `None` means the parent is the abstract root.
    pub fn parent(&self) -> Option<ErrorKind> {
        match self {
            ErrorKind::BadPageSize
            | ErrorKind::BadPageToken
            | ErrorKind::InvalidJson
            | ErrorKind::RequestValidationFailure
            | ErrorKind::BadReadsSearchRequestBothRefs => Some(ErrorKind::BadRequest),

            ErrorKind::PathNotFound
            | ErrorKind::ObjectNotFound
            | ErrorKind::VariantSetNotFound
            | ErrorKind::VersionNotSupported
            | ErrorKind::CallSetNotInVariantSet => Some(ErrorKind::NotFound),

            ErrorKind::ReadGroupNotFound
            | ErrorKind::DatasetNotFound
            | ErrorKind::ReferenceSetNotFound
            | ErrorKind::ReferenceNotFound
            | ErrorKind::CallSetNotFound => Some(ErrorKind::ObjectNotFound),

            ErrorKind::ResponseValidationFailure => Some(ErrorKind::ServerError),

            ErrorKind::BadRequest
            | ErrorKind::NotFound
            | ErrorKind::UnsupportedMediaType
            | ErrorKind::MethodNotAllowed
            | ErrorKind::NotImplemented
            | ErrorKind::ServerError => None,
        }
    }

    /// Iterates from this kind up to its top-level category, inclusive
    pub fn ancestry(&self) -> impl Iterator<Item = ErrorKind> {
        std::iter::successors(Some(*self), |kind| kind.parent())
    }

    /// The top-level kind this one is classified under
    pub fn category(&self) -> ErrorKind {
        self.ancestry().last().unwrap_or(*self)
    }

    /// Whether `ancestor` is this kind or one of its ancestors
    pub fn is_a(&self, ancestor: ErrorKind) -> bool {
        self.ancestry().any(|kind| kind == ancestor)
    }

    fn own_status_class(&self) -> Option<StatusClass> {
        match self {
            ErrorKind::BadRequest => Some(StatusClass::BadRequest),
            ErrorKind::NotFound => Some(StatusClass::NotFound),
            ErrorKind::UnsupportedMediaType => Some(StatusClass::UnsupportedMedia),
            ErrorKind::MethodNotAllowed => Some(StatusClass::MethodNotAllowed),
            ErrorKind::NotImplemented => Some(StatusClass::NotImplemented),
            ErrorKind::ServerError => Some(StatusClass::InternalError),
            _ => None,
        }
    }

    /// Whether some kind in the ancestry sets a status class, rather than
    /// falling through to the root's
    pub(crate) fn defines_status_class(&self) -> bool {
        self.ancestry().any(|kind| kind.own_status_class().is_some())
    }

    /// Status class, inherited from the nearest ancestor that defines one
    pub fn status_class(&self) -> StatusClass {
        self.ancestry()
            .find_map(|kind| kind.own_status_class())
            .unwrap_or(ROOT_STATUS_CLASS)
    }

    fn own_message(&self) -> Option<&'static str> {
        match self {
            ErrorKind::BadRequest => Some("Bad request"),
            ErrorKind::BadPageToken => Some("Request page token invalid"),
            ErrorKind::BadReadsSearchRequestBothRefs => {
                Some("only one of referenceId and referenceName can be specified")
            }
            ErrorKind::NotFound => Some("A resource was not found"),
            ErrorKind::PathNotFound => Some("The request path was not found"),
            ErrorKind::ObjectNotFound => Some("The requested object was not found"),
            ErrorKind::VersionNotSupported => Some("API version not supported"),
            ErrorKind::UnsupportedMediaType => Some("Unsupported media type"),
            ErrorKind::MethodNotAllowed => Some("Method not allowed"),
            ErrorKind::ServerError => Some("Internal Server Error"),
            _ => None,
        }
    }

    /// Static message, inherited from the nearest ancestor that defines one.
    ///
    /// Kinds built from context compute their real message at construction;
    /// for those this is only the category fallback.
    pub fn default_message(&self) -> &'static str {
        self.ancestry()
            .find_map(|kind| kind.own_message())
            .unwrap_or(ROOT_MESSAGE)
    }

    /// How instances of this kind obtain their message
    pub fn message_source(&self) -> MessageSource {
        match self {
            ErrorKind::BadPageSize
            | ErrorKind::InvalidJson
            | ErrorKind::RequestValidationFailure
            | ErrorKind::VariantSetNotFound
            | ErrorKind::ReadGroupNotFound
            | ErrorKind::DatasetNotFound
            | ErrorKind::ReferenceSetNotFound
            | ErrorKind::ReferenceNotFound
            | ErrorKind::CallSetNotFound
            | ErrorKind::CallSetNotInVariantSet
            | ErrorKind::ResponseValidationFailure => MessageSource::Context,
            ErrorKind::NotImplemented => MessageSource::Caller,
            _ => MessageSource::Static,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
