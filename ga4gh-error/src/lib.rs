//! # ga4gh-error
//!
//! Error taxonomy and wire error codes for the GA4GH reference server.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., BadPageSize, VariantSetNotFound)
//! - **StatusClass**: Decide how the transport surfaces it (400, 404, ..., 501)
//! - **Error code**: CRC-32 of the kind's name, stable across builds and languages
//! - **ErrorPayload**: `{errorCode, message}`, the only thing a client ever sees
//!
//! ## Usage
//!
//! ```rust
//! use ga4gh_error::{classify, Error, ErrorKind};
//!
//! fn lookup(variant_set_id: &str) -> Result<(), Error> {
//!     Err(Error::variant_set_not_found(variant_set_id))
//! }
//!
//! let err = classify(lookup("vs1").unwrap_err());
//! let (status, payload) = err.into_parts();
//!
//! assert_eq!(status.as_u16(), 404);
//! assert_eq!(payload.kind(), Ok(ErrorKind::VariantSetNotFound));
//! ```
//!
//! ## Principles
//!
//! - Every failure reaching a client is a registered kind
//! - Failures outside the registry become `ServerError` and lose their text
//! - A kind's name never changes once released: clients decode by code

mod backend;
mod code;
mod error;
mod fallback;
mod kind;
mod payload;
mod report;
mod status;

pub use backend::BackendError;
pub use code::{code_of, kind_table, registry, resolve, validate_registry, CodeTable, RegistryError};
pub use error::{ConstructionError, Error};
pub use fallback::{classify, to_internal_error};
pub use kind::{ErrorKind, MessageSource, ALL_KINDS, ROOT_MESSAGE, ROOT_STATUS_CLASS};
pub use payload::{DecodeError, ErrorPayload};
pub use report::{registry_entries, self_check, Defect, RegistryEntry};
pub use status::StatusClass;

/// Result type alias using the GA4GH Error
pub type Result<T> = std::result::Result<T, Error>;
