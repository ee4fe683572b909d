//! Reduction of arbitrary failures to a registered kind
//!
//! Anything the registry does not know about is by definition unanticipated.
//! Its text may describe internals, so it is erased before it can reach a
//! client; only a server-side log event keeps it.

use crate::{BackendError, Error};

/// Convert a failure that is not a registered kind into a `ServerError`.
///
/// The failure's type and message are discarded from the result.
///
/// # Panics (debug only)
/// Panics in debug mode if `failure` already is an [`Error`]: callers are
/// expected to pass registered errors straight to serialization.
pub fn to_internal_error(failure: impl Into<anyhow::Error>) -> Error {
    let failure = failure.into();
    debug_assert!(
        failure.downcast_ref::<Error>().is_none(),
        "registered errors must not go through the fallback converter"
    );

    tracing::warn!(failure = %failure, "unclassified failure reported as ServerError");
    Error::server_error()
}

/// Turn any failure into a registered error.
///
/// A registered [`Error`] passes through unchanged, a [`BackendError`] maps to
/// its same-named kind, and everything else becomes a `ServerError`.
pub fn classify(failure: impl Into<anyhow::Error>) -> Error {
    let failure = failure.into();

    let failure = match failure.downcast::<Error>() {
        Ok(err) => return err,
        Err(failure) => failure,
    };

    match failure.downcast::<BackendError>() {
        Ok(err) => Error::from(err),
        Err(failure) => to_internal_error(failure),
    }
}
