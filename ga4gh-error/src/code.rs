//! Numeric error codes and the code → kind resolver
//!
//! A kind's code is the CRC-32 (zlib polynomial) of its name's UTF-8 bytes.
//! Clients built independently of this crate recompute the same numbers, so
//! the derivation must stay bit-exact.

use crate::{ErrorKind, ALL_KINDS};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Errors raised while building or querying a code table
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("error code {code} is not assigned to any kind")]
    UnknownCode { code: u32 },

    #[error("kinds '{first}' and '{second}' share error code {code}")]
    CodeCollision {
        code: u32,
        first: String,
        second: String,
    },
}

/// Derives the wire code for a kind name
pub fn code_of(name: &str) -> u32 {
    crc32fast::hash(name.as_bytes())
}

/// A collision-checked map from code to registered entry.
///
/// Built once from a list of `(name, entry)` pairs. Two pairs whose names
/// hash to the same code, including the same name given twice, make the
/// build fail: that is a definition-time defect, never a runtime condition.
#[derive(Debug, Clone)]
pub struct CodeTable<K> {
    entries: HashMap<u32, (&'static str, K)>,
}

impl<K: Copy> CodeTable<K> {
    /// Build the table, rejecting the first code collision found
    pub fn build(
        entries: impl IntoIterator<Item = (&'static str, K)>,
    ) -> Result<Self, RegistryError> {
        let mut table = HashMap::new();

        for (name, entry) in entries {
            let code = code_of(name);
            if let Some((existing, _)) = table.insert(code, (name, entry)) {
                return Err(RegistryError::CodeCollision {
                    code,
                    first: existing.to_string(),
                    second: name.to_string(),
                });
            }
        }

        Ok(Self { entries: table })
    }

    /// Reverse lookup of a code
    pub fn resolve(&self, code: u32) -> Result<K, RegistryError> {
        self.entries
            .get(&code)
            .map(|(_, entry)| *entry)
            .ok_or(RegistryError::UnknownCode { code })
    }

    /// Name registered under a code
    pub fn name_of(&self, code: u32) -> Option<&'static str> {
        self.entries.get(&code).map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the code table for a list of kinds
pub fn kind_table(kinds: &[ErrorKind]) -> Result<CodeTable<ErrorKind>, RegistryError> {
    CodeTable::build(kinds.iter().map(|kind| (kind.name(), *kind)))
}

static REGISTRY: LazyLock<CodeTable<ErrorKind>> = LazyLock::new(|| {
    let table = kind_table(ALL_KINDS)
        .unwrap_or_else(|err| panic!("error kind registry is inconsistent: {err}"));
    tracing::debug!(kinds = table.len(), "error code registry built");
    table
});

/// The process-wide code table over every registered kind.
///
/// # Panics
/// On first use, if two registered kinds share a code.
pub fn registry() -> &'static CodeTable<ErrorKind> {
    &REGISTRY
}

/// Resolves a code received from a peer back to its kind.
///
/// An unknown code means the peer is running an incompatible build or the
/// payload is corrupt.
pub fn resolve(code: u32) -> Result<ErrorKind, RegistryError> {
    registry().resolve(code)
}

/// Runs the registry self-check without panicking
pub fn validate_registry() -> Result<(), RegistryError> {
    kind_table(ALL_KINDS).map(|_| ())
}
