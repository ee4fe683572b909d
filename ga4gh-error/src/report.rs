//! Machine-readable view of the kind registry

use crate::{code, ErrorKind, MessageSource, RegistryError, StatusClass, ALL_KINDS, ROOT_MESSAGE};
use serde::{Deserialize, Serialize};

/// One registered kind, as published to client implementers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub name: String,
    pub error_code: u32,
    pub status_class: StatusClass,
    pub http_status: u16,
    pub parent: Option<String>,
    pub default_message: String,
}

impl From<ErrorKind> for RegistryEntry {
    fn from(kind: ErrorKind) -> Self {
        Self {
            name: kind.name().to_string(),
            error_code: kind.code(),
            status_class: kind.status_class(),
            http_status: kind.status_class().http_status().as_u16(),
            parent: kind.parent().map(|parent| parent.name().to_string()),
            default_message: kind.default_message().to_string(),
        }
    }
}

/// Every registered kind, in registry order
pub fn registry_entries() -> Vec<RegistryEntry> {
    ALL_KINDS.iter().copied().map(RegistryEntry::from).collect()
}

/// Defects found by [`self_check`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Defect {
    Collision(RegistryError),
    RootMessage(ErrorKind),
    RootStatus(ErrorKind),
}

impl std::fmt::Display for Defect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Defect::Collision(err) => write!(f, "{}", err),
            Defect::RootMessage(kind) => write!(f, "{} has no message of its own", kind),
            Defect::RootStatus(kind) => write!(f, "{} has no status class of its own", kind),
        }
    }
}

/// Walk the registry and report every definition-time defect found.
///
/// An empty result means the registry is safe to publish.
pub fn self_check() -> Vec<Defect> {
    let mut defects = Vec::new();

    if let Err(err) = code::validate_registry() {
        defects.push(Defect::Collision(err));
    }

    for kind in ALL_KINDS.iter().copied() {
        if kind.message_source() != MessageSource::Caller
            && kind.default_message() == ROOT_MESSAGE
        {
            defects.push(Defect::RootMessage(kind));
        }
        if !kind.defines_status_class() {
            defects.push(Defect::RootStatus(kind));
        }
    }

    defects
}
