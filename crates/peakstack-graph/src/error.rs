//! Graph error types

use crate::resource::ResourceId;
use thiserror::Error;

/// Errors raised while building or inspecting the resource graph
///
/// These are the only failures the declaration layer can produce. Everything
/// that can go wrong against a real cloud API (quota, auth, malformed CIDR,
/// unresolvable image selectors) is reported by the provisioning engine, not
/// here.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Resource already declared: {0}")]
    DuplicateResource(ResourceId),

    #[error("Resource {resource} references {missing}, which has not been declared")]
    UnresolvedReference {
        resource: ResourceId,
        missing: ResourceId,
    },

    #[error("Reference cycle involving {0}")]
    ReferenceCycle(ResourceId),

    #[error("Unsupported manifest version {found} (expected {expected})")]
    ManifestVersion { found: u32, expected: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
