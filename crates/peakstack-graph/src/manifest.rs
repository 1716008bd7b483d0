//! Synthesized manifest envelope
//!
//! The manifest is the JSON artifact handed to the provisioning engine: a
//! versioned envelope around the declared resources, in declaration order.
//! Engines should reject versions they do not understand instead of guessing.

use crate::error::{GraphError, Result};
use crate::graph::ResourceGraph;
use crate::resource::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: u32 = 1;

/// Versioned, serializable form of a declared resource graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub version: u32,

    /// When this manifest was synthesized
    pub generated_at: DateTime<Utc>,

    /// Target region for every resource in the manifest
    pub region: String,

    /// Declared resources, in declaration order
    pub resources: Vec<Resource>,
}

impl Manifest {
    pub fn new(region: impl Into<String>, graph: &ResourceGraph) -> Self {
        Self {
            version: MANIFEST_VERSION,
            generated_at: Utc::now(),
            region: region.into(),
            resources: graph.iter().cloned().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a manifest, rejecting unknown format versions
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(GraphError::ManifestVersion {
                found: manifest.version,
                expected: MANIFEST_VERSION,
            });
        }
        Ok(manifest)
    }

    /// Rebuild the resource graph, revalidating ids and references
    pub fn into_graph(self) -> Result<ResourceGraph> {
        ResourceGraph::from_resources(self.resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Resource, ResourceKind};
    use serde_json::json;

    fn sample_graph() -> ResourceGraph {
        let mut graph = ResourceGraph::new();
        let vpc = graph
            .insert(
                Resource::new(ResourceKind::Network, "vpc")
                    .with_attributes(json!({"cidr": "10.0.0.0/16", "nat_gateways": 0})),
            )
            .unwrap();
        graph
            .insert(
                Resource::new(ResourceKind::FirewallPolicy, "security-group").with_reference(vpc),
            )
            .unwrap();
        graph
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let graph = sample_graph();
        let manifest = Manifest::new("us-east-2", &graph);
        assert_eq!(manifest.version, MANIFEST_VERSION);

        let json = manifest.to_json_pretty().unwrap();
        let parsed = Manifest::from_json(&json).unwrap();
        assert_eq!(parsed.region, "us-east-2");
        assert_eq!(parsed.into_graph().unwrap(), graph);
    }

    #[test]
    fn manifest_rejects_unknown_version() {
        let graph = sample_graph();
        let mut manifest = Manifest::new("us-east-2", &graph);
        manifest.version = MANIFEST_VERSION + 1;
        let json = manifest.to_json().unwrap();

        assert!(matches!(
            Manifest::from_json(&json).unwrap_err(),
            GraphError::ManifestVersion { found, expected }
                if found == MANIFEST_VERSION + 1 && expected == MANIFEST_VERSION
        ));
    }
}
