//! Isolated network declaration

use peakstack_graph::{GraphSink, Resource, ResourceId, ResourceKind, Result};
use serde::Serialize;

/// Desired state of the isolated network
///
/// Only the address block and the NAT gateway count are declared. The
/// provisioning engine derives the standard public/private subnet layout from
/// the block and the availability-zone count, and it is also the place where
/// a malformed or too-small CIDR surfaces as an error.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSpec {
    #[serde(skip)]
    name: String,

    cidr: String,

    /// 0 means private subnets get no outbound internet at all
    nat_gateways: u32,
}

impl NetworkSpec {
    pub fn new(name: impl Into<String>, cidr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cidr: cidr.into(),
            nat_gateways: 0,
        }
    }

    pub fn nat_gateways(mut self, count: u32) -> Self {
        self.nat_gateways = count;
        self
    }

    /// Emit the network into the graph
    pub fn declare(self, sink: &mut dyn GraphSink) -> Result<NetworkHandle> {
        let id = sink.accept(
            Resource::new(ResourceKind::Network, &self.name)
                .with_attributes(serde_json::to_value(&self)?),
        )?;
        Ok(NetworkHandle { id })
    }
}

/// Handle to a declared network
#[derive(Debug, Clone)]
pub struct NetworkHandle {
    id: ResourceId,
}

impl NetworkHandle {
    pub fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peakstack_graph::ResourceGraph;
    use serde_json::json;

    #[test]
    fn declares_cidr_and_nat_count() {
        let mut graph = ResourceGraph::new();
        let handle = NetworkSpec::new("vpc", "10.0.0.0/16")
            .declare(&mut graph)
            .unwrap();

        let resource = graph.get(handle.id()).unwrap();
        assert_eq!(
            resource.attributes,
            json!({"cidr": "10.0.0.0/16", "nat_gateways": 0})
        );
        assert!(resource.references.is_empty());
    }

    #[test]
    fn nat_gateways_builder_overrides_default() {
        let mut graph = ResourceGraph::new();
        let handle = NetworkSpec::new("vpc", "10.1.0.0/16")
            .nat_gateways(2)
            .declare(&mut graph)
            .unwrap();

        let resource = graph.get(handle.id()).unwrap();
        assert_eq!(resource.attributes["nat_gateways"], json!(2));
    }
}
