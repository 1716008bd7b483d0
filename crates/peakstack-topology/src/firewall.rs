//! Firewall policy declaration

use crate::network::NetworkHandle;
use peakstack_graph::{GraphSink, Resource, ResourceId, ResourceKind, Result};
use serde::Serialize;

/// Transport protocol of an ingress rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

/// Source range an ingress rule accepts traffic from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRange {
    /// Any IPv4 source (0.0.0.0/0)
    AnyIpv4,
    /// A specific CIDR block
    Cidr(String),
}

impl SourceRange {
    pub fn as_cidr(&self) -> &str {
        match self {
            SourceRange::AnyIpv4 => "0.0.0.0/0",
            SourceRange::Cidr(cidr) => cidr,
        }
    }
}

impl std::fmt::Display for SourceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_cidr())
    }
}

impl Serialize for SourceRange {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_cidr())
    }
}

/// A single allow rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngressRule {
    pub protocol: Protocol,
    pub port: u16,
    pub source: SourceRange,
    pub description: String,
}

/// Desired state of the firewall policy attached to a network
///
/// Rules are additive only: the underlying network model is default-deny
/// inbound and allow-all outbound, so there is no deny-rule or rule-removal
/// API here. Duplicate rules are permitted but redundant.
#[derive(Debug, Clone, Serialize)]
pub struct FirewallSpec {
    #[serde(skip)]
    name: String,

    #[serde(skip)]
    network: ResourceId,

    display_name: String,

    rules: Vec<IngressRule>,
}

impl FirewallSpec {
    pub fn new(name: impl Into<String>, network: &NetworkHandle) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            network: network.id().clone(),
            rules: Vec::new(),
        }
    }

    /// Human-readable policy name shown by the provider console
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Append an allow rule for inbound traffic
    pub fn allow_ingress(
        mut self,
        protocol: Protocol,
        port: u16,
        source: SourceRange,
        description: impl Into<String>,
    ) -> Self {
        self.rules.push(IngressRule {
            protocol,
            port,
            source,
            description: description.into(),
        });
        self
    }

    pub fn rules(&self) -> &[IngressRule] {
        &self.rules
    }

    /// Emit the policy into the graph, referencing its owning network
    pub fn declare(self, sink: &mut dyn GraphSink) -> Result<FirewallHandle> {
        let network = self.network.clone();
        let id = sink.accept(
            Resource::new(ResourceKind::FirewallPolicy, &self.name)
                .with_attributes(serde_json::to_value(&self)?)
                .with_reference(network),
        )?;
        Ok(FirewallHandle { id })
    }
}

/// Handle to a declared firewall policy
#[derive(Debug, Clone)]
pub struct FirewallHandle {
    id: ResourceId,
}

impl FirewallHandle {
    pub fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkSpec;
    use peakstack_graph::ResourceGraph;
    use serde_json::json;

    #[test]
    fn rules_append_in_order() {
        let mut graph = ResourceGraph::new();
        let vpc = NetworkSpec::new("vpc", "10.0.0.0/16")
            .declare(&mut graph)
            .unwrap();

        let spec = FirewallSpec::new("security-group", &vpc)
            .allow_ingress(Protocol::Tcp, 22, SourceRange::AnyIpv4, "ssh")
            .allow_ingress(
                Protocol::Tcp,
                5432,
                SourceRange::Cidr("10.0.0.0/16".into()),
                "postgres from inside the vpc",
            );

        let ports: Vec<u16> = spec.rules().iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![22, 5432]);
        assert_eq!(spec.rules()[1].source.as_cidr(), "10.0.0.0/16");
    }

    #[test]
    fn declared_policy_references_its_network() {
        let mut graph = ResourceGraph::new();
        let vpc = NetworkSpec::new("vpc", "10.0.0.0/16")
            .declare(&mut graph)
            .unwrap();
        let sg = FirewallSpec::new("security-group", &vpc)
            .allow_ingress(Protocol::Tcp, 443, SourceRange::AnyIpv4, "https")
            .declare(&mut graph)
            .unwrap();

        let resource = graph.get(sg.id()).unwrap();
        assert_eq!(resource.references, vec![vpc.id().clone()]);
        assert_eq!(
            resource.attributes["rules"],
            json!([{
                "protocol": "tcp",
                "port": 443,
                "source": "0.0.0.0/0",
                "description": "https",
            }])
        );
    }

    #[test]
    fn any_ipv4_renders_as_zero_cidr() {
        assert_eq!(SourceRange::AnyIpv4.to_string(), "0.0.0.0/0");
        assert_eq!(Protocol::Tcp.to_string(), "tcp");
    }
}
