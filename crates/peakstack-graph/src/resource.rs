//! Resource entries and typed identifiers

use serde::{Deserialize, Serialize};

/// Kind of a declared resource
///
/// One variant per entity the topology can declare. The kebab-case wire form
/// is what ends up in the manifest and in resource keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Isolated virtual network
    Network,
    /// Ingress policy attached to a network
    FirewallPolicy,
    /// Assumable execution role
    Role,
    /// Compute instance
    Instance,
    /// Static public address allocation
    StaticAddress,
    /// Binding between an address and an instance
    AddressAssociation,
    /// Reference to a DNS zone owned elsewhere
    HostedZone,
    /// DNS record inside a hosted zone
    DnsRecord,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Network => "network",
            ResourceKind::FirewallPolicy => "firewall-policy",
            ResourceKind::Role => "role",
            ResourceKind::Instance => "instance",
            ResourceKind::StaticAddress => "static-address",
            ResourceKind::AddressAssociation => "address-association",
            ResourceKind::HostedZone => "hosted-zone",
            ResourceKind::DnsRecord => "dns-record",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed identifier of a declared resource
///
/// The `kind:name` pair is unique within one graph and is the only thing a
/// reference edge carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    pub kind: ResourceKind,
    pub name: String,
}

impl ResourceId {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Full resource key (kind:name)
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind, self.name)
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// A single declared resource
///
/// Immutable once constructed. `attributes` is the entity's desired state as
/// free-form JSON (each topology component serializes its own typed spec into
/// it); `references` is the complete set of hard ordering edges. An engine
/// may assume that a resource id absent from `references` imposes no ordering
/// requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,

    /// Desired-state attributes, serialized by the declaring component
    pub attributes: serde_json::Value,

    /// Every resource this one depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ResourceId>,
}

impl Resource {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(kind, name),
            attributes: serde_json::Value::Null,
            references: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_reference(mut self, target: ResourceId) -> Self {
        self.references.push(target);
        self
    }

    pub fn with_references(mut self, targets: impl IntoIterator<Item = ResourceId>) -> Self {
        self.references.extend(targets);
        self
    }

    /// Whether this resource references `target`
    pub fn references_id(&self, target: &ResourceId) -> bool {
        self.references.iter().any(|r| r == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_key_format() {
        let id = ResourceId::new(ResourceKind::StaticAddress, "peak-backend-ip");
        assert_eq!(id.key(), "static-address:peak-backend-ip");
        assert_eq!(id.to_string(), id.key());
    }

    #[test]
    fn kind_wire_form_matches_display() {
        let wire = serde_json::to_value(ResourceKind::FirewallPolicy).unwrap();
        assert_eq!(wire, json!("firewall-policy"));
        assert_eq!(ResourceKind::FirewallPolicy.to_string(), "firewall-policy");
    }

    #[test]
    fn references_are_ordered_and_queryable() {
        let network = ResourceId::new(ResourceKind::Network, "vpc");
        let role = ResourceId::new(ResourceKind::Role, "backend-runner");
        let resource = Resource::new(ResourceKind::Instance, "peak-backend")
            .with_attributes(json!({"instance_type": "t4g.nano"}))
            .with_reference(network.clone())
            .with_reference(role.clone());

        assert_eq!(resource.references, vec![network.clone(), role]);
        assert!(resource.references_id(&network));
        assert!(!resource.references_id(&ResourceId::new(ResourceKind::Network, "other")));
    }
}
