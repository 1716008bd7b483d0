//! Static address allocation and association

use crate::compute::InstanceHandle;
use peakstack_graph::{GraphSink, Resource, ResourceId, ResourceKind, Result};
use serde::Serialize;

/// Address space an allocation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressScope {
    /// Allocated inside the network fabric
    Vpc,
    /// Legacy flat address space
    Classic,
}

/// Desired state of the static public address
///
/// Allocation is declared separately from the binding (see
/// [`AssociationSpec`]) so the engine can keep the allocated address while
/// replacing the instance, which keeps the DNS record stable.
#[derive(Debug, Clone, Serialize)]
pub struct StaticAddressSpec {
    #[serde(skip)]
    name: String,

    #[serde(skip)]
    instance: ResourceId,

    scope: AddressScope,
}

impl StaticAddressSpec {
    pub fn new(name: impl Into<String>, instance: &InstanceHandle) -> Self {
        Self {
            name: name.into(),
            instance: instance.id().clone(),
            scope: AddressScope::Vpc,
        }
    }

    pub fn scope(mut self, scope: AddressScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn declare(self, sink: &mut dyn GraphSink) -> Result<AddressHandle> {
        let instance = self.instance.clone();
        let id = sink.accept(
            Resource::new(ResourceKind::StaticAddress, &self.name)
                .with_attributes(serde_json::to_value(&self)?)
                .with_reference(instance),
        )?;
        Ok(AddressHandle { id })
    }
}

/// Handle to the declared address allocation
#[derive(Debug, Clone)]
pub struct AddressHandle {
    id: ResourceId,
}

impl AddressHandle {
    pub fn id(&self) -> &ResourceId {
        &self.id
    }
}

/// The binding between an allocated address and an instance
///
/// A distinct lifecycle unit: it exists only while both referenced entities
/// exist, and can be destroyed and recreated (instance replacement) without
/// reallocating the address. Ordering is structural — it is declared after
/// both the address and the instance.
#[derive(Debug, Clone)]
pub struct AssociationSpec {
    name: String,
    address: ResourceId,
    instance: ResourceId,
}

impl AssociationSpec {
    pub fn new(
        name: impl Into<String>,
        address: &AddressHandle,
        instance: &InstanceHandle,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.id().clone(),
            instance: instance.id().clone(),
        }
    }

    pub fn declare(self, sink: &mut dyn GraphSink) -> Result<AssociationHandle> {
        let id = sink.accept(
            Resource::new(ResourceKind::AddressAssociation, &self.name)
                .with_attributes(serde_json::Value::Object(serde_json::Map::new()))
                .with_references([self.address, self.instance]),
        )?;
        Ok(AssociationHandle { id })
    }
}

/// Handle to the declared association
#[derive(Debug, Clone)]
pub struct AssociationHandle {
    id: ResourceId,
}

impl AssociationHandle {
    pub fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::InstanceSpec;
    use crate::firewall::FirewallSpec;
    use crate::identity::{RoleSpec, ServicePrincipal};
    use crate::network::NetworkSpec;
    use peakstack_graph::ResourceGraph;
    use serde_json::json;

    fn declare_instance(graph: &mut ResourceGraph) -> InstanceHandle {
        let vpc = NetworkSpec::new("vpc", "10.0.0.0/16").declare(graph).unwrap();
        let sg = FirewallSpec::new("security-group", &vpc).declare(graph).unwrap();
        let role = RoleSpec::new("backend-runner", ServicePrincipal::compute())
            .declare(graph)
            .unwrap();
        InstanceSpec::new("peak-backend", &vpc, &role, &sg)
            .declare(graph)
            .unwrap()
    }

    #[test]
    fn allocation_is_vpc_scoped_and_bound_to_instance() {
        let mut graph = ResourceGraph::new();
        let instance = declare_instance(&mut graph);
        let ip = StaticAddressSpec::new("peak-backend-ip", &instance)
            .declare(&mut graph)
            .unwrap();

        let resource = graph.get(ip.id()).unwrap();
        assert_eq!(resource.attributes, json!({"scope": "vpc"}));
        assert_eq!(resource.references, vec![instance.id().clone()]);
    }

    #[test]
    fn association_references_exactly_address_and_instance() {
        let mut graph = ResourceGraph::new();
        let instance = declare_instance(&mut graph);
        let ip = StaticAddressSpec::new("peak-backend-ip", &instance)
            .declare(&mut graph)
            .unwrap();
        let assoc = AssociationSpec::new("peak-backend-ip-assoc", &ip, &instance)
            .declare(&mut graph)
            .unwrap();

        let resource = graph.get(assoc.id()).unwrap();
        assert_eq!(
            resource.references,
            vec![ip.id().clone(), instance.id().clone()]
        );
    }
}
