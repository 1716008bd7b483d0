//! Execution identity declaration

use peakstack_graph::{GraphSink, Resource, ResourceId, ResourceKind, Result};
use serde::Serialize;

/// Service allowed to assume a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServicePrincipal(String);

impl ServicePrincipal {
    /// The compute service principal
    pub fn compute() -> Self {
        Self("ec2.amazonaws.com".to_string())
    }

    pub fn custom(service: impl Into<String>) -> Self {
        Self(service.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Desired state of the instance's execution role
///
/// The trust policy permits exactly one principal, enforced by construction.
/// No permission policies are attached here: the instance runs with baseline
/// privileges only, and widening that is a change made against the role by
/// whoever operates the account, not by this declaration.
#[derive(Debug, Clone, Serialize)]
pub struct RoleSpec {
    #[serde(skip)]
    name: String,

    assumed_by: ServicePrincipal,
}

impl RoleSpec {
    pub fn new(name: impl Into<String>, assumed_by: ServicePrincipal) -> Self {
        Self {
            name: name.into(),
            assumed_by,
        }
    }

    pub fn declare(self, sink: &mut dyn GraphSink) -> Result<RoleHandle> {
        let id = sink.accept(
            Resource::new(ResourceKind::Role, &self.name)
                .with_attributes(serde_json::to_value(&self)?),
        )?;
        Ok(RoleHandle { id })
    }
}

/// Handle to a declared role
#[derive(Debug, Clone)]
pub struct RoleHandle {
    id: ResourceId,
}

impl RoleHandle {
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
    fn role_carries_single_trust_principal() {
        let mut graph = ResourceGraph::new();
        let role = RoleSpec::new("backend-runner", ServicePrincipal::compute())
            .declare(&mut graph)
            .unwrap();

        let resource = graph.get(role.id()).unwrap();
        assert_eq!(
            resource.attributes,
            json!({"assumed_by": "ec2.amazonaws.com"})
        );
        assert!(resource.references.is_empty());
    }
}
