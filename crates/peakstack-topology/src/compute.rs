//! Compute instance declaration

use crate::firewall::FirewallHandle;
use crate::identity::RoleHandle;
use crate::network::NetworkHandle;
use peakstack_graph::{GraphSink, Resource, ResourceId, ResourceKind, Result};
use serde::Serialize;

/// Which derived subnet tier the instance lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetPlacement {
    Public,
    Private,
}

/// CPU architecture of the machine image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CpuArch {
    Arm64,
    X86_64,
}

/// OS generation of the machine image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsGeneration {
    AmazonLinux2,
}

/// Indirect machine image selector
///
/// Selects architecture and OS generation instead of a fixed image id; the
/// provisioning engine resolves it to the latest matching image at
/// provisioning time. Reproducibility is traded for always-current security
/// patches. If the selector matches zero images, or "latest" is ambiguous,
/// provisioning fails at the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageSelector {
    pub arch: CpuArch,
    pub generation: OsGeneration,
    /// Resolution strategy applied by the engine
    resolution: &'static str,
}

impl ImageSelector {
    pub fn latest(arch: CpuArch, generation: OsGeneration) -> Self {
        Self {
            arch,
            generation,
            resolution: "latest",
        }
    }
}

/// Desired state of the single backend instance
#[derive(Debug, Clone, Serialize)]
pub struct InstanceSpec {
    #[serde(skip)]
    name: String,

    #[serde(skip)]
    network: ResourceId,

    #[serde(skip)]
    role: ResourceId,

    #[serde(skip)]
    firewall: ResourceId,

    display_name: String,

    subnet_placement: SubnetPlacement,

    instance_type: String,

    image: ImageSelector,

    /// Name of a pre-existing connection key, looked up in the target
    /// account/region at provisioning time. Not created here; provisioning
    /// fails if it does not exist.
    key_name: String,
}

impl InstanceSpec {
    pub fn new(
        name: impl Into<String>,
        network: &NetworkHandle,
        role: &RoleHandle,
        firewall: &FirewallHandle,
    ) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            network: network.id().clone(),
            role: role.id().clone(),
            firewall: firewall.id().clone(),
            subnet_placement: SubnetPlacement::Public,
            instance_type: "t4g.nano".to_string(),
            image: ImageSelector::latest(CpuArch::Arm64, OsGeneration::AmazonLinux2),
            key_name: String::new(),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn subnet_placement(mut self, placement: SubnetPlacement) -> Self {
        self.subnet_placement = placement;
        self
    }

    pub fn instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = instance_type.into();
        self
    }

    pub fn image(mut self, image: ImageSelector) -> Self {
        self.image = image;
        self
    }

    pub fn key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    /// Emit the instance, referencing its network, role and firewall policy
    pub fn declare(self, sink: &mut dyn GraphSink) -> Result<InstanceHandle> {
        let references = [
            self.network.clone(),
            self.role.clone(),
            self.firewall.clone(),
        ];
        let id = sink.accept(
            Resource::new(ResourceKind::Instance, &self.name)
                .with_attributes(serde_json::to_value(&self)?)
                .with_references(references),
        )?;
        Ok(InstanceHandle { id })
    }
}

/// Handle to the declared instance
#[derive(Debug, Clone)]
pub struct InstanceHandle {
    id: ResourceId,
}

impl InstanceHandle {
    pub fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firewall::FirewallSpec;
    use crate::identity::{RoleSpec, ServicePrincipal};
    use crate::network::NetworkSpec;
    use peakstack_graph::ResourceGraph;
    use serde_json::json;

    #[test]
    fn instance_references_network_role_and_firewall() {
        let mut graph = ResourceGraph::new();
        let vpc = NetworkSpec::new("vpc", "10.0.0.0/16")
            .declare(&mut graph)
            .unwrap();
        let sg = FirewallSpec::new("security-group", &vpc)
            .declare(&mut graph)
            .unwrap();
        let role = RoleSpec::new("backend-runner", ServicePrincipal::compute())
            .declare(&mut graph)
            .unwrap();

        let instance = InstanceSpec::new("peak-backend", &vpc, &role, &sg)
            .display_name("Backend Server")
            .key_name("peak-admin-key")
            .declare(&mut graph)
            .unwrap();

        let resource = graph.get(instance.id()).unwrap();
        assert_eq!(
            resource.references,
            vec![vpc.id().clone(), role.id().clone(), sg.id().clone()]
        );
        assert_eq!(resource.attributes["instance_type"], json!("t4g.nano"));
        assert_eq!(resource.attributes["subnet_placement"], json!("public"));
        assert_eq!(
            resource.attributes["image"],
            json!({
                "arch": "arm64",
                "generation": "amazon-linux2",
                "resolution": "latest",
            })
        );
        assert_eq!(resource.attributes["key_name"], json!("peak-admin-key"));
    }
}
