//! The backend stack: every component composed in dependency order

use crate::address::{AddressHandle, AssociationHandle, AssociationSpec, StaticAddressSpec};
use crate::compute::{InstanceHandle, InstanceSpec, SubnetPlacement};
use crate::dns::{DnsRecordHandle, DnsRecordSpec, HostedZoneRef, ZoneHandle};
use crate::firewall::{FirewallHandle, FirewallSpec, Protocol, SourceRange};
use crate::identity::{RoleHandle, RoleSpec, ServicePrincipal};
use crate::network::{NetworkHandle, NetworkSpec};
use peakstack_graph::{GraphSink, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment-specific values the declaration is parameterized over
///
/// Everything that varies per account or region lives here and is passed in
/// explicitly, never read from module-level globals, so the declaration stays
/// pure and testable. [`StackConfig::default`] carries the production values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Target provider region
    pub region: String,

    /// Private address block of the isolated network
    pub network_cidr: String,

    /// Instance size class
    pub instance_type: String,

    /// Pre-existing connection key, looked up by name
    pub key_name: String,

    /// Name of the externally owned DNS zone
    pub zone_name: String,

    /// Identifier of the externally owned DNS zone
    pub zone_id: String,

    /// Subdomain the backend is reachable under
    pub record_name: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            region: "us-east-2".to_string(),
            network_cidr: "10.0.0.0/16".to_string(),
            instance_type: "t4g.nano".to_string(),
            key_name: "peak-admin-key".to_string(),
            zone_name: "peak.band".to_string(),
            zone_id: "Z019212522KE2ITU9E7G".to_string(),
            record_name: "api".to_string(),
        }
    }
}

/// Handles to everything the backend declaration emits
///
/// Construction declares the whole topology into the sink, leaves first:
/// network, firewall, role, instance, address, association, zone lookup, DNS
/// record. Each later component only sees handles of earlier ones, which is
/// what keeps the emitted graph acyclic.
#[derive(Debug, Clone)]
pub struct BackendStack {
    pub network: NetworkHandle,
    pub firewall: FirewallHandle,
    pub role: RoleHandle,
    pub instance: InstanceHandle,
    pub address: AddressHandle,
    pub association: AssociationHandle,
    pub zone: ZoneHandle,
    pub record: DnsRecordHandle,
}

impl BackendStack {
    /// Evaluate the declaration into `sink`
    pub fn declare(config: &StackConfig, sink: &mut dyn GraphSink) -> Result<Self> {
        let network = NetworkSpec::new("vpc", &config.network_cidr)
            .nat_gateways(0)
            .declare(sink)?;

        // Ports 22/80/443 from anywhere are the fixed baseline: the two
        // ports the backend serves plus one administrative port. The open
        // source range on 22 is an accepted policy decision, not an
        // oversight.
        let firewall = FirewallSpec::new("security-group", &network)
            .display_name("Peak Music VPC Security Group")
            .allow_ingress(
                Protocol::Tcp,
                22,
                SourceRange::AnyIpv4,
                "Allow ssh access from anywhere",
            )
            .allow_ingress(
                Protocol::Tcp,
                80,
                SourceRange::AnyIpv4,
                "Allows HTTP access from anywhere",
            )
            .allow_ingress(
                Protocol::Tcp,
                443,
                SourceRange::AnyIpv4,
                "Allows HTTPS access from anywhere",
            )
            .declare(sink)?;

        let role = RoleSpec::new("backend-runner", ServicePrincipal::compute()).declare(sink)?;

        let instance = InstanceSpec::new("peak-backend", &network, &role, &firewall)
            .display_name("Backend Server")
            .subnet_placement(SubnetPlacement::Public)
            .instance_type(&config.instance_type)
            .key_name(&config.key_name)
            .declare(sink)?;

        let address = StaticAddressSpec::new("peak-backend-ip", &instance).declare(sink)?;

        let association =
            AssociationSpec::new("peak-backend-ip-assoc", &address, &instance).declare(sink)?;

        let zone = HostedZoneRef::new(
            "peak-music-hosted-zone",
            &config.zone_name,
            &config.zone_id,
        )
        .declare(sink)?;

        let record =
            DnsRecordSpec::new("api-a-record", &zone, &config.record_name, &address)
                .declare(sink)?;

        info!(region = %config.region, "backend topology declared");

        Ok(Self {
            network,
            firewall,
            role,
            instance,
            address,
            association,
            zone,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peakstack_graph::ResourceGraph;

    #[test]
    fn default_config_carries_production_values() {
        let config = StackConfig::default();
        assert_eq!(config.region, "us-east-2");
        assert_eq!(config.network_cidr, "10.0.0.0/16");
        assert_eq!(config.instance_type, "t4g.nano");
        assert_eq!(config.key_name, "peak-admin-key");
        assert_eq!(config.zone_name, "peak.band");
        assert_eq!(config.record_name, "api");
    }

    #[test]
    fn declares_eight_resources() {
        let mut graph = ResourceGraph::new();
        BackendStack::declare(&StackConfig::default(), &mut graph).unwrap();
        assert_eq!(graph.len(), 8);
    }

    #[test]
    fn partial_config_json_falls_back_to_defaults() {
        let config: StackConfig =
            serde_json::from_str(r#"{"instance_type": "t4g.small"}"#).unwrap();
        assert_eq!(config.instance_type, "t4g.small");
        assert_eq!(config.zone_name, "peak.band");
    }
}
