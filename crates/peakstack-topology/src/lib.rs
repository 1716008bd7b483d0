//! Peakstack topology declaration
//!
//! Declares the desired state of the Peak Music backend: one isolated
//! network, a firewall policy, a single ARM instance, a static public
//! address, and a DNS record pointing `api.peak.band` at that address.
//!
//! Nothing here talks to a cloud API. Each component serializes its desired
//! state into a [`peakstack_graph::Resource`] and emits it through a
//! [`peakstack_graph::GraphSink`]; a provisioning engine consumes the
//! resulting graph and owns every create/update/delete decision, including
//! drift detection and retries.
//!
//! Declaration order is dependency order. A component can only reference
//! handles returned by components declared before it, so the emitted graph is
//! acyclic by construction and the engine may parallelize anything not
//! connected by a reference edge.

pub mod address;
pub mod compute;
pub mod dns;
pub mod firewall;
pub mod identity;
pub mod network;
pub mod stack;

// Re-exports
pub use address::{
    AddressHandle, AddressScope, AssociationHandle, AssociationSpec, StaticAddressSpec,
};
pub use compute::{
    CpuArch, ImageSelector, InstanceHandle, InstanceSpec, OsGeneration, SubnetPlacement,
};
pub use dns::{
    DnsRecordHandle, DnsRecordSpec, HostedZoneRef, RecordType, ResolvedRecord, ZoneHandle,
};
pub use firewall::{FirewallHandle, FirewallSpec, IngressRule, Protocol, SourceRange};
pub use identity::{RoleHandle, RoleSpec, ServicePrincipal};
pub use network::{NetworkHandle, NetworkSpec};
pub use stack::{BackendStack, StackConfig};
