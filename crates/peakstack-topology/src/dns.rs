//! DNS record declaration

use crate::address::AddressHandle;
use peakstack_graph::{GraphSink, Resource, ResourceId, ResourceKind, Result};
use serde::Serialize;
use serde_json::json;

/// DNS record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordType {
    A,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordType::A => write!(f, "A"),
        }
    }
}

/// Reference to a DNS zone owned elsewhere
///
/// The zone is looked up by its fixed name/id pair; this declaration never
/// creates or destroys it. It is still emitted into the graph (flagged
/// `external`) so the record's reference set stays closed under the graph.
#[derive(Debug, Clone, Serialize)]
pub struct HostedZoneRef {
    #[serde(skip)]
    name: String,

    zone_name: String,

    zone_id: String,

    /// Owned by an external party; the engine must only look it up
    external: bool,
}

impl HostedZoneRef {
    pub fn new(
        name: impl Into<String>,
        zone_name: impl Into<String>,
        zone_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            zone_name: zone_name.into(),
            zone_id: zone_id.into(),
            external: true,
        }
    }

    pub fn declare(self, sink: &mut dyn GraphSink) -> Result<ZoneHandle> {
        let zone_name = self.zone_name.clone();
        let id = sink.accept(
            Resource::new(ResourceKind::HostedZone, &self.name)
                .with_attributes(serde_json::to_value(&self)?),
        )?;
        Ok(ZoneHandle { id, zone_name })
    }
}

/// Handle to a looked-up hosted zone
#[derive(Debug, Clone)]
pub struct ZoneHandle {
    id: ResourceId,
    zone_name: String,
}

impl ZoneHandle {
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }
}

/// Desired state of the address record for the backend subdomain
///
/// The record's target is the static address's *value*, not its allocation
/// id, because DNS resolves names to literal addresses. The value is unknown
/// until the engine allocates the address, so the declared target is a
/// symbolic `address_of` reference and [`DnsRecordHandle::resolve`] renders
/// the concrete record once the value is known.
#[derive(Debug, Clone)]
pub struct DnsRecordSpec {
    name: String,
    zone: ResourceId,
    zone_name: String,
    record_name: String,
    record_type: RecordType,
    target: ResourceId,
}

impl DnsRecordSpec {
    pub fn new(
        name: impl Into<String>,
        zone: &ZoneHandle,
        record_name: impl Into<String>,
        target: &AddressHandle,
    ) -> Self {
        Self {
            name: name.into(),
            zone: zone.id().clone(),
            zone_name: zone.zone_name().to_string(),
            record_name: record_name.into(),
            record_type: RecordType::A,
            target: target.id().clone(),
        }
    }

    pub fn declare(self, sink: &mut dyn GraphSink) -> Result<DnsRecordHandle> {
        let attributes = json!({
            "record_name": self.record_name.clone(),
            "record_type": self.record_type,
            "target": { "address_of": self.target.key() },
        });
        let id = sink.accept(
            Resource::new(ResourceKind::DnsRecord, &self.name)
                .with_attributes(attributes)
                .with_references([self.zone, self.target]),
        )?;
        Ok(DnsRecordHandle {
            id,
            zone: self.zone_name,
            record_name: self.record_name,
            record_type: self.record_type,
        })
    }
}

/// Handle to the declared record
#[derive(Debug, Clone)]
pub struct DnsRecordHandle {
    id: ResourceId,
    zone: String,
    record_name: String,
    record_type: RecordType,
}

impl DnsRecordHandle {
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Render the concrete record for an allocated address value
    pub fn resolve(&self, address_value: impl Into<String>) -> ResolvedRecord {
        ResolvedRecord {
            zone: self.zone.clone(),
            name: self.record_name.clone(),
            record_type: self.record_type,
            target: address_value.into(),
        }
    }
}

/// A record whose target has been substituted with the allocated value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecord {
    pub zone: String,
    pub name: String,
    pub record_type: RecordType,
    pub target: String,
}

impl std::fmt::Display for ResolvedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} {} {}",
            self.name, self.zone, self.record_type, self.target
        )
    }
}
