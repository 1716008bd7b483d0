//! Peakstack resource graph
//!
//! This crate provides the substrate the topology declaration is built on:
//! typed resource identifiers, immutable resource entries, an append-only
//! dependency graph, and the [`GraphSink`] boundary a provisioning engine
//! implements to consume the declaration.
//!
//! The graph itself never talks to a cloud API. It only guarantees the
//! structural properties an engine is entitled to rely on: every reference
//! points at a resource that exists, and the reference relation is acyclic,
//! so any missing edge licenses the engine to parallelize.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            peakstack-topology                │
//! │   (network, firewall, compute, dns, ...)     │
//! └───────────────────┬──────────────────────────┘
//!                     │ declare() via GraphSink
//! ┌───────────────────▼──────────────────────────┐
//! │              peakstack-graph                 │
//! │   ResourceGraph ── Manifest (JSON envelope)  │
//! └───────────────────┬──────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────┐
//! │           provisioning engine                │
//! │      (plan / apply, out of scope here)       │
//! └──────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod graph;
pub mod manifest;
pub mod resource;
pub mod sink;

// Re-exports
pub use error::{GraphError, Result};
pub use graph::ResourceGraph;
pub use manifest::{MANIFEST_VERSION, Manifest};
pub use resource::{Resource, ResourceId, ResourceKind};
pub use sink::GraphSink;
