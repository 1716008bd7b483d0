//! Append-only dependency graph of declared resources

use crate::error::{GraphError, Result};
use crate::resource::{Resource, ResourceId};
use crate::sink::GraphSink;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// The full set of declared resources and their reference edges
///
/// Resources are kept in declaration order. [`ResourceGraph::insert`] rejects
/// duplicate ids and references to resources that are not present yet, so a
/// graph built through it is acyclic by construction. A graph rebuilt from a
/// manifest ([`ResourceGraph::from_resources`]) only checks that every edge
/// target exists somewhere; [`ResourceGraph::provision_order`] then detects
/// cycles explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceGraph {
    resources: Vec<Resource>,
    index: HashMap<ResourceId, usize>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a graph from manifest entries, in the order given
    pub fn from_resources(resources: Vec<Resource>) -> Result<Self> {
        let mut index = HashMap::with_capacity(resources.len());
        for (pos, resource) in resources.iter().enumerate() {
            if index.insert(resource.id.clone(), pos).is_some() {
                return Err(GraphError::DuplicateResource(resource.id.clone()));
            }
        }
        for resource in &resources {
            for target in &resource.references {
                if !index.contains_key(target) {
                    return Err(GraphError::UnresolvedReference {
                        resource: resource.id.clone(),
                        missing: target.clone(),
                    });
                }
            }
        }
        Ok(Self { resources, index })
    }

    /// Add a resource to the graph
    ///
    /// Every reference must point at an already-declared resource. This is
    /// the structural ordering guarantee: declaration order is a valid
    /// provisioning order, and no cycle can ever be introduced.
    pub fn insert(&mut self, resource: Resource) -> Result<ResourceId> {
        if self.index.contains_key(&resource.id) {
            return Err(GraphError::DuplicateResource(resource.id));
        }
        for target in &resource.references {
            if !self.index.contains_key(target) {
                return Err(GraphError::UnresolvedReference {
                    resource: resource.id.clone(),
                    missing: target.clone(),
                });
            }
        }

        debug!(resource = %resource.id, refs = resource.references.len(), "declared resource");
        let id = resource.id.clone();
        self.index.insert(id.clone(), self.resources.len());
        self.resources.push(resource);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        self.index.get(id).map(|&pos| &self.resources[pos])
    }

    /// Resources in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Resources another resource depends on
    pub fn references_of(&self, id: &ResourceId) -> &[ResourceId] {
        self.get(id).map(|r| r.references.as_slice()).unwrap_or(&[])
    }

    /// Resources that reference `id`
    pub fn dependents_of(&self, id: &ResourceId) -> Vec<&ResourceId> {
        self.resources
            .iter()
            .filter(|r| r.references_id(id))
            .map(|r| &r.id)
            .collect()
    }

    /// Every (from, to) reference edge, in declaration order
    pub fn edges(&self) -> Vec<(&ResourceId, &ResourceId)> {
        self.resources
            .iter()
            .flat_map(|r| r.references.iter().map(move |t| (&r.id, t)))
            .collect()
    }

    /// A valid order in which an engine may create the resources
    ///
    /// Kahn's algorithm, tie-broken by declaration order so the result is
    /// deterministic. Fails with [`GraphError::ReferenceCycle`] if the edge
    /// set is cyclic, which can only happen for graphs rebuilt from an
    /// untrusted manifest.
    pub fn provision_order(&self) -> Result<Vec<ResourceId>> {
        // Count distinct targets: a resource may list the same reference
        // twice, but the relaxation below only visits each edge once.
        let mut in_degree: HashMap<&ResourceId, usize> = self
            .resources
            .iter()
            .map(|r| {
                let distinct: HashSet<&ResourceId> = r.references.iter().collect();
                (&r.id, distinct.len())
            })
            .collect();

        let mut ready: VecDeque<&ResourceId> = self
            .resources
            .iter()
            .filter(|r| r.references.is_empty())
            .map(|r| &r.id)
            .collect();

        let mut order = Vec::with_capacity(self.resources.len());
        let mut done: HashSet<&ResourceId> = HashSet::new();

        while let Some(id) = ready.pop_front() {
            order.push(id.clone());
            done.insert(id);
            for resource in &self.resources {
                if done.contains(&resource.id) || !resource.references_id(id) {
                    continue;
                }
                if let Some(remaining) = in_degree.get_mut(&resource.id) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        ready.push_back(&resource.id);
                    }
                }
            }
        }

        if order.len() != self.resources.len() {
            if let Some(stuck) = self.resources.iter().find(|r| !done.contains(&r.id)) {
                return Err(GraphError::ReferenceCycle(stuck.id.clone()));
            }
        }
        Ok(order)
    }

    /// Whether the reference relation contains no cycles
    pub fn is_acyclic(&self) -> bool {
        self.provision_order().is_ok()
    }
}

impl GraphSink for ResourceGraph {
    fn accept(&mut self, resource: Resource) -> Result<ResourceId> {
        self.insert(resource)
    }
}
