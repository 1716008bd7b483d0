//! Graph sink boundary

use crate::error::Result;
use crate::resource::{Resource, ResourceId};

/// Consumer of declared resources
///
/// The topology declaration only needs the ability to emit entities and the
/// typed references between them; how a provisioning engine walks, diffs, or
/// applies the result stays behind this trait. [`crate::ResourceGraph`]
/// implements it for the common case of collecting the whole declaration in
/// memory, and an engine may implement it directly to stream resources into
/// its own lifecycle machinery.
pub trait GraphSink {
    /// Accept one declared resource
    ///
    /// Must reject duplicate ids and references to resources it has not seen
    /// yet; a declaration-time failure here is fatal to the whole evaluation.
    fn accept(&mut self, resource: Resource) -> Result<ResourceId>;
}
