pub mod order;
pub mod synth;

use anyhow::Context;
use peakstack_topology::StackConfig;
use std::path::Path;
use tracing::debug;

/// Load the stack configuration, falling back to the production defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<StackConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let config: StackConfig = serde_json::from_str(&raw)
                .with_context(|| format!("invalid stack config in {}", path.display()))?;
            debug!(path = %path.display(), "loaded stack config");
            Ok(config)
        }
        None => Ok(StackConfig::default()),
    }
}
