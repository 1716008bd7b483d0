//! `peak synth` — evaluate the declaration and emit the manifest

use anyhow::Context;
use colored::Colorize;
use peakstack_graph::{Manifest, ResourceGraph};
use peakstack_topology::{BackendStack, StackConfig};
use std::path::Path;

pub fn run(config: &StackConfig, output: Option<&Path>, compact: bool) -> anyhow::Result<()> {
    let mut graph = ResourceGraph::new();
    BackendStack::declare(config, &mut graph).context("failed to evaluate the declaration")?;

    let manifest = Manifest::new(&config.region, &graph);
    let json = if compact {
        manifest.to_json()?
    } else {
        manifest.to_json_pretty()?
    };

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write manifest to {}", path.display()))?;
            eprintln!(
                "{} {} resources -> {}",
                "synthesized".green().bold(),
                graph.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
