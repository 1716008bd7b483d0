//! `peak order` — show resources in provisioning order

use anyhow::Context;
use colored::Colorize;
use peakstack_graph::ResourceGraph;
use peakstack_topology::{BackendStack, StackConfig};

pub fn run(config: &StackConfig) -> anyhow::Result<()> {
    let mut graph = ResourceGraph::new();
    BackendStack::declare(config, &mut graph).context("failed to evaluate the declaration")?;

    let order = graph
        .provision_order()
        .context("declaration produced an unorderable graph")?;

    println!(
        "{} ({})",
        "provisioning order".bold(),
        config.region.cyan()
    );
    for (pos, id) in order.iter().enumerate() {
        println!("{:>3}. {}", pos + 1, id.key().green());
        for target in graph.references_of(id) {
            println!("       {} {}", "needs".dimmed(), target.key());
        }
    }

    let edges = graph.edges().len();
    println!(
        "{} resources, {} dependency edges",
        graph.len(),
        edges
    );
    Ok(())
}
