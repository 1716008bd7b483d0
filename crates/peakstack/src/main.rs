mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "peak")]
#[command(about = "Declare the Peak Music backend topology", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the resource manifest for the provisioning engine
    Synth {
        /// Write the manifest to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit compact JSON (default is pretty-printed)
        #[arg(long)]
        compact: bool,
        /// Stack configuration file (JSON); defaults are used when omitted
        #[arg(short, long, env = "PEAK_STACK_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Show the declared resources in provisioning order
    Order {
        /// Stack configuration file (JSON); defaults are used when omitted
        #[arg(short, long, env = "PEAK_STACK_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Synth {
            output,
            compact,
            config,
        } => {
            let config = commands::load_config(config.as_deref())?;
            commands::synth::run(&config, output.as_deref(), compact)
        }
        Commands::Order { config } => {
            let config = commands::load_config(config.as_deref())?;
            commands::order::run(&config)
        }
        Commands::Version => {
            println!("peakstack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
