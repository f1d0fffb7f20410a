//! nats-trigger: create Kubeless NATS triggers, or render them with --dryrun.

mod client;
mod config;
mod error;
mod trigger;
mod types;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::client::KubeTriggerApi;
use crate::config::Config;
use crate::trigger::SubmissionResult;

#[derive(Debug, Parser)]
#[command(name = "nats-trigger", version, about = "Manage Kubeless NATS triggers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a NATS trigger
    Create(CreateArgs),
}

#[derive(Debug, Clone, Args)]
struct CreateArgs {
    /// NATS trigger name
    #[arg(value_name = "NATS_TRIGGER_NAME")]
    names: Vec<String>,
    /// Specify namespace for the NATS trigger
    #[arg(short, long, default_value = "")]
    namespace: String,
    /// Specify topic to listen to in NATS
    #[arg(long)]
    trigger_topic: Option<String>,
    /// Selector (label query) to select function on (e.g. --function-selector key1=value1,key2=value2)
    #[arg(long)]
    function_selector: Option<String>,
    /// Output the manifest of the trigger without creating it
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    dryrun: bool,
    /// Output format (yaml or json)
    #[arg(short, long, default_value = "yaml")]
    output: String,
}

async fn create(args: CreateArgs, config: &Config) -> Result<()> {
    let spec = trigger::resolve(
        &args.names,
        &args.namespace,
        args.trigger_topic.as_deref(),
        args.function_selector.as_deref(),
        &config.default_namespace,
    )?;

    match trigger::submit(&spec, args.dryrun, &args.output, KubeTriggerApi::connect).await? {
        SubmissionResult::Rendered(manifest) => println!("{}", manifest),
        SubmissionResult::Created { name, namespace } => {
            info!("NATS trigger {} created in namespace {} successfully!", name, namespace)
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Create(args) => {
            let config = Config::infer().await;
            create(args, &config).await
        }
    }
}
