#![deny(unused_crate_dependencies)]

mod cmd;
mod env;

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use nodepin::Pins;
use nodepin::Runtime;
use nodepin::RuntimeConfig;

#[derive(Debug, Subcommand)]
pub enum NodepinCommandType {
  /// Download and install the pinned node and npm
  Setup,
  /// Show whether the pinned runtime is installed and where
  Status,
  /// Run an inline script with the pinned node
  Run(cmd::run::RunCommand),
  /// Run npm with the pinned node
  Npm(cmd::npm::NpmCommand),
}

/// Logging is controlled with RUST_LOG ("error", "warn", "info", "debug", "trace")
#[derive(Parser, Debug)]
pub struct NodepinCommand {
  #[clap(subcommand)]
  pub command: NodepinCommandType,
  /// [default value: "$HOME/.local/nodepin"]
  #[arg(long = "dir", env = "NODEPIN_DIR")]
  pub nodepin_dir: Option<PathBuf>,
  /// JSON file with the pinned node and npm versions, urls and checksums
  #[arg(long = "pins", env = "NODEPIN_PINS")]
  pub pins: PathBuf,
  /// Do not draw the download progress bar
  #[arg(long = "no-progress")]
  pub no_progress: bool,
}

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let args = NodepinCommand::parse();
  let root = env::nodepin_dir(args.nodepin_dir)?;
  let pins = Pins::read_from_file(&args.pins)?;
  let config = RuntimeConfig::new(root, &pins)?.with_progress(!args.no_progress);
  log::debug!("config: {:?}", config);
  let runtime = Runtime::from_config(config)?;

  match args.command {
    NodepinCommandType::Setup => cmd::setup::main(runtime),
    NodepinCommandType::Status => cmd::status::main(runtime),
    NodepinCommandType::Run(cmd) => cmd::run::main(runtime, cmd),
    NodepinCommandType::Npm(cmd) => cmd::npm::main(runtime, cmd),
  }
}
