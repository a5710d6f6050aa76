use clap::Parser;
use nodepin::Runtime;

use super::ensure_setup;
use super::exec_blocking;

#[derive(Debug, Parser)]
pub struct RunCommand {
  /// JavaScript source passed to `node -e`
  pub script: String,
}

pub fn main(runtime: Runtime, cmd: RunCommand) -> anyhow::Result<()> {
  ensure_setup(&runtime)?;
  exec_blocking(runtime.script_command(&cmd.script))
}
