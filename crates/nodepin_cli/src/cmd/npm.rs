use clap::Parser;
use nodepin::Runtime;

use super::ensure_setup;
use super::exec_blocking;

#[derive(Debug, Parser)]
pub struct NpmCommand {
  /// Arguments forwarded to npm
  #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
  pub args: Vec<String>,
}

pub fn main(runtime: Runtime, cmd: NpmCommand) -> anyhow::Result<()> {
  ensure_setup(&runtime)?;
  exec_blocking(runtime.npm_command(&cmd.args))
}
