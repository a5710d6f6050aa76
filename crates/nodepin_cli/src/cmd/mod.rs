pub mod npm;
pub mod run;
pub mod setup;
pub mod status;

use std::process::Command;

use nodepin::Runtime;

/// Setup is cheap to skip, so every command that needs node calls this first
pub fn ensure_setup(runtime: &Runtime) -> anyhow::Result<()> {
  if runtime.is_setup()? {
    return Ok(());
  }
  runtime.setup()?;
  Ok(())
}

pub fn exec_blocking(mut command: Command) -> anyhow::Result<()> {
  log::info!("exec: {:?}", command);
  let status = command.status()?;
  if !status.success() {
    return Err(anyhow::anyhow!("Process exited with status {}", status));
  }
  Ok(())
}
