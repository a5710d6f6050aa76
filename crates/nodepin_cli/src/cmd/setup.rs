use std::time::SystemTime;

use nodepin::Runtime;

pub fn main(runtime: Runtime) -> anyhow::Result<()> {
  let start_time = SystemTime::now();
  let config = runtime.config();

  if runtime.is_setup()? {
    println!(
      "✅ Already installed (node {}, npm {})",
      config.node.version, config.npm.version
    );
    return Ok(());
  }

  runtime.setup()?;

  println!(
    "✅ Installed in {:.2?} (node {}, npm {})",
    start_time.elapsed()?,
    config.node.version,
    config.npm.version
  );
  Ok(())
}
