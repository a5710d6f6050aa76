use nodepin::Paths;
use nodepin::Runtime;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Status<'a> {
  installed: bool,
  node_version: &'a str,
  npm_version: &'a str,
  paths: &'a Paths,
}

/// Print what nodepin sees as JSON
pub fn main(runtime: Runtime) -> anyhow::Result<()> {
  let config = runtime.config();
  let status = Status {
    installed: runtime.is_setup()?,
    node_version: &config.node.version,
    npm_version: &config.npm.version,
    paths: &config.paths,
  };
  println!("{}", serde_json::to_string_pretty(&status)?);
  Ok(())
}
