//! Installs a pinned node and npm into a local directory the first time a host
//! tool needs them.
//!
//! The entry points are [`Runtime::is_setup`], a cheap existence check, and
//! [`Runtime::setup`], which installs whatever is missing:
//!
//! - an install lock scoped to the root serialises setups across processes
//! - each artifact is streamed, xz decoded and SHA-256 hashed in a single pass
//!   into a scratch directory
//! - a digest that differs from the pin fails the setup, nothing is moved
//! - verified files are moved into their final location with a single rename,
//!   so a partially written install is never visible at the final path
//! - the installed node and npm are asked for their version, a mismatch removes
//!   the artifact again
//! - directories from previously pinned versions are removed
//!
//! ```no_run
//! use nodepin::Pins;
//! use nodepin::Runtime;
//! use nodepin::RuntimeConfig;
//!
//! # fn main() -> nodepin::Result<()> {
//! let pins = Pins::read_from_file("pins.json")?;
//! let runtime = Runtime::from_config(RuntimeConfig::new("/home/me/.local/nodepin", &pins)?)?;
//! if !runtime.is_setup()? {
//!   runtime.setup()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod checksum;
pub mod config;
pub mod error;
pub mod fetch;
pub mod fs_ext;
pub mod install;
pub mod lock;
pub mod paths;
pub mod platform;
pub mod reap;
pub mod setup;
pub mod temp_dir;
pub mod version;

#[cfg(test)]
mod test_utils;

pub use config::Artifact;
pub use config::ArtifactPin;
pub use config::Pins;
pub use config::RuntimeConfig;
pub use error::Error;
pub use error::Result;
pub use fetch::Fetch;
pub use fetch::HttpFetcher;
pub use paths::Paths;
pub use setup::FetchRef;
pub use setup::Runtime;
