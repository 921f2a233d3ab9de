use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating an [`OrbitConfig`](crate::OrbitConfig).
///
/// The controller itself never fails: disabled features and out-of-range
/// input are silent no-ops. Only the configuration boundary reports errors.
#[derive(Debug, Error)]
pub enum ConfigError
{
  #[error("failed to read orbit config {}: {source}", path.display())]
  Io
  {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse orbit config: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("invalid orbit config: {0}")]
  Invalid(String),
}
