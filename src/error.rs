// error.rs - Errors raised at the host boundary
//
// The simulation core never fails. Only config parsing and file loading can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown physics mode `{0}` (expected attract, repel, orbit or wave)")]
    UnknownPhysicsMode(String),

    #[error("unknown path style `{0}` (expected circle or triangle)")]
    UnknownPathStyle(String),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}
