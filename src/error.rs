use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipError {
    #[error("terminal i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
