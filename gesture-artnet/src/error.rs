//! Error types shared across the crate

use std::io;

/// Result type for gesture-artnet operations
pub type Result<T> = std::result::Result<T, GestureLinkError>;

/// Errors that can occur while configuring or running the pipeline
#[derive(Debug, thiserror::Error)]
pub enum GestureLinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid destination address: {0}")]
    InvalidAddress(String),

    #[error("Invalid landmarks: expected 21 points, got {0}")]
    InvalidLandmarks(usize),

    #[error("Trace line {line}: {message}")]
    Trace { line: usize, message: String },

    #[error("Malformed Art-Net packet: {0}")]
    Packet(String),

    #[error("Outbound queue closed")]
    QueueClosed,
}
