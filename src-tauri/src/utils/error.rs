//! Error types for the image converter.
//!
//! Every variant displays as its bare message: the UI receives errors as
//! plain strings on the `error` channel, so the text is the whole contract.

use std::io;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Message sent when the folder dialog is dismissed.
pub const NO_FOLDER_MESSAGE: &str = "Please choose a folder";

/// Main error type for a conversion batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The user dismissed the folder dialog
    #[error("{NO_FOLDER_MESSAGE}")]
    Cancelled,

    /// The encoder rejected the input buffer
    #[error("{0}")]
    Codec(String),

    /// Writing the encoded file failed
    #[error("{0}")]
    Io(String),

    /// Quality not a whole number in 0..=100
    #[error("Expected integer between 0 and 100 for quality but received {0}")]
    InvalidQuality(f64),

    /// Inbound message could not be decoded
    #[error("{0}")]
    Payload(String),

    /// A conversion task panicked or was aborted
    #[error("{0}")]
    Task(String),
}

/// Convenience result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

impl ConvertError {
    pub fn codec<T: Into<String>>(msg: T) -> Self {
        Self::Codec(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::Io(msg.into())
    }

    pub fn payload<T: Into<String>>(msg: T) -> Self {
        Self::Payload(msg.into())
    }

    pub fn task<T: Into<String>>(msg: T) -> Self {
        Self::Task(msg.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ConvertError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(format!("Conversion task failed: {err}"))
    }
}

// Commands return errors to the frontend as the same plain string the
// `error` channel carries.
impl Serialize for ConvertError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
