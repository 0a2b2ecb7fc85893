//! Error types at the two platform boundaries: the native host bridge and
//! the browser media stack. Nothing here crosses a controller boundary as a
//! typed value; call sites turn these into log lines or user-visible text.

use thiserror::Error;

/// Failures talking to the native capture host.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BridgeError {
    /// No invoke function is injected into this page; there is no host.
    #[error("native host is not available")]
    HostUnavailable,
    /// The host rejected a command.
    #[error("{name} failed: {message}")]
    Command { name: &'static str, message: String },
    /// The host answered with a payload we could not decode.
    #[error("could not decode {name} response: {message}")]
    Decode { name: &'static str, message: String },
}

/// Failures in the browser-backed capture path.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MediaError {
    /// `navigator.mediaDevices` is missing (insecure context, headless…).
    #[error("media devices are not available in this browser")]
    Unsupported,
    /// The user denied access or the device could not start.
    #[error("camera access failed: {0}")]
    Acquire(String),
    /// Capture was requested before the video element had a frame.
    #[error("no video frame available yet")]
    NoFrame,
    /// Canvas drawing or JPEG encoding failed.
    #[error("could not encode snapshot: {0}")]
    Encode(String),
}
