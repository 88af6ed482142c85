// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for the monitoring client.
//!
//! Session operations return [`ClientError`], which separates transport
//! failures, misuse of the session API, and outcomes reported by the server.
//! Every error converts into `io::Error`; the original value can be recovered
//! by downcasting:
//!
//! ```
//! use std::io;
//! use cmdmon_client::error::{ClientError, UsageError};
//!
//! let err: io::Error = ClientError::Usage(UsageError::UnexpectedCall).into();
//! let inner = err
//!     .get_ref()
//!     .and_then(|e| e.downcast_ref::<ClientError>());
//! assert!(matches!(inner, Some(ClientError::Usage(UsageError::UnexpectedCall))));
//! ```

// Re-export the codec error so callers need a single import.
pub use cmdmon_proto::error::CodecError;

use std::fmt;
use std::io;

/// Errors returned by session operations.
#[derive(Debug)]
pub enum ClientError {
    /// Sending, receiving, or drawing random numbers failed.
    Transport(TransportError),
    /// The session API was used incorrectly.
    Usage(UsageError),
    /// The server answered, but not with a usable response.
    Protocol(CodecError),
}

/// Failures of the underlying socket or entropy source.
#[derive(Debug)]
pub enum TransportError {
    /// The random source could not produce a sequence number.
    Random(io::Error),
    /// The request datagram could not be sent.
    Send(io::Error),
    /// Receiving a datagram failed.
    Recv(io::Error),
}

/// Misuse of the session API.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UsageError {
    /// No report has this name.
    UnknownReport {
        /// The name that was looked up.
        name: String,
    },
    /// The record index is not valid for a single-record report.
    InvalidRecord {
        /// Report name.
        report: &'static str,
        /// Requested record index.
        record: u32,
    },
    /// A response was processed while none was outstanding.
    UnexpectedCall,
}

/// Timeouts of the blocking driver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TimeoutError {
    /// No valid response arrived before the deadline.
    Response,
}

/// Errors returned by the blocking driver in [`crate::driver`].
#[derive(Debug)]
pub enum DriverError {
    /// The session reported an error.
    Client(ClientError),
    /// Waiting for a response timed out.
    Timeout(TimeoutError),
    /// Polling the socket failed.
    Io(io::Error),
}

// ── Display implementations ─────────────────────────────────────────

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "transport error: {e}"),
            ClientError::Usage(e) => write!(f, "usage error: {e}"),
            ClientError::Protocol(e) => write!(f, "protocol error: {e}"),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Random(e) => write!(f, "random source failed: {e}"),
            TransportError::Send(e) => write!(f, "send failed: {e}"),
            TransportError::Recv(e) => write!(f, "recv failed: {e}"),
        }
    }
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::UnknownReport { name } => write!(f, "unknown report: {name}"),
            UsageError::InvalidRecord { report, record } => {
                write!(f, "invalid record {record} for report {report}")
            }
            UsageError::UnexpectedCall => write!(f, "no response is expected"),
        }
    }
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutError::Response => write!(f, "response timed out"),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Client(e) => write!(f, "{e}"),
            DriverError::Timeout(e) => write!(f, "{e}"),
            DriverError::Io(e) => write!(f, "poll failed: {e}"),
        }
    }
}

// ── Error trait implementations ─────────────────────────────────────

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            ClientError::Usage(e) => Some(e),
            ClientError::Protocol(e) => Some(e),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Random(e) | TransportError::Send(e) | TransportError::Recv(e) => {
                Some(e)
            }
        }
    }
}

impl std::error::Error for UsageError {}
impl std::error::Error for TimeoutError {}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Client(e) => Some(e),
            DriverError::Timeout(e) => Some(e),
            DriverError::Io(e) => Some(e),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> ClientError {
        ClientError::Transport(err)
    }
}

impl From<UsageError> for ClientError {
    fn from(err: UsageError) -> ClientError {
        ClientError::Usage(err)
    }
}

impl From<CodecError> for ClientError {
    fn from(err: CodecError) -> ClientError {
        ClientError::Protocol(err)
    }
}

impl From<ClientError> for DriverError {
    fn from(err: ClientError) -> DriverError {
        DriverError::Client(err)
    }
}

impl From<TimeoutError> for DriverError {
    fn from(err: TimeoutError) -> DriverError {
        DriverError::Timeout(err)
    }
}

impl From<io::Error> for DriverError {
    fn from(err: io::Error) -> DriverError {
        DriverError::Io(err)
    }
}

impl From<ClientError> for io::Error {
    fn from(err: ClientError) -> io::Error {
        let kind = match &err {
            ClientError::Transport(
                TransportError::Random(e) | TransportError::Send(e) | TransportError::Recv(e),
            ) => e.kind(),
            ClientError::Usage(UsageError::UnexpectedCall) => io::ErrorKind::Other,
            ClientError::Usage(_) => io::ErrorKind::InvalidInput,
            ClientError::Protocol(e) => io::Error::from(*e).kind(),
        };
        io::Error::new(kind, err)
    }
}

impl From<DriverError> for io::Error {
    fn from(err: DriverError) -> io::Error {
        match err {
            DriverError::Client(e) => e.into(),
            DriverError::Timeout(e) => io::Error::new(io::ErrorKind::TimedOut, e),
            // Preserve the original io::Error directly.
            DriverError::Io(e) => e,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
