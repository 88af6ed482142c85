// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error type for request formatting and response acceptance.
//!
//! [`CodecError`] is `no_std`-compatible and allocation free. With the `std`
//! feature it implements [`std::error::Error`] and converts into
//! [`std::io::Error`].

use core::fmt;

/// Errors produced while building a request or accepting a response.
///
/// Datagrams that do not belong to the outstanding request are never
/// reported through this type; [`Message::is_response_valid`] simply returns
/// `false` for them.
///
/// [`Message::is_response_valid`]: crate::message::Message::is_response_valid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CodecError {
    /// The server refused the request (status 2).
    Unauthorized,
    /// The requested feature is disabled on the server (status 6 or 13).
    Disabled,
    /// The server does not know the request code (status 3).
    OldServer,
    /// The server rejected the packet version or length (status 18 or 19).
    NewServer,
    /// The server answered with a status code outside the known table.
    UnexpectedStatus {
        /// Raw status code from the response header.
        status: u16,
    },
    /// The response carried a code none of the expected responses use.
    UnknownResponseCode {
        /// Raw response code from the response header.
        code: u16,
    },
    /// The response is shorter than its field layout requires.
    InvalidResponse {
        /// Bytes required by the selected field layout.
        needed: usize,
        /// Bytes actually received.
        available: usize,
    },
    /// A request argument is missing or does not match its field's wire type.
    ArgumentMismatch {
        /// Name of the request field.
        field: &'static str,
    },
}

impl CodecError {
    /// Returns `true` if the error means the server speaks a newer protocol
    /// dialect than this registry describes.
    pub fn is_new_server(&self) -> bool {
        matches!(
            self,
            CodecError::NewServer | CodecError::UnknownResponseCode { .. }
        )
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Unauthorized => write!(f, "request not authorized by server"),
            CodecError::Disabled => write!(f, "requested feature is disabled on server"),
            CodecError::OldServer => write!(f, "server does not support the request"),
            CodecError::NewServer => write!(f, "server rejected the protocol version"),
            CodecError::UnexpectedStatus { status } => {
                write!(f, "unexpected response status: {}", status)
            }
            CodecError::UnknownResponseCode { code } => {
                write!(f, "unrecognized response code: {}", code)
            }
            CodecError::InvalidResponse { needed, available } => {
                write!(
                    f,
                    "response too short: needed {} bytes, got {}",
                    needed, available
                )
            }
            CodecError::ArgumentMismatch { field } => {
                write!(f, "missing or mistyped request argument: {}", field)
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<CodecError> for std::io::Error {
    fn from(err: CodecError) -> std::io::Error {
        let kind = match &err {
            CodecError::Unauthorized => std::io::ErrorKind::PermissionDenied,
            CodecError::Disabled | CodecError::OldServer => std::io::ErrorKind::Unsupported,
            CodecError::ArgumentMismatch { .. } => std::io::ErrorKind::InvalidInput,
            CodecError::NewServer
            | CodecError::UnexpectedStatus { .. }
            | CodecError::UnknownResponseCode { .. }
            | CodecError::InvalidResponse { .. } => std::io::ErrorKind::InvalidData,
        };
        std::io::Error::new(kind, err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}
