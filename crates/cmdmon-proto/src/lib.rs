// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Wire codec and report registry for the chronyd command and monitoring
//! protocol.
//!
//! This crate provides the static description of every monitoring report the
//! client understands, and the buffer-level logic for building request
//! datagrams and decoding response datagrams. It performs no I/O.
//!
//! ```
//! use cmdmon_proto::message::Message;
//! use cmdmon_proto::reports;
//!
//! let tracking = reports::find("tracking").unwrap();
//! let mut request = Message::new();
//! request
//!     .format_request(0x1234_5678, &tracking.record.request, &[], tracking.record.responses)
//!     .unwrap();
//! assert_eq!(request.as_bytes()[0], cmdmon_proto::protocol::PROTOCOL_VERSION);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Error type for request formatting and response acceptance.
pub mod error;

/// Buffer-level message handling: request formatting, response validation,
/// and typed field extraction.
pub mod message;

/// Protocol constants, field descriptor types, and value encodings.
pub mod protocol;

/// Static registry of supported reports.
pub mod reports;
