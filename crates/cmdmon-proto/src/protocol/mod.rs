//! Constants and types that precisely match the command and monitoring
//! protocol spoken by chronyd.
//!
//! ### Request header
//!
//! ```ignore
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Version    |     Type      |           Reserved            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |         Request code          |            Unused             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            Sequence                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         Reserved (8)                          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! ### Response header
//!
//! ```ignore
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Version    |     Type      |       Reserved (zero)         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      Echoed request code      |         Response code         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |            Status             |          Padding (6)          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        Echoed sequence                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          Padding (8)                          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Every field payload follows the header in network byte order.

/// Default UDP port of the command and monitoring service.
pub const PORT: u16 = 323;

/// Protocol version carried in the first byte of every packet.
pub const PROTOCOL_VERSION: u8 = 6;

/// Packet type of a request.
pub const PKT_TYPE_REQUEST: u8 = 1;

/// Packet type of a response.
pub const PKT_TYPE_RESPONSE: u8 = 2;

/// Request header length in bytes.
pub const REQUEST_HEADER_LEN: usize = 20;

/// Response header length in bytes.
pub const RESPONSE_HEADER_LEN: usize = 28;

/// Size of the message buffers used for requests and responses.
pub const MAX_MESSAGE_LEN: usize = 1024;

/// Header offsets shared by requests and responses.
pub mod offsets {
    /// Protocol version byte.
    pub const VERSION: usize = 0;
    /// Packet type byte.
    pub const PKT_TYPE: usize = 1;
    /// Two reserved bytes that must be zero in responses.
    pub const RESERVED: usize = 2;
    /// Request code (echoed in responses).
    pub const COMMAND: usize = 4;
    /// Response code.
    pub const REPLY: usize = 6;
    /// Response status.
    pub const STATUS: usize = 8;
    /// Sequence number in a request.
    pub const REQUEST_SEQUENCE: usize = 8;
    /// Echoed sequence number in a response.
    pub const RESPONSE_SEQUENCE: usize = 16;
}

/// Response status codes with a defined meaning for this client.
pub mod status {
    /// Request processed.
    pub const SUCCESS: u16 = 0;
    /// Request not authorized.
    pub const UNAUTH: u16 = 2;
    /// Request code unknown to the server.
    pub const INVALID: u16 = 3;
    /// Feature not enabled.
    pub const NOT_ENABLED: u16 = 6;
    /// No real-time clock support.
    pub const NO_RTC: u16 = 13;
    /// Packet version not supported.
    pub const BAD_PKT_VERSION: u16 = 18;
    /// Packet length not supported.
    pub const BAD_PKT_LENGTH: u16 = 19;
}

/// Compact 32-bit floating-point encoding.
pub mod float;

mod types;
mod values;

pub use self::types::*;
pub use self::values::*;
