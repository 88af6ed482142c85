// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

/*!
Client for the chronyd command and monitoring protocol.

Opens a socket to a running daemon and fetches monitoring reports
(`tracking`, `sources`, `sourcestats`, `ntpdata`, ...) record by record,
exposing each record's fields by name, type and value.

# Example
Print every field of the daemon's tracking report.

```rust,no_run
use cmdmon_client::config::DEFAULT_RESPONSE_TIMEOUT;
use cmdmon_client::driver::fetch_record;
use cmdmon_client::{Session, open_socket};

fn main() -> std::io::Result<()> {
    let mut session = Session::new(open_socket(None)?);
    fetch_record(&mut session, "tracking", 0, DEFAULT_RESPONSE_TIMEOUT)?;
    for i in 0..session.record_number_fields() {
        let name = session.field_name(i).unwrap_or("?");
        match session.field_value(i) {
            Some(value) => println!("{name}: {value}"),
            None => println!("{name}: -"),
        }
    }
    Ok(())
}
```

The session is non-blocking and can be driven from any event loop that can
wait for a file descriptor; [`driver`] provides a simple blocking loop.
*/

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Re-export protocol types from cmdmon_proto for convenience.
pub use cmdmon_proto::{message, protocol, reports};

/// Connection defaults and server address parsing.
pub mod config;

/// Blocking request helpers built on `poll(2)`.
pub mod driver;

/// Random source for sequence numbers and socket directory names.
pub mod entropy;

/// Error types for sessions, transports and the blocking driver.
pub mod error;

/// The client session state machine.
pub mod session;

/// Socket bootstrap for Unix domain and UDP connections.
pub mod socket;

/// Datagram transport abstraction.
pub mod transport;

pub use session::{FollowUp, Session, SessionState};
pub use socket::{ControlSocket, open_socket, open_socket_with};
pub use transport::Transport;
