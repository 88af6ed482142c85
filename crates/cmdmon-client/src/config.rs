// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Connection defaults and server address parsing.
//!
//! A server is reached either through a Unix domain socket (any address
//! starting with `/`) or over UDP. Network addresses accept `host`,
//! `host:port` and `[v6host]:port`; a bare IPv6 literal is recognized by its
//! colon count.
//!
//! ```
//! use std::net::SocketAddr;
//! use cmdmon_client::config::SocketTarget;
//!
//! let target: SocketTarget = "[::1]:5323".parse().unwrap();
//! assert_eq!(target, SocketTarget::Inet("[::1]:5323".parse::<SocketAddr>().unwrap()));
//!
//! let target: SocketTarget = "/run/chrony/chronyd.sock".parse().unwrap();
//! assert!(matches!(target, SocketTarget::Unix(_)));
//! ```

use std::fmt;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Well-known path of the daemon's command socket.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/chrony/chronyd.sock";

/// UDP port used when an address names none.
pub const DEFAULT_PORT: u16 = cmdmon_proto::protocol::PORT;

/// Recommended wait for each response.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Prefix of the private directory holding a client's Unix socket.
pub const CLIENT_DIR_PREFIX: &str = "cmdmon.";

/// Longest address string accepted.
const MAX_ADDRESS_LEN: usize = 255;

/// Where to reach the server.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SocketTarget {
    /// Unix domain datagram socket at this path.
    Unix(PathBuf),
    /// UDP endpoint.
    Inet(SocketAddr),
}

impl SocketTarget {
    /// Targets tried in order when no address is given.
    pub fn defaults() -> Vec<SocketTarget> {
        vec![
            SocketTarget::Unix(PathBuf::from(DEFAULT_SOCKET_PATH)),
            SocketTarget::Inet(SocketAddr::new(
                IpAddr::V4(Ipv4Addr::LOCALHOST),
                DEFAULT_PORT,
            )),
            SocketTarget::Inet(SocketAddr::new(
                IpAddr::V6(Ipv6Addr::LOCALHOST),
                DEFAULT_PORT,
            )),
        ]
    }
}

impl FromStr for SocketTarget {
    type Err = io::Error;

    fn from_str(s: &str) -> io::Result<SocketTarget> {
        if s.starts_with('/') {
            return Ok(SocketTarget::Unix(PathBuf::from(s)));
        }
        parse_inet(s).map(SocketTarget::Inet)
    }
}

impl fmt::Display for SocketTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketTarget::Unix(path) => write!(f, "{}", path.display()),
            SocketTarget::Inet(addr) => write!(f, "{addr}"),
        }
    }
}

fn invalid(s: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid server address: {s:?}"),
    )
}

/// Parse a numeric network address with an optional port.
///
/// Exactly one colon separates a port. With three or more colons the string
/// is an IPv6 literal, which carries a port only in the bracketed
/// `[addr]:port` form. Host names are not resolved.
pub fn parse_inet(s: &str) -> io::Result<SocketAddr> {
    if s.len() > MAX_ADDRESS_LEN {
        return Err(invalid(s));
    }

    let colons = s.bytes().filter(|&b| b == b':').count();
    let mut host = s;
    let mut port = DEFAULT_PORT;

    if colons == 1 || (colons >= 3 && s.starts_with('[')) {
        let idx = s.rfind(':').ok_or_else(|| invalid(s))?;
        if idx == 0 || idx + 1 == s.len() {
            return Err(invalid(s));
        }
        host = &s[..idx];
        if colons >= 3 && host.ends_with(']') {
            host = &host[1..host.len() - 1];
        }
        port = s[idx + 1..].parse().map_err(|_| invalid(s))?;
    }

    if let Ok(v4) = host.parse::<Ipv4Addr>() {
        return Ok(SocketAddr::new(IpAddr::V4(v4), port));
    }
    if let Ok(v6) = host.parse::<Ipv6Addr>() {
        return Ok(SocketAddr::new(IpAddr::V6(v6), port));
    }
    Err(invalid(s))
}
