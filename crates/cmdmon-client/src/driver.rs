// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Blocking helpers that run a session until its response arrives.
//!
//! The session itself never waits. These functions poll the session's
//! socket for readability and feed each datagram to
//! [`Session::process_response`] until no response is outstanding.

// poll(2) on the session's descriptor.
#![allow(unsafe_code)]

use std::io;
use std::os::fd::{AsFd, AsRawFd, RawFd};
use std::time::{Duration, Instant};

use log::debug;

use crate::entropy::Entropy;
use crate::error::{DriverError, TimeoutError};
use crate::session::Session;
use crate::transport::Transport;

/// Process datagrams until the session needs no further response.
///
/// Each wait is limited to `timeout`, measured on a monotonic clock and
/// restarted whenever the session has processed a datagram, so that an
/// automatic follow-up request gets a full wait of its own. A timeout too
/// large to represent as a deadline (such as [`Duration::MAX`]) waits
/// without limit.
pub fn wait_for_response<T, R>(
    session: &mut Session<T, R>,
    timeout: Duration,
) -> Result<(), DriverError>
where
    T: Transport + AsFd,
    R: Entropy,
{
    while session.needs_response() {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let remaining = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        debug!("no response within {timeout:?}");
                        return Err(TimeoutError::Response.into());
                    }
                    Some(remaining)
                }
                None => None,
            };
            if poll_readable(session.transport().as_fd().as_raw_fd(), remaining)? {
                break;
            }
        }
        session.process_response()?;
    }
    Ok(())
}

/// Fetch the number of records of `report`.
pub fn fetch_record_count<T, R>(
    session: &mut Session<T, R>,
    report: &str,
    timeout: Duration,
) -> Result<u32, DriverError>
where
    T: Transport + AsFd,
    R: Entropy,
{
    session.request_report_number_records(report)?;
    wait_for_response(session, timeout)?;
    Ok(session.report_number_records())
}

/// Fetch record `record` of `report`; its fields are then readable from the
/// session.
pub fn fetch_record<T, R>(
    session: &mut Session<T, R>,
    report: &str,
    record: u32,
    timeout: Duration,
) -> Result<(), DriverError>
where
    T: Transport + AsFd,
    R: Entropy,
{
    session.request_record(report, record)?;
    wait_for_response(session, timeout)
}

/// Wait until `fd` is readable, indefinitely if `timeout` is `None`.
/// Returns `false` on timeout or interruption.
fn poll_readable(fd: RawFd, timeout: Option<Duration>) -> io::Result<bool> {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    // Round up so that a sub-millisecond remainder does not spin.
    let millis = match timeout {
        Some(timeout) => {
            timeout.as_micros().div_ceil(1000).min(libc::c_int::MAX as u128) as libc::c_int
        }
        None => -1,
    };

    let ret = unsafe { libc::poll(&mut pfd, 1, millis) };
    if ret < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err);
    }
    Ok(ret > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::net::UnixDatagram;

    #[test]
    fn test_poll_readable() {
        let (a, b) = UnixDatagram::pair().unwrap();
        assert!(!poll_readable(b.as_raw_fd(), Some(Duration::from_millis(10))).unwrap());
        a.send(b"x").unwrap();
        assert!(poll_readable(b.as_raw_fd(), Some(Duration::from_millis(10))).unwrap());
    }

    #[test]
    fn test_poll_readable_without_timeout() {
        let (a, b) = UnixDatagram::pair().unwrap();
        a.send(b"x").unwrap();
        assert!(poll_readable(b.as_raw_fd(), None).unwrap());
    }

    #[test]
    fn test_idle_session_returns_immediately() {
        let (a, _b) = UnixDatagram::pair().unwrap();
        let mut session = Session::new(a);
        wait_for_response(&mut session, Duration::from_millis(1)).unwrap();
    }

    #[test]
    fn test_timeout() {
        let (a, _b) = UnixDatagram::pair().unwrap();
        a.set_nonblocking(true).unwrap();
        let mut session = Session::new(a);
        session.request_record("tracking", 0).unwrap();
        let start = Instant::now();
        let err = wait_for_response(&mut session, Duration::from_millis(50)).unwrap_err();
        assert!(matches!(err, DriverError::Timeout(TimeoutError::Response)));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(session.needs_response());
    }
}
