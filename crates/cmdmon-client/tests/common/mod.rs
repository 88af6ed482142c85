// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Scripted daemon used by the session tests.

#![allow(dead_code)]

use std::io;
use std::os::unix::net::UnixDatagram;
use std::time::Duration;

use cmdmon_client::Session;
use cmdmon_client::entropy::Entropy;
use cmdmon_proto::protocol::{Address, RESPONSE_HEADER_LEN, fields_len};
use cmdmon_proto::reports;

/// Deterministic sequence numbers: 1, 2, 3, ...
pub struct Counter(pub u32);

impl Entropy for Counter {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.0 = self.0.wrapping_add(1);
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.0.to_ne_bytes()[i % 4];
        }
        Ok(())
    }
}

/// A random source that always fails.
pub struct Exhausted;

impl Entropy for Exhausted {
    fn fill(&mut self, _buf: &mut [u8]) -> io::Result<()> {
        Err(io::Error::other("entropy exhausted"))
    }
}

/// The daemon's end of a socket pair.
pub struct Peer {
    pub sock: UnixDatagram,
}

/// A session connected to a scripted peer.
pub fn connect() -> (Session<UnixDatagram, Counter>, Peer) {
    let (client, server) = UnixDatagram::pair().unwrap();
    client.set_nonblocking(true).unwrap();
    server
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    (
        Session::with_entropy(client, Counter(0)),
        Peer { sock: server },
    )
}

/// A request as seen by the peer.
pub struct Received {
    pub bytes: Vec<u8>,
}

impl Received {
    pub fn command(&self) -> u16 {
        u16::from_be_bytes([self.bytes[4], self.bytes[5]])
    }

    pub fn sequence(&self) -> [u8; 4] {
        self.bytes[8..12].try_into().unwrap()
    }

    /// Request payload following the header.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[20..]
    }

    pub fn index(&self) -> u32 {
        u32::from_be_bytes(self.payload()[..4].try_into().unwrap())
    }
}

impl Peer {
    /// Receive the next request, waiting up to five seconds.
    pub fn recv(&self) -> Received {
        let mut buf = [0u8; 2048];
        let n = self.sock.recv(&mut buf).unwrap();
        Received {
            bytes: buf[..n].to_vec(),
        }
    }

    /// Returns `true` if no request is queued.
    pub fn is_quiet(&self) -> bool {
        self.sock.set_nonblocking(true).unwrap();
        let mut buf = [0u8; 2048];
        let quiet = matches!(
            self.sock.recv(&mut buf),
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock
        );
        self.sock.set_nonblocking(false).unwrap();
        quiet
    }

    /// Answer `request` with the given response code, status and payload.
    pub fn reply(&self, request: &Received, code: u16, status: u16, payload: &[u8]) {
        self.sock
            .send(&response(request, code, status, payload))
            .unwrap();
    }

    pub fn send_raw(&self, bytes: &[u8]) {
        self.sock.send(bytes).unwrap();
    }
}

/// Build a response datagram to `request`.
pub fn response(request: &Received, code: u16, status: u16, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; RESPONSE_HEADER_LEN];
    data[0] = 6;
    data[1] = 2;
    data[4..6].copy_from_slice(&request.bytes[4..6]);
    data[6..8].copy_from_slice(&code.to_be_bytes());
    data[8..10].copy_from_slice(&status.to_be_bytes());
    data[16..20].copy_from_slice(&request.bytes[8..12]);
    data.extend_from_slice(payload);
    data
}

/// A zero payload for the primary response of `report`.
pub fn empty_record(report: &str) -> (u16, Vec<u8>) {
    let layout = &reports::find(report).unwrap().record.responses[0];
    (layout.code, vec![0u8; fields_len(layout.fields)])
}

/// A `sourcestats` record whose address field holds `address`.
pub fn sourcestats_record(address: Option<Address>, samples: u32) -> (u16, Vec<u8>) {
    let (code, mut payload) = empty_record("sourcestats");
    if let Some(address) = address {
        payload[4..24].copy_from_slice(&address.to_record());
    }
    payload[24..28].copy_from_slice(&samples.to_be_bytes());
    (code, payload)
}
