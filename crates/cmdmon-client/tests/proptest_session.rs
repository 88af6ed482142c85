// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

mod common;

use cmdmon_client::SessionState;
use cmdmon_client::config::{SocketTarget, parse_inet};
use cmdmon_proto::reports;
use proptest::prelude::*;

use common::{connect, response};

proptest! {
    /// Whatever arrives, the session either keeps waiting, accepts the
    /// response, or reports an error; it never panics.
    #[test]
    fn arbitrary_datagrams(
        report in 0..reports::report_count(),
        datagrams in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..600), 1..6),
    ) {
        let report = reports::get(report).unwrap();
        let (mut session, peer) = connect();
        session.request_record(report.name, 0).unwrap();
        let _ = peer.recv();
        for datagram in &datagrams {
            peer.send_raw(datagram);
            let result = session.process_response();
            match session.state() {
                SessionState::RequestSent => prop_assert!(result.is_ok()),
                SessionState::ResponseReceived => prop_assert!(result.is_err()),
                SessionState::ResponseAccepted | SessionState::Idle => {}
            }
            if !session.needs_response() {
                break;
            }
        }
    }

    /// A response is only accepted when it echoes the outstanding request.
    #[test]
    fn foreign_sequence_never_accepted(flip in 0usize..4, bit in 0u8..8) {
        let (mut session, peer) = connect();
        session.request_record("activity", 0).unwrap();
        let request = peer.recv();
        let mut datagram = response(&request, 12, 0, &[0; 20]);
        datagram[16 + flip] ^= 1 << bit;
        peer.send_raw(&datagram);
        session.process_response().unwrap();
        prop_assert!(session.needs_response());
    }

    #[test]
    fn address_parsing_never_panics(s in "\\PC{0,64}") {
        let _ = parse_inet(&s);
        let _ = s.parse::<SocketTarget>();
    }

    #[test]
    fn ipv4_with_port(a in any::<[u8; 4]>(), port in any::<u16>()) {
        let ip = std::net::Ipv4Addr::from(a);
        let addr = parse_inet(&format!("{ip}:{port}")).unwrap();
        prop_assert_eq!(addr, std::net::SocketAddr::from((ip, port)));
    }

    #[test]
    fn bracketed_ipv6_with_port(a in any::<[u8; 16]>(), port in any::<u16>()) {
        let ip = std::net::Ipv6Addr::from(a);
        let text = format!("[{ip}]:{port}");
        let addr = parse_inet(&text).unwrap();
        prop_assert_eq!(addr, std::net::SocketAddr::from((ip, port)));
    }
}
