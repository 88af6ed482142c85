// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Tests for error type downcasting through the io::Error boundary.

use std::io;

use cmdmon_client::error::{
    ClientError, CodecError, DriverError, TimeoutError, TransportError, UsageError,
};

#[test]
fn test_protocol_error_roundtrip() {
    let err = ClientError::Protocol(CodecError::InvalidResponse {
        needed: 104,
        available: 40,
    });
    let io_err: io::Error = err.into();

    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);

    let inner = io_err
        .get_ref()
        .unwrap()
        .downcast_ref::<ClientError>()
        .unwrap();
    assert!(matches!(
        inner,
        ClientError::Protocol(CodecError::InvalidResponse {
            needed: 104,
            available: 40
        })
    ));
}

#[test]
fn test_usage_error_roundtrip() {
    let err = ClientError::Usage(UsageError::UnknownReport {
        name: "clients".to_string(),
    });
    let io_err: io::Error = err.into();

    assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);

    let inner = io_err
        .get_ref()
        .unwrap()
        .downcast_ref::<ClientError>()
        .unwrap();
    assert!(matches!(
        inner,
        ClientError::Usage(UsageError::UnknownReport { name }) if name == "clients"
    ));
}

#[test]
fn test_transport_error_keeps_kind() {
    let err = ClientError::Transport(TransportError::Send(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "denied",
    )));
    let io_err: io::Error = err.into();
    assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
    assert!(io_err.to_string().contains("denied"));
}

#[test]
fn test_timeout_error_roundtrip() {
    let io_err: io::Error = DriverError::Timeout(TimeoutError::Response).into();

    assert_eq!(io_err.kind(), io::ErrorKind::TimedOut);

    let inner = io_err
        .get_ref()
        .unwrap()
        .downcast_ref::<TimeoutError>()
        .unwrap();
    assert_eq!(*inner, TimeoutError::Response);
}

#[test]
fn test_driver_wraps_client_error() {
    let err: DriverError = ClientError::Protocol(CodecError::NewServer).into();
    let io_err: io::Error = err.into();
    assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    let inner = io_err
        .get_ref()
        .unwrap()
        .downcast_ref::<ClientError>()
        .unwrap();
    assert!(matches!(inner, ClientError::Protocol(e) if e.is_new_server()));
}
