// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! One client conversation with the daemon.
//!
//! A [`Session`] never blocks. Each request operation sends at most one
//! datagram; [`Session::process_response`] performs a single non-blocking
//! receive. The caller waits for the socket to become readable between
//! calls for as long as [`Session::needs_response`] returns `true` (see
//! [`crate::driver`] for a blocking loop that does this).
//!
//! Reports keyed by a source address (`ntpdata`, `authdata`) are fetched by
//! record index like the others. The session first looks up the address in
//! the `sourcestats` report and then issues the real request itself, so such
//! a fetch takes two response cycles.
//!
//! ```no_run
//! use cmdmon_client::driver::wait_for_response;
//! use cmdmon_client::config::DEFAULT_RESPONSE_TIMEOUT;
//! use cmdmon_client::{Session, open_socket};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(open_socket(None)?);
//! session.request_report_number_records("sources")?;
//! wait_for_response(&mut session, DEFAULT_RESPONSE_TIMEOUT)?;
//! for record in 0..session.report_number_records() {
//!     session.request_record("sources", record)?;
//!     wait_for_response(&mut session, DEFAULT_RESPONSE_TIMEOUT)?;
//!     for field in 0..session.record_number_fields() {
//!         if let (Some(name), Some(value)) = (session.field_name(field), session.field_value(field)) {
//!             println!("{name}: {value}");
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::io;

use log::{debug, trace};

use crate::entropy::{Entropy, OsEntropy, random_u32};
use crate::error::{ClientError, TransportError, UsageError};
use crate::transport::Transport;
use cmdmon_proto::message::{Message, RequestArg};
use cmdmon_proto::protocol::{
    ADDRESS_LEN, Address, Content, FieldValue, Report, Request, Response, Timespec, ValueType,
    WireType,
};
use cmdmon_proto::reports::{self, SOURCESTATS, SOURCESTATS_ADDRESS_FIELD};

/// Progress of the current exchange.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SessionState {
    /// No request has been sent, or the last one failed to go out.
    Idle,
    /// A request is outstanding.
    RequestSent,
    /// A matching datagram arrived but was rejected.
    ResponseReceived,
    /// The response was accepted and its fields can be read.
    ResponseAccepted,
}

/// What happens once the current response is accepted.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FollowUp {
    /// The response is the record the caller asked for.
    Direct,
    /// The response is a `sourcestats` lookup; the record of `report` is
    /// requested next using the address it contains.
    AwaitingAddressLookup {
        /// Report originally requested.
        report: &'static Report,
    },
}

/// Client side of one conversation with the daemon over a datagram socket.
///
/// Request and response buffers are reused: values read from the response
/// are valid until the next request is issued.
pub struct Session<T, R = OsEntropy> {
    transport: T,
    entropy: R,
    state: SessionState,
    request: Message,
    response: Message,
    expected: &'static [Response],
    count_requested: bool,
    requested_record: u32,
    follow_up: FollowUp,
    num_records: u32,
}

impl<T: Transport> Session<T> {
    /// Create a session drawing sequence numbers from the OS random source.
    pub fn new(transport: T) -> Self {
        Session::with_entropy(transport, OsEntropy)
    }
}

impl<T: Transport, R: Entropy> Session<T, R> {
    /// Create a session with a caller-supplied random source.
    pub fn with_entropy(transport: T, entropy: R) -> Self {
        Session {
            transport,
            entropy,
            state: SessionState::Idle,
            request: Message::new(),
            response: Message::new(),
            expected: &[],
            count_requested: false,
            requested_record: 0,
            follow_up: FollowUp::Direct,
            num_records: 0,
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the session, returning its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Current state of the exchange.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Pending action after the current response.
    pub fn follow_up(&self) -> FollowUp {
        self.follow_up
    }

    /// Returns `true` while a request is outstanding; the caller should wait
    /// for the socket to become readable and call
    /// [`process_response`](Self::process_response).
    pub fn needs_response(&self) -> bool {
        self.state == SessionState::RequestSent
    }

    /// Ask how many records `report` has.
    ///
    /// Single-record reports need no exchange: the count becomes 1 and
    /// nothing is sent.
    pub fn request_report_number_records(&mut self, report: &str) -> Result<(), ClientError> {
        self.follow_up = FollowUp::Direct;
        let report = find_report(report)?;

        let Some(count) = report.count.as_ref() else {
            self.num_records = 1;
            return Ok(());
        };

        self.send_request(report, &count.request, &[], count.responses)?;
        self.count_requested = true;
        self.num_records = 0;
        Ok(())
    }

    /// Record count obtained by the last
    /// [`request_report_number_records`](Self::request_report_number_records).
    pub fn report_number_records(&self) -> u32 {
        self.num_records
    }

    /// Request record `record` of `report`.
    ///
    /// For address-keyed reports this starts with a `sourcestats` lookup
    /// unless the last accepted response already is that lookup for the
    /// same record. If the source turns out to be a reference clock, which
    /// has no address, the record is empty and nothing more is sent.
    pub fn request_record(&mut self, report: &str, record: u32) -> Result<(), ClientError> {
        self.follow_up = FollowUp::Direct;
        let report = find_report(report)?;

        match report.record.request.fields.first().map(|f| f.wire) {
            None => {
                if record != 0 {
                    return Err(UsageError::InvalidRecord {
                        report: report.name,
                        record,
                    }
                    .into());
                }
                self.send_record_request(report, &[], record)
            }
            Some(WireType::Address) => {
                if !self.holds_address_lookup(record) {
                    let sourcestats = find_report(SOURCESTATS)?;
                    debug!(
                        "{}: looking up address of record {} in {}",
                        report.name, record, SOURCESTATS
                    );
                    self.send_record_request(sourcestats, &[RequestArg::Uint32(record)], record)?;
                    self.follow_up = FollowUp::AwaitingAddressLookup { report };
                    return Ok(());
                }

                let Some(raw) = self.response.field_address_record(SOURCESTATS_ADDRESS_FIELD)
                else {
                    self.response.clear_fields();
                    return Ok(());
                };
                if Address::from_record(raw).is_none() {
                    debug!(
                        "{}: record {} is a reference clock, no address to query",
                        report.name, record
                    );
                    self.response.clear_fields();
                    return Ok(());
                }

                let mut address = [0u8; ADDRESS_LEN];
                address.copy_from_slice(raw);
                self.send_record_request(report, &[RequestArg::Address(address)], record)
            }
            Some(_) => self.send_record_request(report, &[RequestArg::Uint32(record)], record),
        }
    }

    /// Receive and check one datagram.
    ///
    /// Returns `Ok` without a state change when nothing has arrived yet or
    /// when the datagram does not answer the outstanding request. Once the
    /// response is accepted its fields can be read. If it was an address
    /// lookup, the real request is sent and a further response is needed.
    pub fn process_response(&mut self) -> Result<(), ClientError> {
        if self.state != SessionState::RequestSent {
            return Err(UsageError::UnexpectedCall.into());
        }

        self.response.set_len(0);
        self.response.buffer_mut().fill(0);
        let len = match self.transport.recv(self.response.buffer_mut()) {
            Ok(len) => len,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(()),
            Err(e) => return Err(TransportError::Recv(e).into()),
        };
        self.response.set_len(len);

        if !self.request.is_response_valid(&self.response) {
            debug!(
                "ignoring {} byte datagram not matching request {:#010x}",
                len,
                self.request.sequence()
            );
            return Ok(());
        }

        self.state = SessionState::ResponseReceived;
        if let Err(e) = self.response.process_response(self.expected) {
            debug!(
                "response to command {} rejected: {}",
                self.request.command(),
                e
            );
            return Err(e.into());
        }
        self.state = SessionState::ResponseAccepted;
        trace!(
            "accepted response code {} with {} fields",
            self.response.reply(),
            self.response.num_fields()
        );

        if self.count_requested {
            self.num_records = u32::try_from(self.response.field_uinteger(0)).unwrap_or(u32::MAX);
        }

        if let FollowUp::AwaitingAddressLookup { report } = self.follow_up {
            debug!(
                "{}: address lookup complete, requesting record {}",
                report.name, self.requested_record
            );
            return self.request_record(report.name, self.requested_record);
        }

        Ok(())
    }

    /// Number of readable fields in the accepted response.
    pub fn record_number_fields(&self) -> usize {
        self.response.num_fields()
    }

    /// Name of field `index` of the accepted response.
    pub fn field_name(&self, index: usize) -> Option<&'static str> {
        self.response.field_name(index)
    }

    /// Index of the first field named `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.response.field_index(name)
    }

    /// Value classification of field `index`.
    pub fn field_type(&self, index: usize) -> ValueType {
        self.response.field_type(index)
    }

    /// Meaning of field `index`.
    pub fn field_content(&self, index: usize) -> Content {
        self.response.field_content(index)
    }

    /// Unsigned integer value of field `index`, or 0.
    pub fn field_uinteger(&self, index: usize) -> u64 {
        self.response.field_uinteger(index)
    }

    /// Signed integer value of field `index`, or 0.
    pub fn field_integer(&self, index: usize) -> i64 {
        self.response.field_integer(index)
    }

    /// Floating-point value of field `index`, or NaN.
    pub fn field_float(&self, index: usize) -> f64 {
        self.response.field_float(index)
    }

    /// Timestamp value of field `index`, or zero.
    pub fn field_timespec(&self, index: usize) -> Timespec {
        self.response.field_timespec(index)
    }

    /// Address value of field `index`.
    pub fn field_address(&self, index: usize) -> Option<Address> {
        self.response.field_address(index)
    }

    /// Name of the constant `value` of field `index`.
    pub fn field_constant_name(&self, index: usize, value: u64) -> Option<&'static str> {
        self.response.field_constant_name(index, value)
    }

    /// Typed value of field `index`.
    pub fn field_value(&self, index: usize) -> Option<FieldValue> {
        self.response.field_value(index)
    }

    /// The last request sent.
    pub fn request(&self) -> &Message {
        &self.request
    }

    /// The last response received.
    pub fn response(&self) -> &Message {
        &self.response
    }

    fn holds_address_lookup(&self, record: u32) -> bool {
        self.state == SessionState::ResponseAccepted
            && reports::is_report_fields(SOURCESTATS, self.response.fields())
            && self.requested_record == record
    }

    fn send_record_request(
        &mut self,
        report: &'static Report,
        args: &[RequestArg],
        record: u32,
    ) -> Result<(), ClientError> {
        self.send_request(
            report,
            &report.record.request,
            args,
            report.record.responses,
        )?;
        self.count_requested = false;
        self.requested_record = record;
        Ok(())
    }

    fn send_request(
        &mut self,
        report: &Report,
        request: &Request,
        args: &[RequestArg],
        expected: &'static [Response],
    ) -> Result<(), ClientError> {
        let sequence = match random_u32(&mut self.entropy) {
            Ok(sequence) => sequence,
            Err(e) => {
                self.state = SessionState::Idle;
                return Err(TransportError::Random(e).into());
            }
        };

        if let Err(e) = self
            .request
            .format_request(sequence, request, args, expected)
        {
            self.state = SessionState::Idle;
            return Err(e.into());
        }

        if let Err(e) = self.transport.send(self.request.as_bytes()) {
            self.state = SessionState::Idle;
            return Err(TransportError::Send(e).into());
        }

        debug!(
            "{}: sent command {} seq {:#010x} ({} bytes)",
            report.name,
            request.code,
            sequence,
            self.request.len()
        );
        self.expected = expected;
        self.state = SessionState::RequestSent;
        Ok(())
    }
}

fn find_report(name: &str) -> Result<&'static Report, UsageError> {
    reports::find(name).ok_or_else(|| UsageError::UnknownReport {
        name: name.to_string(),
    })
}
