// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::error::CodecError;
use crate::protocol::{
    ADDRESS_LEN, Address, Content, Field, FieldValue, MAX_MESSAGE_LEN, PKT_TYPE_REQUEST,
    PKT_TYPE_RESPONSE, PROTOCOL_VERSION, REQUEST_HEADER_LEN, RESPONSE_HEADER_LEN, Request,
    Response, Timespec, ValueType, WireType, fields_len, float, offsets, status,
};

/// A request argument. Requests only ever carry record indices and addresses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RequestArg {
    /// 32-bit unsigned value, typically a record index.
    Uint32(u32),
    /// Raw 20-byte address record.
    Address([u8; ADDRESS_LEN]),
}

impl RequestArg {
    fn matches(&self, wire: &WireType) -> bool {
        matches!(
            (self, wire),
            (RequestArg::Uint32(_), WireType::Uint32) | (RequestArg::Address(_), WireType::Address)
        )
    }
}

/// A request or response datagram together with the field layout that
/// governs its payload.
///
/// The same type is used for both directions; the packet type byte decides
/// whether field offsets are counted from the request or the response header.
/// Field accessors never panic: an index at or past [`Message::num_fields`],
/// or an accessor that does not match the field's resolved type, yields a
/// neutral value (zero, NaN or `None`).
#[derive(Clone)]
pub struct Message {
    buf: [u8; MAX_MESSAGE_LEN],
    len: usize,
    fields: &'static [Field],
    num_fields: usize,
}

impl Default for Message {
    fn default() -> Self {
        Message::new()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("len", &self.len)
            .field("num_fields", &self.num_fields)
            .field("header", &self.as_bytes().get(..REQUEST_HEADER_LEN))
            .finish()
    }
}

impl Message {
    /// An empty message with no field layout.
    pub const fn new() -> Self {
        Message {
            buf: [0; MAX_MESSAGE_LEN],
            len: 0,
            fields: &[],
            num_fields: 0,
        }
    }

    /// A message holding a copy of `data`, truncated to the buffer size.
    /// No field layout is attached until [`Message::process_response`].
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut msg = Message::new();
        let len = data.len().min(MAX_MESSAGE_LEN);
        msg.buf[..len].copy_from_slice(&data[..len]);
        msg.len = len;
        msg
    }

    /// The datagram bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Datagram length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the message holds no datagram.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The whole buffer, for receiving a datagram in place. Follow with
    /// [`Message::set_len`].
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Set the datagram length after receiving into [`Message::buffer_mut`].
    ///
    /// The previous field layout no longer applies and is dropped.
    pub fn set_len(&mut self, len: usize) {
        self.len = len.min(MAX_MESSAGE_LEN);
        self.clear_fields();
    }

    /// Field layout governing the payload.
    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Number of fields that may be read.
    pub fn num_fields(&self) -> usize {
        self.num_fields
    }

    /// Detach the field layout so that no field can be read.
    pub fn clear_fields(&mut self) {
        self.fields = &[];
        self.num_fields = 0;
    }

    /// Packet type byte.
    pub fn packet_type(&self) -> u8 {
        self.buf[offsets::PKT_TYPE]
    }

    /// Request code (echoed in responses).
    pub fn command(&self) -> u16 {
        BigEndian::read_u16(&self.buf[offsets::COMMAND..])
    }

    /// Response code. Meaningless for requests.
    pub fn reply(&self) -> u16 {
        BigEndian::read_u16(&self.buf[offsets::REPLY..])
    }

    /// Response status. Meaningless for requests.
    pub fn status(&self) -> u16 {
        BigEndian::read_u16(&self.buf[offsets::STATUS..])
    }

    /// Sequence number, read from the request or response header position.
    pub fn sequence(&self) -> u32 {
        let offset = if self.is_response() {
            offsets::RESPONSE_SEQUENCE
        } else {
            offsets::REQUEST_SEQUENCE
        };
        BigEndian::read_u32(&self.buf[offset..])
    }

    fn is_response(&self) -> bool {
        self.buf[offsets::PKT_TYPE] == PKT_TYPE_RESPONSE
    }

    fn header_len(&self) -> usize {
        if self.is_response() {
            RESPONSE_HEADER_LEN
        } else {
            REQUEST_HEADER_LEN
        }
    }

    /// Build a request datagram.
    ///
    /// `args` supplies one value per field of `request`, in order; extra
    /// values are ignored. The datagram is padded to the longest of
    /// `expected` so that the server never has to truncate its reply.
    pub fn format_request(
        &mut self,
        sequence: u32,
        request: &Request,
        args: &[RequestArg],
        expected: &[Response],
    ) -> Result<(), CodecError> {
        for (i, field) in request.fields.iter().enumerate() {
            if !args.get(i).is_some_and(|arg| arg.matches(&field.wire)) {
                return Err(CodecError::ArgumentMismatch { field: field.name });
            }
        }

        self.buf = [0; MAX_MESSAGE_LEN];
        self.buf[offsets::VERSION] = PROTOCOL_VERSION;
        self.buf[offsets::PKT_TYPE] = PKT_TYPE_REQUEST;
        BigEndian::write_u16(&mut self.buf[offsets::COMMAND..], request.code);
        BigEndian::write_u32(&mut self.buf[offsets::REQUEST_SEQUENCE..], sequence);

        let mut pos = REQUEST_HEADER_LEN;
        for (field, arg) in request.fields.iter().zip(args) {
            match arg {
                RequestArg::Uint32(value) => BigEndian::write_u32(&mut self.buf[pos..], *value),
                RequestArg::Address(record) => {
                    self.buf[pos..pos + ADDRESS_LEN].copy_from_slice(record)
                }
            }
            pos += field.wire.size();
        }

        let max_response = expected.iter().map(Response::datagram_len).max().unwrap_or(0);
        self.len = pos.max(max_response);
        self.fields = request.fields;
        self.num_fields = request.fields.len();
        Ok(())
    }

    /// Returns `true` if `response` answers this request.
    ///
    /// Anything else (a reply to an abandoned request, a duplicate or a
    /// spoofed datagram) is to be dropped silently.
    pub fn is_response_valid(&self, response: &Message) -> bool {
        let resp = &response.buf;
        response.len >= RESPONSE_HEADER_LEN
            && resp[offsets::VERSION] == PROTOCOL_VERSION
            && resp[offsets::PKT_TYPE] == PKT_TYPE_RESPONSE
            && resp[offsets::RESERVED] == 0
            && resp[offsets::RESERVED + 1] == 0
            && resp[offsets::COMMAND..offsets::COMMAND + 2]
                == self.buf[offsets::COMMAND..offsets::COMMAND + 2]
            && resp[offsets::RESPONSE_SEQUENCE..offsets::RESPONSE_SEQUENCE + 4]
                == self.buf[offsets::REQUEST_SEQUENCE..offsets::REQUEST_SEQUENCE + 4]
    }

    /// Check the status of a valid response and attach the layout of the
    /// first expected response with a matching code.
    ///
    /// On any error the message has no readable fields.
    pub fn process_response(&mut self, expected: &[Response]) -> Result<(), CodecError> {
        self.clear_fields();

        match self.status() {
            status::SUCCESS => {}
            status::UNAUTH => return Err(CodecError::Unauthorized),
            status::INVALID => return Err(CodecError::OldServer),
            status::NOT_ENABLED | status::NO_RTC => return Err(CodecError::Disabled),
            status::BAD_PKT_VERSION | status::BAD_PKT_LENGTH => {
                return Err(CodecError::NewServer);
            }
            other => return Err(CodecError::UnexpectedStatus { status: other }),
        }

        let code = self.reply();
        let response = expected
            .iter()
            .find(|r| r.code == code)
            .ok_or(CodecError::UnknownResponseCode { code })?;

        let needed = self.header_len() + fields_len(response.fields);
        if self.len < needed {
            return Err(CodecError::InvalidResponse {
                needed,
                available: self.len,
            });
        }

        self.fields = response.fields;
        self.num_fields = response.fields.len();
        Ok(())
    }

    /// Byte offset of field `index` within the datagram.
    pub fn field_position(&self, index: usize) -> Option<usize> {
        if index >= self.num_fields {
            return None;
        }
        Some(self.header_len() + fields_len(&self.fields[..index]))
    }

    /// Wire type of field `index` after resolving context-dependent fields.
    pub fn resolve_field_type(&self, index: usize) -> Option<WireType> {
        let field = self.field(index)?;
        match field.wire {
            WireType::AddressOrUint32(sel) => {
                if self.field_uinteger(sel.selector) == sel.value {
                    Some(WireType::Uint32)
                } else {
                    Some(WireType::Address)
                }
            }
            wire => Some(wire),
        }
    }

    /// Public classification of field `index`.
    pub fn field_type(&self, index: usize) -> ValueType {
        self.resolve_field_type(index)
            .map_or(ValueType::None, |wire| wire.value_type())
    }

    /// Name of field `index` after resolving context-dependent fields.
    pub fn field_name(&self, index: usize) -> Option<&'static str> {
        let field = self.field(index)?;
        match field.wire {
            WireType::AddressOrUint32(sel)
                if self.resolve_field_type(index) == Some(WireType::Uint32) =>
            {
                Some(sel.integer_name)
            }
            _ => Some(field.name),
        }
    }

    /// Content tag of field `index`.
    ///
    /// An address field without an address reports [`Content::None`].
    pub fn field_content(&self, index: usize) -> Content {
        let Some(field) = self.field(index) else {
            return Content::None;
        };

        let content = match field.wire {
            WireType::AddressOrUint32(_) => match self.resolve_field_type(index) {
                Some(WireType::Address) => Content::Address,
                _ => Content::ReferenceId,
            },
            _ => field.content,
        };

        if content == Content::Address && self.field_address(index).is_none() {
            return Content::None;
        }
        content
    }

    /// Index of the first field whose resolved name is `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        (0..self.num_fields).find(|&i| self.field_name(i) == Some(name))
    }

    /// Unsigned value of field `index`, or zero.
    pub fn field_uinteger(&self, index: usize) -> u64 {
        let Some(data) = self.field_data(index) else {
            return 0;
        };
        match self.resolve_field_type(index) {
            Some(WireType::Uint64) => BigEndian::read_u64(data),
            Some(WireType::Uint32) => u64::from(BigEndian::read_u32(data)),
            Some(WireType::Uint16) => u64::from(BigEndian::read_u16(data)),
            Some(WireType::Uint8) => u64::from(data[0]),
            _ => 0,
        }
    }

    /// Signed value of field `index`, or zero.
    pub fn field_integer(&self, index: usize) -> i64 {
        let Some(data) = self.field_data(index) else {
            return 0;
        };
        match self.resolve_field_type(index) {
            Some(WireType::Int16) => i64::from(BigEndian::read_i16(data)),
            Some(WireType::Int8) => i64::from(data[0] as i8),
            _ => 0,
        }
    }

    /// Floating-point value of field `index`, or NaN.
    pub fn field_float(&self, index: usize) -> f64 {
        match (self.field_data(index), self.resolve_field_type(index)) {
            (Some(data), Some(WireType::Float)) => float::decode(BigEndian::read_u32(data)),
            _ => f64::NAN,
        }
    }

    /// Timestamp value of field `index`, or the zero timestamp.
    pub fn field_timespec(&self, index: usize) -> Timespec {
        match (self.field_data(index), self.resolve_field_type(index)) {
            (Some(data), Some(WireType::Timespec)) => {
                Timespec::from_bytes(data).unwrap_or_default()
            }
            _ => Timespec::default(),
        }
    }

    /// Address of field `index`, or `None` if the field holds no address.
    pub fn field_address(&self, index: usize) -> Option<Address> {
        Address::from_record(self.field_address_record(index)?)
    }

    /// Raw 20-byte record of address field `index`, whatever its family.
    pub fn field_address_record(&self, index: usize) -> Option<&[u8]> {
        match self.resolve_field_type(index)? {
            WireType::Address => self.field_data(index),
            _ => None,
        }
    }

    /// Name of the constant equal to `value` in field `index`'s table.
    ///
    /// Flag tables hold single bits; callers test each bit separately.
    pub fn field_constant_name(&self, index: usize, value: u64) -> Option<&'static str> {
        self.field(index)?
            .constants
            .iter()
            .find(|c| u64::from(c.value) == value)
            .map(|c| c.name)
    }

    /// Typed value of field `index`.
    pub fn field_value(&self, index: usize) -> Option<FieldValue> {
        let value = match self.resolve_field_type(index)? {
            WireType::Uint64 | WireType::Uint32 | WireType::Uint16 | WireType::Uint8 => {
                FieldValue::UInteger(self.field_uinteger(index))
            }
            WireType::Int16 | WireType::Int8 => FieldValue::Integer(self.field_integer(index)),
            WireType::Float => FieldValue::Float(self.field_float(index)),
            WireType::Timespec => FieldValue::Timespec(self.field_timespec(index)),
            WireType::Address => FieldValue::Address(self.field_address(index)),
            WireType::AddressOrUint32(_) => return None,
        };
        Some(value)
    }

    fn field(&self, index: usize) -> Option<&'static Field> {
        if index >= self.num_fields {
            return None;
        }
        self.fields.get(index)
    }

    fn field_data(&self, index: usize) -> Option<&[u8]> {
        let pos = self.field_position(index)?;
        let field = self.field(index)?;
        self.buf.get(pos..pos + field.wire.size())
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::protocol::Constant;
    use crate::reports;

    fn response_to(request: &Message, code: u16, status: u16, payload: &[u8]) -> Message {
        let mut data = vec![0u8; RESPONSE_HEADER_LEN];
        data[0] = PROTOCOL_VERSION;
        data[1] = PKT_TYPE_RESPONSE;
        data[4..6].copy_from_slice(&request.command().to_be_bytes());
        data[6..8].copy_from_slice(&code.to_be_bytes());
        data[8..10].copy_from_slice(&status.to_be_bytes());
        data[16..20].copy_from_slice(&request.sequence().to_be_bytes());
        data.extend_from_slice(payload);
        Message::from_bytes(&data)
    }

    fn tracking_request() -> Message {
        let tracking = reports::find("tracking").unwrap();
        let mut msg = Message::new();
        msg.format_request(
            0xdead_beef,
            &tracking.record.request,
            &[],
            tracking.record.responses,
        )
        .unwrap();
        msg
    }

    #[test]
    fn test_format_request_header() {
        let msg = tracking_request();
        let bytes = msg.as_bytes();
        assert_eq!(bytes[0], 6);
        assert_eq!(bytes[1], 1);
        assert_eq!(&bytes[2..4], &[0, 0]);
        assert_eq!(&bytes[4..6], &[0, 33]);
        assert_eq!(&bytes[8..12], &[0xde, 0xad, 0xbe, 0xef]);
        assert!(bytes[12..].iter().all(|&b| b == 0));
        assert_eq!(msg.sequence(), 0xdead_beef);
        assert_eq!(msg.num_fields(), 0);
    }

    #[test]
    fn test_format_request_padded_to_response() {
        let msg = tracking_request();
        assert_eq!(msg.len(), RESPONSE_HEADER_LEN + 76);
    }

    #[test]
    fn test_format_request_by_index() {
        let sources = reports::find("sources").unwrap();
        let mut msg = Message::new();
        msg.format_request(
            1,
            &sources.record.request,
            &[RequestArg::Uint32(0x0102_0304)],
            sources.record.responses,
        )
        .unwrap();
        assert_eq!(&msg.as_bytes()[20..24], &[1, 2, 3, 4]);
        assert_eq!(msg.num_fields(), 1);
        assert_eq!(msg.field_position(0), Some(REQUEST_HEADER_LEN));
        assert_eq!(msg.field_uinteger(0), 0x0102_0304);
        assert_eq!(msg.len(), RESPONSE_HEADER_LEN + 48);
    }

    #[test]
    fn test_format_request_by_address() {
        let ntpdata = reports::find("ntpdata").unwrap();
        let record = Address::V4([10, 0, 0, 1].into()).to_record();
        let mut msg = Message::new();
        msg.format_request(
            7,
            &ntpdata.record.request,
            &[RequestArg::Address(record)],
            ntpdata.record.responses,
        )
        .unwrap();
        assert_eq!(&msg.as_bytes()[20..40], &record);
        // Padded to the larger of the two ntpdata dialects.
        let longest = ntpdata.record.responses[1].datagram_len();
        assert_eq!(msg.len(), longest);
        assert_eq!(msg.field_address(0).unwrap().to_string(), "10.0.0.1");
    }

    #[test]
    fn test_format_request_argument_mismatch() {
        let sources = reports::find("sources").unwrap();
        let mut msg = Message::new();
        let err = msg
            .format_request(1, &sources.record.request, &[], sources.record.responses)
            .unwrap_err();
        assert_eq!(err, CodecError::ArgumentMismatch { field: "Index" });

        let err = msg
            .format_request(
                1,
                &sources.record.request,
                &[RequestArg::Address([0; ADDRESS_LEN])],
                sources.record.responses,
            )
            .unwrap_err();
        assert_eq!(err, CodecError::ArgumentMismatch { field: "Index" });
    }

    #[test]
    fn test_response_validity() {
        let request = tracking_request();
        let response = response_to(&request, 5, 0, &[0; 76]);
        assert!(request.is_response_valid(&response));

        let mut bytes = response.as_bytes().to_vec();
        for (offset, value) in [(0, 5), (1, 1), (2, 1), (3, 1), (5, 34), (19, 0xee)] {
            let saved = bytes[offset];
            bytes[offset] = value;
            assert!(
                !request.is_response_valid(&Message::from_bytes(&bytes)),
                "offset {}",
                offset
            );
            bytes[offset] = saved;
        }

        assert!(!request.is_response_valid(&Message::from_bytes(&bytes[..27])));
    }

    #[test]
    fn test_process_response_status_table() {
        let request = tracking_request();
        let expected = reports::find("tracking").unwrap().record.responses;
        let cases = [
            (2, CodecError::Unauthorized),
            (3, CodecError::OldServer),
            (6, CodecError::Disabled),
            (13, CodecError::Disabled),
            (18, CodecError::NewServer),
            (19, CodecError::NewServer),
            (1, CodecError::UnexpectedStatus { status: 1 }),
            (7, CodecError::UnexpectedStatus { status: 7 }),
        ];
        for (status, error) in cases {
            let mut response = response_to(&request, 5, status, &[0; 76]);
            assert_eq!(response.process_response(expected), Err(error));
            assert_eq!(response.num_fields(), 0);
        }
    }

    #[test]
    fn test_process_response_unknown_code() {
        let request = tracking_request();
        let expected = reports::find("tracking").unwrap().record.responses;
        let mut response = response_to(&request, 99, 0, &[0; 76]);
        let err = response.process_response(expected).unwrap_err();
        assert_eq!(err, CodecError::UnknownResponseCode { code: 99 });
        assert!(err.is_new_server());
    }

    #[test]
    fn test_process_response_too_short() {
        let request = tracking_request();
        let expected = reports::find("tracking").unwrap().record.responses;
        let mut response = response_to(&request, 5, 0, &[0; 75]);
        assert_eq!(
            response.process_response(expected),
            Err(CodecError::InvalidResponse {
                needed: 104,
                available: 103
            })
        );
        assert_eq!(response.num_fields(), 0);
        assert!(response.field_name(0).is_none());
    }

    #[test]
    fn test_tracking_fields() {
        let request = tracking_request();
        let mut payload = vec![0u8; 76];
        payload[0..4].copy_from_slice(&0xC000_0201u32.to_be_bytes());
        payload[4..24].copy_from_slice(&Address::V4([192, 0, 2, 1].into()).to_record());
        payload[24..26].copy_from_slice(&2u16.to_be_bytes());
        payload[26..28].copy_from_slice(&3u16.to_be_bytes());
        payload[28..40].copy_from_slice(
            &Timespec {
                secs: 1_700_000_000,
                nanos: 250,
            }
            .to_bytes(),
        );
        payload[40..44].copy_from_slice(&float::encode(-0.5).to_be_bytes());

        let mut response = response_to(&request, 5, 0, &payload);
        response
            .process_response(reports::find("tracking").unwrap().record.responses)
            .unwrap();

        assert_eq!(response.num_fields(), 14);
        assert_eq!(response.field_name(0), Some("Reference ID"));
        assert_eq!(response.field_type(0), ValueType::UInteger);
        assert_eq!(response.field_content(0), Content::ReferenceId);
        assert_eq!(response.field_uinteger(0), 0xC000_0201);

        assert_eq!(response.field_type(1), ValueType::String);
        assert_eq!(response.field_address(1).unwrap().to_string(), "192.0.2.1");
        assert_eq!(response.field_content(1), Content::Address);

        assert_eq!(response.field_uinteger(2), 2);
        let leap = response.field_uinteger(3);
        assert_eq!(response.field_constant_name(3, leap), Some("Not synchronized"));
        assert_eq!(response.field_constant_name(3, 9), None);

        assert_eq!(response.field_timespec(4).secs, 1_700_000_000);
        assert_eq!(response.field_timespec(4).nanos, 250);
        assert_eq!(response.field_type(4), ValueType::Timespec);

        assert_eq!(response.field_float(5), -0.5);
        assert_eq!(response.field_type(5), ValueType::Float);
        assert_eq!(response.field_index("Current correction"), Some(5));
        assert_eq!(response.field_index("No such field"), None);
    }

    #[test]
    fn test_out_of_range_and_mismatched_access() {
        let request = tracking_request();
        let mut response = response_to(&request, 5, 0, &[0xff; 76]);
        response
            .process_response(reports::find("tracking").unwrap().record.responses)
            .unwrap();

        assert_eq!(response.field_position(14), None);
        assert_eq!(response.field_type(14), ValueType::None);
        assert_eq!(response.field_content(14), Content::None);
        assert_eq!(response.field_uinteger(14), 0);
        assert!(response.field_float(14).is_nan());
        assert!(response.field_value(14).is_none());

        assert_eq!(response.field_integer(0), 0);
        assert!(response.field_float(0).is_nan());
        assert_eq!(response.field_timespec(0), Timespec::default());
        assert!(response.field_address(0).is_none());
        assert_eq!(response.field_uinteger(5), 0);
    }

    fn sources_response(mode: u16) -> Message {
        let sources = reports::find("sources").unwrap();
        let mut request = Message::new();
        request
            .format_request(
                3,
                &sources.record.request,
                &[RequestArg::Uint32(0)],
                sources.record.responses,
            )
            .unwrap();

        let mut payload = vec![0u8; 48];
        if mode == 2 {
            payload[0..4].copy_from_slice(&0x5050_5300u32.to_be_bytes());
        } else {
            payload[0..20].copy_from_slice(&Address::V4([203, 0, 113, 5].into()).to_record());
        }
        payload[20..22].copy_from_slice(&(-6i16).to_be_bytes());
        payload[26..28].copy_from_slice(&mode.to_be_bytes());

        let mut response = response_to(&request, 3, 0, &payload);
        response.process_response(sources.record.responses).unwrap();
        response
    }

    #[test]
    fn test_sources_address_variant() {
        let response = sources_response(0);
        assert_eq!(response.resolve_field_type(0), Some(WireType::Address));
        assert_eq!(response.field_name(0), Some("Address"));
        assert_eq!(response.field_type(0), ValueType::String);
        assert_eq!(response.field_content(0), Content::Address);
        assert_eq!(response.field_address(0).unwrap().to_string(), "203.0.113.5");
        assert_eq!(response.field_uinteger(0), 0);
    }

    #[test]
    fn test_sources_reference_id_variant() {
        let response = sources_response(2);
        assert_eq!(response.resolve_field_type(0), Some(WireType::Uint32));
        assert_eq!(response.field_name(0), Some("Reference ID"));
        assert_eq!(response.field_type(0), ValueType::UInteger);
        assert_eq!(response.field_content(0), Content::ReferenceId);
        assert_eq!(response.field_uinteger(0), 0x5050_5300);
        assert!(response.field_address(0).is_none());
        assert_eq!(response.field_index("Reference ID"), Some(0));
        assert_eq!(response.field_constant_name(4, 2), Some("Reference clock"));
    }

    #[test]
    fn test_signed_fields_sign_extend() {
        let response = sources_response(0);
        assert_eq!(response.field_type(1), ValueType::Integer);
        assert_eq!(response.field_integer(1), -6);
        assert_eq!(response.field_value(1), Some(FieldValue::Integer(-6)));
    }

    #[test]
    fn test_absent_address_content() {
        let request = tracking_request();
        let mut response = response_to(&request, 5, 0, &[0; 76]);
        response
            .process_response(reports::find("tracking").unwrap().record.responses)
            .unwrap();
        assert_eq!(response.field_content(1), Content::None);
        assert_eq!(response.field_value(1), Some(FieldValue::Address(None)));
        assert_eq!(response.field_address_record(1), Some(&[0u8; ADDRESS_LEN][..]));
    }

    #[test]
    fn test_uint64_fields() {
        let serverstats = reports::find("serverstats").unwrap();
        let mut request = Message::new();
        request
            .format_request(9, &serverstats.record.request, &[], serverstats.record.responses)
            .unwrap();

        let mut payload = vec![0u8; 21 * 8];
        payload[0..8].copy_from_slice(&0x0000_0001_0000_0002u64.to_be_bytes());
        let mut response = response_to(&request, 25, 0, &payload);
        response.process_response(serverstats.record.responses).unwrap();

        assert_eq!(response.num_fields(), 21);
        assert_eq!(response.field_type(0), ValueType::UInteger);
        assert_eq!(response.field_uinteger(0), (1 << 32) | 2);
    }

    #[test]
    fn test_first_matching_dialect_wins() {
        let serverstats = reports::find("serverstats").unwrap();
        let mut request = Message::new();
        request
            .format_request(9, &serverstats.record.request, &[], serverstats.record.responses)
            .unwrap();
        let mut response = response_to(&request, 22, 0, &[0; 32]);
        response.process_response(serverstats.record.responses).unwrap();
        assert_eq!(response.num_fields(), 8);
        assert_eq!(response.field_name(1), Some("Accepted NTS-KE connections"));
    }

    #[test]
    fn test_constant_tables_are_exact_match() {
        static FIELDS: [Field; 1] = [Field::with_constants(
            "Flags",
            WireType::Uint16,
            Content::Flags,
            &[Constant::new(0x1, "a"), Constant::new(0x2, "b")],
        )];
        static RESPONSES: [Response; 1] = [Response {
            code: 1,
            fields: &FIELDS,
        }];
        let request = tracking_request();
        let mut response = response_to(&request, 1, 0, &[0, 3]);
        response.process_response(&RESPONSES).unwrap();
        assert_eq!(response.field_constant_name(0, 3), None);
        assert_eq!(response.field_constant_name(0, 2), Some("b"));
    }

    #[test]
    fn test_set_len_drops_layout() {
        let request = tracking_request();
        let mut response = response_to(&request, 5, 0, &[0; 76]);
        response
            .process_response(reports::find("tracking").unwrap().record.responses)
            .unwrap();
        response.set_len(4096);
        assert_eq!(response.len(), MAX_MESSAGE_LEN);
        assert_eq!(response.num_fields(), 0);
    }
}
