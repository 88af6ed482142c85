use core::fmt;

/// Primitive wire encoding of one field.
///
/// The widths are fixed by the protocol; [`WireType::size`] returns the number
/// of payload bytes a field of this type occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WireType {
    /// Unsigned 64-bit integer, sent as two big-endian 32-bit words.
    Uint64,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 8-bit integer.
    Int8,
    /// Compact 32-bit float, see [`crate::protocol::float`].
    Float,
    /// 20-byte address record.
    Address,
    /// 12-byte timestamp: 64-bit seconds and 32-bit nanoseconds.
    Timespec,
    /// 20-byte record holding either an address or a 32-bit identifier,
    /// depending on a sibling field of the same record.
    AddressOrUint32(&'static AddressSelector),
}

impl WireType {
    /// Number of payload bytes occupied by a field of this type.
    pub const fn size(&self) -> usize {
        match self {
            WireType::Uint64 => 8,
            WireType::Uint32 | WireType::Float => 4,
            WireType::Uint16 | WireType::Int16 => 2,
            WireType::Uint8 | WireType::Int8 => 1,
            WireType::Address | WireType::AddressOrUint32(_) => ADDRESS_LEN,
            WireType::Timespec => TIMESPEC_LEN,
        }
    }

    /// Public classification of the decoded value.
    ///
    /// The context-dependent type has no fixed classification and maps to
    /// [`ValueType::None`]; resolve it against a message first.
    pub const fn value_type(&self) -> ValueType {
        match self {
            WireType::Uint64 | WireType::Uint32 | WireType::Uint16 | WireType::Uint8 => {
                ValueType::UInteger
            }
            WireType::Int16 | WireType::Int8 => ValueType::Integer,
            WireType::Float => ValueType::Float,
            WireType::Address => ValueType::String,
            WireType::Timespec => ValueType::Timespec,
            WireType::AddressOrUint32(_) => ValueType::None,
        }
    }
}

/// Size of an address record on the wire.
pub const ADDRESS_LEN: usize = 20;

/// Size of a timestamp on the wire.
pub const TIMESPEC_LEN: usize = 12;

/// Rule resolving a [`WireType::AddressOrUint32`] field.
///
/// The field is a 32-bit unsigned identifier when the unsigned field at
/// `selector` in the same record equals `value`, and an address otherwise.
#[derive(Debug, Eq, Hash, PartialEq)]
pub struct AddressSelector {
    /// Index of the discriminating sibling field.
    pub selector: usize,
    /// Discriminant value selecting the integer interpretation.
    pub value: u64,
    /// Field name used when the integer interpretation is selected.
    pub integer_name: &'static str,
}

/// Public classification of a field value.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ValueType {
    /// No value (invalid field index or unresolved type).
    #[default]
    None,
    /// Unsigned integer, read with `get_field_uinteger`.
    UInteger,
    /// Signed integer, read with `get_field_integer`.
    Integer,
    /// Floating-point number, read with `get_field_float`.
    Float,
    /// Timestamp, read with `get_field_timespec`.
    Timespec,
    /// Textual value (addresses), read with `get_field_address`.
    String,
}

/// Semantic meaning of a field, independent of its wire type.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Content {
    /// Reserved or unrendered field.
    #[default]
    None,
    /// Number of items.
    Count,
    /// Point in time.
    Time,
    /// Interval as a base-2 logarithm of seconds.
    IntervalLog2Seconds,
    /// Interval in seconds.
    IntervalSeconds,
    /// Offset in seconds.
    OffsetSeconds,
    /// Measured error or delay in seconds.
    MeasureSeconds,
    /// Frequency offset in parts per million.
    OffsetPpm,
    /// Measured frequency error in parts per million.
    MeasurePpm,
    /// Frequency change in parts per million per second.
    OffsetPpmPerSecond,
    /// Dimensionless ratio.
    Ratio,
    /// 32-bit reference identifier.
    ReferenceId,
    /// Enumerated value with a constant table.
    Enum,
    /// Bit register rendered as bits.
    Bits,
    /// Flag set with a constant table, tested bit by bit.
    Flags,
    /// Network address.
    Address,
    /// Transport port number.
    Port,
    /// Index or key identifier.
    Index,
    /// Length in bits.
    LengthBits,
    /// Length in bytes.
    LengthBytes,
    /// Boolean (zero is false).
    Boolean,
}

impl Content {
    /// Unit suffix conventionally printed after a value of this content.
    pub const fn unit(&self) -> Option<&'static str> {
        match self {
            Content::IntervalLog2Seconds => Some("log2(seconds)"),
            Content::IntervalSeconds | Content::OffsetSeconds | Content::MeasureSeconds => {
                Some("seconds")
            }
            Content::OffsetPpm | Content::MeasurePpm => Some("ppm"),
            Content::OffsetPpmPerSecond => Some("ppm/s"),
            _ => None,
        }
    }
}

/// A named value used to render enumerated or flag fields.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Constant {
    /// Numeric value (a single bit for flag tables).
    pub value: u32,
    /// Display name.
    pub name: &'static str,
}

impl Constant {
    /// Create a named constant.
    pub const fn new(value: u32, name: &'static str) -> Self {
        Constant { value, name }
    }
}

/// Descriptor of one field within a request or response record.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Field {
    /// Display name. For [`WireType::AddressOrUint32`] this is the name of
    /// the address interpretation.
    pub name: &'static str,
    /// Wire encoding.
    pub wire: WireType,
    /// Semantic content tag.
    pub content: Content,
    /// Constants for enumerated or flag fields; empty otherwise.
    pub constants: &'static [Constant],
}

impl Field {
    /// Describe a field without constants.
    pub const fn new(name: &'static str, wire: WireType, content: Content) -> Self {
        Field {
            name,
            wire,
            content,
            constants: &[],
        }
    }

    /// Describe an enumerated or flag field.
    pub const fn with_constants(
        name: &'static str,
        wire: WireType,
        content: Content,
        constants: &'static [Constant],
    ) -> Self {
        Field {
            name,
            wire,
            content,
            constants,
        }
    }
}

/// Total payload length of a field list.
pub fn fields_len(fields: &[Field]) -> usize {
    fields.iter().map(|f| f.wire.size()).sum()
}

/// A request code and the layout of its arguments.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Request {
    /// Request code placed in the header.
    pub code: u16,
    /// Argument layout, in wire order.
    pub fields: &'static [Field],
}

/// A response code and the layout of its payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Response {
    /// Response code the server places in the header.
    pub code: u16,
    /// Payload layout, in wire order.
    pub fields: &'static [Field],
}

impl Response {
    /// Datagram length needed to carry this response in full.
    pub fn datagram_len(&self) -> usize {
        super::RESPONSE_HEADER_LEN + fields_len(self.fields)
    }
}

/// One request together with the responses accepted for it.
///
/// Responses are ordered oldest dialect first; the first response whose code
/// matches a received datagram governs its payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Exchange {
    /// The request.
    pub request: Request,
    /// Accepted responses.
    pub responses: &'static [Response],
}

/// A named monitoring report.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Report {
    /// Unique, case-sensitive report name.
    pub name: &'static str,
    /// Exchange returning the number of records, or `None` for reports with
    /// exactly one record.
    pub count: Option<Exchange>,
    /// Exchange returning one record.
    pub record: Exchange,
}

impl Report {
    /// Returns `true` if `fields` is this report's primary record layout.
    ///
    /// The comparison is by identity, not by content: two reports with
    /// identical layouts are still distinguished.
    pub fn is_primary_response(&self, fields: &[Field]) -> bool {
        self.record
            .responses
            .first()
            .is_some_and(|r| core::ptr::eq(r.fields, fields))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
