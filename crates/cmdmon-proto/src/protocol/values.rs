use core::fmt;
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use byteorder::{BigEndian, ByteOrder};

use super::{ADDRESS_LEN, TIMESPEC_LEN};

/// Address family tags used inside an address record.
pub mod family {
    /// No address.
    pub const UNSPEC: u16 = 0;
    /// IPv4 address in the first 4 bytes.
    pub const INET4: u16 = 1;
    /// IPv6 address in the first 16 bytes.
    pub const INET6: u16 = 2;
    /// 32-bit identifier in the first 4 bytes.
    pub const ID: u16 = 3;
}

/// Offset of the family tag within an address record.
pub const ADDRESS_FAMILY_OFFSET: usize = 16;

/// A decoded address record.
///
/// ### Layout
///
/// ```ignore
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      Raw address (16 bytes)                   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |            Family             |            Padding            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// An unspecified family decodes to `None` rather than to a variant of this
/// type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Address {
    /// IPv4 address.
    V4(Ipv4Addr),
    /// IPv6 address.
    V6(Ipv6Addr),
    /// Identifier of a source without a network address.
    Id(u32),
    /// Record with an unrecognized family tag.
    Unknown(u16),
}

impl Address {
    /// Decode an address record. Returns `None` for the unspecified family.
    ///
    /// `buf` must hold at least [`ADDRESS_LEN`] bytes.
    pub fn from_record(buf: &[u8]) -> Option<Self> {
        let record = buf.get(..ADDRESS_LEN)?;
        match BigEndian::read_u16(&record[ADDRESS_FAMILY_OFFSET..]) {
            family::UNSPEC => None,
            family::INET4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(&record[..4]);
                Some(Address::V4(Ipv4Addr::from(octets)))
            }
            family::INET6 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&record[..16]);
                Some(Address::V6(Ipv6Addr::from(octets)))
            }
            family::ID => Some(Address::Id(BigEndian::read_u32(record))),
            other => Some(Address::Unknown(other)),
        }
    }

    /// Encode into a 20-byte address record.
    pub fn to_record(&self) -> [u8; ADDRESS_LEN] {
        let mut record = [0u8; ADDRESS_LEN];
        let family = match self {
            Address::V4(ip) => {
                record[..4].copy_from_slice(&ip.octets());
                family::INET4
            }
            Address::V6(ip) => {
                record[..16].copy_from_slice(&ip.octets());
                family::INET6
            }
            Address::Id(id) => {
                BigEndian::write_u32(&mut record[..4], *id);
                family::ID
            }
            Address::Unknown(family) => *family,
        };
        BigEndian::write_u16(&mut record[ADDRESS_FAMILY_OFFSET..], family);
        record
    }

    /// The IP address, if this record holds one.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Address::V4(ip) => Some(IpAddr::V4(*ip)),
            Address::V6(ip) => Some(IpAddr::V6(*ip)),
            _ => None,
        }
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(ip) => Address::V4(ip),
            IpAddr::V6(ip) => Address::V6(ip),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::V4(ip) => write!(f, "{}", ip),
            Address::V6(ip) => write!(f, "{}", ip),
            Address::Id(id) => write!(f, "ID#{:010}", id),
            Address::Unknown(_) => f.write_str("?"),
        }
    }
}

/// A timestamp as carried in a record: 64-bit seconds and nanoseconds.
///
/// ### Layout
///
/// ```ignore
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        Seconds (high)                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        Seconds (low)                          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Nanoseconds                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timespec {
    /// Seconds since the Unix epoch.
    pub secs: u64,
    /// Nanoseconds. Not normalized; a misbehaving peer may send values
    /// of one second or more.
    pub nanos: u32,
}

impl Timespec {
    /// Decode a timestamp. `buf` must hold at least [`TIMESPEC_LEN`] bytes.
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        let data = buf.get(..TIMESPEC_LEN)?;
        let high = u64::from(BigEndian::read_u32(&data[0..4]));
        let low = u64::from(BigEndian::read_u32(&data[4..8]));
        Some(Timespec {
            secs: high << 32 | low,
            nanos: BigEndian::read_u32(&data[8..12]),
        })
    }

    /// Encode into the 12-byte wire form.
    pub fn to_bytes(&self) -> [u8; TIMESPEC_LEN] {
        let mut buf = [0u8; TIMESPEC_LEN];
        BigEndian::write_u32(&mut buf[0..4], (self.secs >> 32) as u32);
        BigEndian::write_u32(&mut buf[4..8], self.secs as u32);
        BigEndian::write_u32(&mut buf[8..12], self.nanos);
        buf
    }

    /// Seconds as a floating-point number.
    pub fn as_secs_f64(&self) -> f64 {
        self.secs as f64 + f64::from(self.nanos) / 1e9
    }
}

impl fmt::Display for Timespec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

/// A decoded field value, tagged by its resolved type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue {
    /// Unsigned integer.
    UInteger(u64),
    /// Signed integer.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Timestamp.
    Timespec(Timespec),
    /// Address record; `None` when the record holds no address.
    Address(Option<Address>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::UInteger(v) => write!(f, "{}", v),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{:.6}", v),
            FieldValue::Timespec(ts) => write!(f, "{}", ts),
            FieldValue::Address(Some(addr)) => write!(f, "{}", addr),
            FieldValue::Address(None) => Ok(()),
        }
    }
}
