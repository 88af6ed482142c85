// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Every report the client knows how to request, with the request codes and
//! the field layouts of each accepted response.
//!
//! Tables are `static` so that field lists have a stable identity; the
//! session compares them by address to recognize a sourcestats record.

use crate::protocol::{
    AddressSelector, Constant, Content as C, Exchange, Field, Report, Request, Response,
    WireType as W,
};

/// Name of the report used to resolve a record index into an address.
pub const SOURCESTATS: &str = "sourcestats";

/// Index of the address field in a sourcestats record.
pub const SOURCESTATS_ADDRESS_FIELD: usize = 1;

static LEAP_ENUMS: [Constant; 4] = [
    Constant::new(0, "Normal"),
    Constant::new(1, "Insert second"),
    Constant::new(2, "Delete second"),
    Constant::new(3, "Not synchronized"),
];

static TRACKING_FIELDS: [Field; 14] = [
    Field::new("Reference ID", W::Uint32, C::ReferenceId),
    Field::new("Address", W::Address, C::Address),
    Field::new("Stratum", W::Uint16, C::Count),
    Field::with_constants("Leap status", W::Uint16, C::Enum, &LEAP_ENUMS),
    Field::new("Reference time", W::Timespec, C::Time),
    Field::new("Current correction", W::Float, C::OffsetSeconds),
    Field::new("Last offset", W::Float, C::OffsetSeconds),
    Field::new("RMS offset", W::Float, C::MeasureSeconds),
    Field::new("Frequency offset", W::Float, C::OffsetPpm),
    Field::new("Residual frequency", W::Float, C::OffsetPpm),
    Field::new("Skew", W::Float, C::MeasurePpm),
    Field::new("Root delay", W::Float, C::MeasureSeconds),
    Field::new("Root dispersion", W::Float, C::MeasureSeconds),
    Field::new("Last update interval", W::Float, C::IntervalSeconds),
];

static NUM_SOURCES_FIELDS: [Field; 1] = [Field::new("Sources", W::Uint32, C::Count)];

static BY_INDEX_FIELDS: [Field; 1] = [Field::new("Index", W::Uint32, C::Index)];

static BY_ADDRESS_FIELDS: [Field; 1] = [Field::new("Address", W::Address, C::Address)];

static SOURCES_STATE_ENUMS: [Constant; 6] = [
    Constant::new(0, "Selected"),
    Constant::new(1, "Nonselectable"),
    Constant::new(2, "Falseticker"),
    Constant::new(3, "Jittery"),
    Constant::new(4, "Unselected"),
    Constant::new(5, "Selectable"),
];

static SOURCES_MODE_ENUMS: [Constant; 3] = [
    Constant::new(0, "Client"),
    Constant::new(1, "Peer"),
    Constant::new(2, "Reference clock"),
];

// Reference clocks have no address; their record carries a reference ID.
static SOURCES_ADDRESS_SELECTOR: AddressSelector = AddressSelector {
    selector: 4,
    value: 2,
    integer_name: "Reference ID",
};

static SOURCES_FIELDS: [Field; 11] = [
    Field::new(
        "Address",
        W::AddressOrUint32(&SOURCES_ADDRESS_SELECTOR),
        C::None,
    ),
    Field::new("Poll", W::Int16, C::IntervalLog2Seconds),
    Field::new("Stratum", W::Uint16, C::Count),
    Field::with_constants("State", W::Uint16, C::Enum, &SOURCES_STATE_ENUMS),
    Field::with_constants("Mode", W::Uint16, C::Enum, &SOURCES_MODE_ENUMS),
    Field::new("Flags", W::Uint16, C::None),
    Field::new("Reachability", W::Uint16, C::Bits),
    Field::new("Last sample ago", W::Uint32, C::IntervalSeconds),
    Field::new("Original last sample offset", W::Float, C::OffsetSeconds),
    Field::new("Adjusted last sample offset", W::Float, C::OffsetSeconds),
    Field::new("Last sample error", W::Float, C::MeasureSeconds),
];

static SOURCESTATS_FIELDS: [Field; 10] = [
    Field::new("Reference ID", W::Uint32, C::ReferenceId),
    Field::new("Address", W::Address, C::Address),
    Field::new("Samples", W::Uint32, C::Count),
    Field::new("Runs", W::Uint32, C::Count),
    Field::new("Span", W::Uint32, C::IntervalSeconds),
    Field::new("Standard deviation", W::Float, C::MeasureSeconds),
    Field::new("Residual frequency", W::Float, C::OffsetPpm),
    Field::new("Skew", W::Float, C::MeasurePpm),
    Field::new("Offset", W::Float, C::OffsetSeconds),
    Field::new("Offset error", W::Float, C::MeasureSeconds),
];

static SELECTDATA_STATE_ENUMS: [Constant; 16] = [
    Constant::new(b'N' as u32, "Ignored"),
    Constant::new(b's' as u32, "Not synchronized"),
    Constant::new(b'M' as u32, "Missing samples"),
    Constant::new(b'd' as u32, "Unacceptable distance"),
    Constant::new(b'D' as u32, "Large distance"),
    Constant::new(b'~' as u32, "Jittery"),
    Constant::new(b'w' as u32, "Waiting for others"),
    Constant::new(b'W' as u32, "Missing selectable sources"),
    Constant::new(b'S' as u32, "Stale"),
    Constant::new(b'O' as u32, "Orphan"),
    Constant::new(b'T' as u32, "Not trusted"),
    Constant::new(b'P' as u32, "Not preferred"),
    Constant::new(b'U' as u32, "Waiting for update"),
    Constant::new(b'x' as u32, "Falseticker"),
    Constant::new(b'+' as u32, "Combined"),
    Constant::new(b'*' as u32, "Best"),
];

static SELECTDATA_OPTION_FLAGS: [Constant; 4] = [
    Constant::new(0x1, "noselect"),
    Constant::new(0x2, "prefer"),
    Constant::new(0x4, "trust"),
    Constant::new(0x8, "require"),
];

static SELECTDATA_FIELDS: [Field; 12] = [
    Field::new("Reference ID", W::Uint32, C::ReferenceId),
    Field::new("Address", W::Address, C::Address),
    Field::with_constants("State", W::Uint8, C::Enum, &SELECTDATA_STATE_ENUMS),
    Field::new("Authentication", W::Uint8, C::Boolean),
    Field::with_constants("Leap status", W::Uint8, C::Enum, &LEAP_ENUMS),
    Field::new("Reserved #1", W::Uint8, C::None),
    Field::with_constants(
        "Configured options",
        W::Uint16,
        C::Flags,
        &SELECTDATA_OPTION_FLAGS,
    ),
    Field::with_constants(
        "Effective options",
        W::Uint16,
        C::Flags,
        &SELECTDATA_OPTION_FLAGS,
    ),
    Field::new("Last sample ago", W::Uint32, C::IntervalSeconds),
    Field::new("Score", W::Float, C::Ratio),
    Field::new("Low limit", W::Float, C::IntervalSeconds),
    Field::new("High limit", W::Float, C::IntervalSeconds),
];

static ACTIVITY_FIELDS: [Field; 5] = [
    Field::new("Online sources", W::Uint32, C::Count),
    Field::new("Offline sources", W::Uint32, C::Count),
    Field::new("Burst online-return sources", W::Uint32, C::Count),
    Field::new("Burst offline-return sources", W::Uint32, C::Count),
    Field::new("Unresolved sources", W::Uint32, C::Count),
];

static AUTHDATA_MODE_ENUMS: [Constant; 3] = [
    Constant::new(0, "None"),
    Constant::new(1, "Symmetric key"),
    Constant::new(2, "NTS"),
];

static AUTHDATA_KEYTYPE_ENUMS: [Constant; 15] = [
    Constant::new(1, "MD5"),
    Constant::new(2, "SHA1"),
    Constant::new(3, "SHA256"),
    Constant::new(4, "SHA384"),
    Constant::new(5, "SHA512"),
    Constant::new(6, "SHA3-224"),
    Constant::new(7, "SHA3-256"),
    Constant::new(8, "SHA3-384"),
    Constant::new(9, "SHA3-512"),
    Constant::new(10, "TIGER"),
    Constant::new(11, "WHIRLPOOL"),
    Constant::new(13, "AES128"),
    Constant::new(14, "AES256"),
    Constant::new(15, "AEAD-AES-SIV-CMAC-256"),
    Constant::new(30, "AEAD-AES-128-GCM-SIV"),
];

static AUTHDATA_FIELDS: [Field; 10] = [
    Field::with_constants("Mode", W::Uint16, C::Enum, &AUTHDATA_MODE_ENUMS),
    Field::with_constants("Key type", W::Uint16, C::Enum, &AUTHDATA_KEYTYPE_ENUMS),
    Field::new("Key ID", W::Uint32, C::Index),
    Field::new("Key length", W::Uint16, C::LengthBits),
    Field::new("Key establishment attempts", W::Uint16, C::Count),
    Field::new("Last key establishment ago", W::Uint32, C::IntervalSeconds),
    Field::new("Cookies", W::Uint16, C::Count),
    Field::new("Cookie length", W::Uint16, C::LengthBytes),
    Field::new("NAK", W::Uint16, C::Boolean),
    Field::new("Reserved #1", W::Uint16, C::None),
];

static NTP_MODE_ENUMS: [Constant; 3] = [
    Constant::new(1, "Active symmetric"),
    Constant::new(2, "Passive symmetric"),
    Constant::new(4, "Server"),
];

static NTP_TIMESTAMPING_ENUMS: [Constant; 3] = [
    Constant::new(b'D' as u32, "Daemon"),
    Constant::new(b'K' as u32, "Kernel"),
    Constant::new(b'H' as u32, "Hardware"),
];

static NTP_FLAGS: [Constant; 12] = [
    Constant::new(0x200, "Test1"),
    Constant::new(0x100, "Test2"),
    Constant::new(0x80, "Test3"),
    Constant::new(0x40, "Test5"),
    Constant::new(0x20, "Test6"),
    Constant::new(0x10, "Test7"),
    Constant::new(0x8, "TestA"),
    Constant::new(0x4, "TestC"),
    Constant::new(0x2, "TestB"),
    Constant::new(0x1, "TestD"),
    Constant::new(0x4000, "Interleaved"),
    Constant::new(0x8000, "Authenticated"),
];

static NTPDATA_FIELDS: [Field; 28] = [
    Field::new("Remote address", W::Address, C::Address),
    Field::new("Local address", W::Address, C::Address),
    Field::new("Remote port", W::Uint16, C::Port),
    Field::with_constants("Leap status", W::Uint8, C::Enum, &LEAP_ENUMS),
    Field::new("Version", W::Uint8, C::Count),
    Field::with_constants("Mode", W::Uint8, C::Enum, &NTP_MODE_ENUMS),
    Field::new("Stratum", W::Uint8, C::Count),
    Field::new("Poll", W::Int8, C::IntervalLog2Seconds),
    Field::new("Precision", W::Int8, C::IntervalLog2Seconds),
    Field::new("Root delay", W::Float, C::MeasureSeconds),
    Field::new("Root dispersion", W::Float, C::MeasureSeconds),
    Field::new("Reference ID", W::Uint32, C::ReferenceId),
    Field::new("Reference time", W::Timespec, C::Time),
    Field::new("Offset", W::Float, C::OffsetSeconds),
    Field::new("Peer delay", W::Float, C::MeasureSeconds),
    Field::new("Peer dispersion", W::Float, C::MeasureSeconds),
    Field::new("Response time", W::Float, C::MeasureSeconds),
    Field::new("Jitter asymmetry", W::Float, C::Ratio),
    Field::with_constants("Flags", W::Uint16, C::Flags, &NTP_FLAGS),
    Field::with_constants(
        "Transmit timestamping",
        W::Uint8,
        C::Enum,
        &NTP_TIMESTAMPING_ENUMS,
    ),
    Field::with_constants(
        "Receive timestamping",
        W::Uint8,
        C::Enum,
        &NTP_TIMESTAMPING_ENUMS,
    ),
    Field::new("Transmitted messages", W::Uint32, C::Count),
    Field::new("Received messages", W::Uint32, C::Count),
    Field::new("Received valid messages", W::Uint32, C::Count),
    Field::new("Received good messages", W::Uint32, C::Count),
    Field::new("Reserved #1", W::Uint32, C::None),
    Field::new("Reserved #2", W::Uint32, C::None),
    Field::new("Reserved #3", W::Uint32, C::None),
];

static NTPDATA2_FIELDS: [Field; 33] = [
    Field::new("Remote address", W::Address, C::Address),
    Field::new("Local address", W::Address, C::Address),
    Field::new("Remote port", W::Uint16, C::Port),
    Field::with_constants("Leap status", W::Uint8, C::Enum, &LEAP_ENUMS),
    Field::new("Version", W::Uint8, C::Count),
    Field::with_constants("Mode", W::Uint8, C::Enum, &NTP_MODE_ENUMS),
    Field::new("Stratum", W::Uint8, C::Count),
    Field::new("Poll", W::Int8, C::IntervalLog2Seconds),
    Field::new("Precision", W::Int8, C::IntervalLog2Seconds),
    Field::new("Root delay", W::Float, C::MeasureSeconds),
    Field::new("Root dispersion", W::Float, C::MeasureSeconds),
    Field::new("Reference ID", W::Uint32, C::ReferenceId),
    Field::new("Reference time", W::Timespec, C::Time),
    Field::new("Offset", W::Float, C::OffsetSeconds),
    Field::new("Peer delay", W::Float, C::MeasureSeconds),
    Field::new("Peer dispersion", W::Float, C::MeasureSeconds),
    Field::new("Response time", W::Float, C::MeasureSeconds),
    Field::new("Jitter asymmetry", W::Float, C::Ratio),
    Field::with_constants("Flags", W::Uint16, C::Flags, &NTP_FLAGS),
    Field::with_constants(
        "Transmit timestamping",
        W::Uint8,
        C::Enum,
        &NTP_TIMESTAMPING_ENUMS,
    ),
    Field::with_constants(
        "Receive timestamping",
        W::Uint8,
        C::Enum,
        &NTP_TIMESTAMPING_ENUMS,
    ),
    Field::new("Transmitted messages", W::Uint32, C::Count),
    Field::new("Received messages", W::Uint32, C::Count),
    Field::new("Received valid messages", W::Uint32, C::Count),
    Field::new("Received good messages", W::Uint32, C::Count),
    Field::new("Kernel transmit timestamps", W::Uint32, C::Count),
    Field::new("Kernel receive timestamps", W::Uint32, C::Count),
    Field::new("Hardware transmit timestamps", W::Uint32, C::Count),
    Field::new("Hardware receive timestamps", W::Uint32, C::Count),
    Field::new("Reserved #1", W::Uint32, C::None),
    Field::new("Reserved #2", W::Uint32, C::None),
    Field::new("Reserved #3", W::Uint32, C::None),
    Field::new("Reserved #4", W::Uint32, C::None),
];

static SERVERSTATS_FIELDS: [Field; 5] = [
    Field::new("Received NTP requests", W::Uint32, C::Count),
    Field::new("Received command requests", W::Uint32, C::Count),
    Field::new("Dropped NTP requests", W::Uint32, C::Count),
    Field::new("Dropped command requests", W::Uint32, C::Count),
    Field::new("Dropped client log records", W::Uint32, C::Count),
];

static SERVERSTATS2_FIELDS: [Field; 8] = [
    Field::new("Received NTP requests", W::Uint32, C::Count),
    Field::new("Accepted NTS-KE connections", W::Uint32, C::Count),
    Field::new("Received command requests", W::Uint32, C::Count),
    Field::new("Dropped NTP requests", W::Uint32, C::Count),
    Field::new("Dropped NTS-KE connections", W::Uint32, C::Count),
    Field::new("Dropped command requests", W::Uint32, C::Count),
    Field::new("Dropped client log records", W::Uint32, C::Count),
    Field::new("Received authenticated NTP requests", W::Uint32, C::Count),
];

static SERVERSTATS3_FIELDS: [Field; 11] = [
    Field::new("Received NTP requests", W::Uint32, C::Count),
    Field::new("Accepted NTS-KE connections", W::Uint32, C::Count),
    Field::new("Received command requests", W::Uint32, C::Count),
    Field::new("Dropped NTP requests", W::Uint32, C::Count),
    Field::new("Dropped NTS-KE connections", W::Uint32, C::Count),
    Field::new("Dropped command requests", W::Uint32, C::Count),
    Field::new("Dropped client log records", W::Uint32, C::Count),
    Field::new("Received authenticated NTP requests", W::Uint32, C::Count),
    Field::new("Received interleaved NTP requests", W::Uint32, C::Count),
    Field::new("Held NTP timestamps", W::Uint32, C::Count),
    Field::new("NTP timestamp span", W::Uint32, C::IntervalSeconds),
];

static SERVERSTATS4_FIELDS: [Field; 21] = [
    Field::new("Received NTP requests", W::Uint64, C::Count),
    Field::new("Accepted NTS-KE connections", W::Uint64, C::Count),
    Field::new("Received command requests", W::Uint64, C::Count),
    Field::new("Dropped NTP requests", W::Uint64, C::Count),
    Field::new("Dropped NTS-KE connections", W::Uint64, C::Count),
    Field::new("Dropped command requests", W::Uint64, C::Count),
    Field::new("Dropped client log records", W::Uint64, C::Count),
    Field::new("Received authenticated NTP requests", W::Uint64, C::Count),
    Field::new("Received interleaved NTP requests", W::Uint64, C::Count),
    Field::new("Held NTP timestamps", W::Uint64, C::Count),
    Field::new("NTP timestamp span", W::Uint64, C::IntervalSeconds),
    Field::new("Served daemon RX timestamps", W::Uint64, C::Count),
    Field::new("Served daemon TX timestamps", W::Uint64, C::Count),
    Field::new("Served kernel RX timestamps", W::Uint64, C::Count),
    Field::new("Served kernel TX timestamps", W::Uint64, C::Count),
    Field::new("Served hardware RX timestamps", W::Uint64, C::Count),
    Field::new("Served hardware TX timestamps", W::Uint64, C::Count),
    Field::new("Reserved #1", W::Uint64, C::None),
    Field::new("Reserved #2", W::Uint64, C::None),
    Field::new("Reserved #3", W::Uint64, C::None),
    Field::new("Reserved #4", W::Uint64, C::None),
];

static RTCDATA_FIELDS: [Field; 6] = [
    Field::new("Reference time", W::Timespec, C::Time),
    Field::new("Samples", W::Uint16, C::Count),
    Field::new("Runs", W::Uint16, C::Count),
    Field::new("Span", W::Uint32, C::IntervalSeconds),
    Field::new("Offset", W::Float, C::OffsetSeconds),
    Field::new("Frequency offset", W::Float, C::OffsetPpm),
];

static SMOOTHING_FLAGS: [Constant; 2] = [
    Constant::new(0x1, "active"),
    Constant::new(0x2, "leaponly"),
];

static SMOOTHING_FIELDS: [Field; 6] = [
    Field::with_constants("Flags", W::Uint32, C::Flags, &SMOOTHING_FLAGS),
    Field::new("Offset", W::Float, C::OffsetSeconds),
    Field::new("Frequency offset", W::Float, C::OffsetPpm),
    Field::new("Wander", W::Float, C::OffsetPpmPerSecond),
    Field::new("Last update ago", W::Float, C::IntervalSeconds),
    Field::new("Remaining time", W::Float, C::IntervalSeconds),
];

static NUM_SOURCES_RESPONSES: [Response; 1] = [Response {
    code: 2,
    fields: &NUM_SOURCES_FIELDS,
}];

// Every multi-record report counts its records with the same exchange.
const NUM_SOURCES: Exchange = Exchange {
    request: Request {
        code: 14,
        fields: &[],
    },
    responses: &NUM_SOURCES_RESPONSES,
};

/// Every supported report, in a stable order.
pub static REPORTS: [Report; 10] = [
    Report {
        name: "tracking",
        count: None,
        record: Exchange {
            request: Request {
                code: 33,
                fields: &[],
            },
            responses: &[Response {
                code: 5,
                fields: &TRACKING_FIELDS,
            }],
        },
    },
    Report {
        name: "sources",
        count: Some(NUM_SOURCES),
        record: Exchange {
            request: Request {
                code: 15,
                fields: &BY_INDEX_FIELDS,
            },
            responses: &[Response {
                code: 3,
                fields: &SOURCES_FIELDS,
            }],
        },
    },
    Report {
        name: SOURCESTATS,
        count: Some(NUM_SOURCES),
        record: Exchange {
            request: Request {
                code: 34,
                fields: &BY_INDEX_FIELDS,
            },
            responses: &[Response {
                code: 6,
                fields: &SOURCESTATS_FIELDS,
            }],
        },
    },
    Report {
        name: "selectdata",
        count: Some(NUM_SOURCES),
        record: Exchange {
            request: Request {
                code: 69,
                fields: &BY_INDEX_FIELDS,
            },
            responses: &[Response {
                code: 23,
                fields: &SELECTDATA_FIELDS,
            }],
        },
    },
    Report {
        name: "activity",
        count: None,
        record: Exchange {
            request: Request {
                code: 44,
                fields: &[],
            },
            responses: &[Response {
                code: 12,
                fields: &ACTIVITY_FIELDS,
            }],
        },
    },
    Report {
        name: "authdata",
        count: Some(NUM_SOURCES),
        record: Exchange {
            request: Request {
                code: 67,
                fields: &BY_ADDRESS_FIELDS,
            },
            responses: &[Response {
                code: 20,
                fields: &AUTHDATA_FIELDS,
            }],
        },
    },
    Report {
        name: "ntpdata",
        count: Some(NUM_SOURCES),
        record: Exchange {
            request: Request {
                code: 57,
                fields: &BY_ADDRESS_FIELDS,
            },
            responses: &[
                Response {
                    code: 16,
                    fields: &NTPDATA_FIELDS,
                },
                Response {
                    code: 26,
                    fields: &NTPDATA2_FIELDS,
                },
            ],
        },
    },
    Report {
        name: "serverstats",
        count: None,
        record: Exchange {
            request: Request {
                code: 54,
                fields: &[],
            },
            responses: &[
                Response {
                    code: 14,
                    fields: &SERVERSTATS_FIELDS,
                },
                Response {
                    code: 22,
                    fields: &SERVERSTATS2_FIELDS,
                },
                Response {
                    code: 24,
                    fields: &SERVERSTATS3_FIELDS,
                },
                Response {
                    code: 25,
                    fields: &SERVERSTATS4_FIELDS,
                },
            ],
        },
    },
    Report {
        name: "rtcdata",
        count: None,
        record: Exchange {
            request: Request {
                code: 35,
                fields: &[],
            },
            responses: &[Response {
                code: 7,
                fields: &RTCDATA_FIELDS,
            }],
        },
    },
    Report {
        name: "smoothing",
        count: None,
        record: Exchange {
            request: Request {
                code: 51,
                fields: &[],
            },
            responses: &[Response {
                code: 13,
                fields: &SMOOTHING_FIELDS,
            }],
        },
    },
];

/// Number of supported reports.
pub fn report_count() -> usize {
    REPORTS.len()
}

/// Name of the report at `index`, or `None` if out of range.
pub fn report_name(index: usize) -> Option<&'static str> {
    REPORTS.get(index).map(|r| r.name)
}

/// Report at `index`, or `None` if out of range.
pub fn get(index: usize) -> Option<&'static Report> {
    REPORTS.get(index)
}

/// Position of the report called `name`. Names match exactly.
pub fn index_of(name: &str) -> Option<usize> {
    REPORTS.iter().position(|r| r.name == name)
}

/// Look up a report by exact, case-sensitive name.
pub fn find(name: &str) -> Option<&'static Report> {
    REPORTS.iter().find(|r| r.name == name)
}

/// Iterate over all reports in registry order.
pub fn iter() -> impl Iterator<Item = &'static Report> {
    REPORTS.iter()
}

/// Returns `true` if `fields` is the primary record layout of the report
/// called `name`.
pub fn is_report_fields(name: &str, fields: &[Field]) -> bool {
    find(name).is_some_and(|r| r.is_primary_response(fields))
}
