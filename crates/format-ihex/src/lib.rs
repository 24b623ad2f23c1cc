//! Intel HEX record parser.
//!
//! One record per line: `:llaaaatt<data...>cc` with a byte count, a 16-bit
//! load address, a record type, payload bytes, and a checksum. Only the
//! textual layer lives here; interpreting addresses and record types is the
//! consumer's job. Checksums are not verified.

/// Data record type.
pub const TYPE_DATA: u8 = 0x00;

/// End-of-file record type.
pub const TYPE_EOF: u8 = 0x01;

/// One parsed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 16-bit load address field.
    pub address: u16,
    /// Record type field.
    pub record_type: u8,
    /// Payload, `byte count` bytes long.
    pub data: Vec<u8>,
}

/// Parse one line. Returns `None` for anything that is not a well-formed
/// record: no leading colon, non-hex digits, or a line shorter than its
/// declared byte count. Trailing characters after the payload (the
/// checksum) are ignored.
#[must_use]
pub fn parse_line(line: &str) -> Option<Record> {
    let rest = line.trim_end().strip_prefix(':')?;
    let byte_count = hex8(rest.get(0..2)?)?;
    let address = hex16(rest.get(2..6)?)?;
    let record_type = hex8(rest.get(6..8)?)?;

    let mut data = Vec::with_capacity(usize::from(byte_count));
    for i in 0..usize::from(byte_count) {
        let start = 8 + i * 2;
        data.push(hex8(rest.get(start..start + 2)?)?);
    }

    Some(Record {
        address,
        record_type,
        data,
    })
}

fn hex8(digits: &str) -> Option<u8> {
    u8::from_str_radix(digits, 16).ok()
}

fn hex16(digits: &str) -> Option<u16> {
    u16::from_str_radix(digits, 16).ok()
}
