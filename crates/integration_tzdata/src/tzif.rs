//! TZif (RFC 8536) parsing
//!
//! Decodes the binary layout of compiled zoneinfo files: a fixed header,
//! a version-1 data block with 32-bit transition times, and for version
//! 2+ files a second header and data block with 64-bit times.

use crate::client::TzdataError;
use crate::models::RawTransition;

/// Fixed size of a TZif header in bytes
const HEADER_LEN: usize = 44;

/// Size of one ttinfo record in bytes
const TTINFO_LEN: usize = 6;

/// Record counts declared by a TZif header
#[derive(Debug, Clone, Copy)]
struct Header {
    version: u8,
    isutcnt: usize,
    isstdcnt: usize,
    leapcnt: usize,
    timecnt: usize,
    typecnt: usize,
    charcnt: usize,
}

impl Header {
    /// Size in bytes of the data block following this header
    const fn data_len(&self, time_size: usize) -> usize {
        self.timecnt * (time_size + 1)
            + self.typecnt * TTINFO_LEN
            + self.charcnt
            + self.leapcnt * (time_size + 4)
            + self.isstdcnt
            + self.isutcnt
    }
}

/// Decoded ttinfo record
#[derive(Debug, Clone)]
struct TimeType {
    utoff: i32,
    dst: bool,
    abbreviation: String,
}

/// Decode a complete TZif stream into its transition sequence
///
/// The result is ordered as stored in the file and always starts with a
/// floor record at `i64::MIN` carrying time type 0, which governs
/// instants before the earliest real transition (RFC 8536, section 3.2).
pub(crate) fn parse(bytes: &[u8]) -> Result<Vec<RawTransition>, TzdataError> {
    let first = parse_header(bytes)?;
    let body = bytes.get(HEADER_LEN..).ok_or(TzdataError::Truncated)?;
    if first.version == 0 {
        return parse_block(body, &first, false);
    }

    // Version 2+ keeps the 32-bit block for old readers; the 64-bit
    // block behind the second header is authoritative
    let rest = body.get(first.data_len(4)..).ok_or(TzdataError::Truncated)?;
    let second = parse_header(rest)?;
    let wide_body = rest.get(HEADER_LEN..).ok_or(TzdataError::Truncated)?;
    parse_block(wide_body, &second, true)
}

/// Validate the magic and version, then read the six record counts
fn parse_header(bytes: &[u8]) -> Result<Header, TzdataError> {
    let header = bytes.get(..HEADER_LEN).ok_or(TzdataError::Truncated)?;
    if &header[..4] != b"TZif" {
        return Err(TzdataError::NotTzif("bad magic".to_owned()));
    }
    let version = header[4];
    if !matches!(version, 0 | b'2' | b'3' | b'4') {
        return Err(TzdataError::UnsupportedVersion(version));
    }
    Ok(Header {
        version,
        isutcnt: be_count(header, 20)?,
        isstdcnt: be_count(header, 24)?,
        leapcnt: be_count(header, 28)?,
        timecnt: be_count(header, 32)?,
        typecnt: be_count(header, 36)?,
        charcnt: be_count(header, 40)?,
    })
}

/// Decode one data block into transitions, 32-bit or 64-bit times
fn parse_block(bytes: &[u8], header: &Header, wide: bool) -> Result<Vec<RawTransition>, TzdataError> {
    let time_size = if wide { 8 } else { 4 };

    let mut cursor = 0usize;
    let times = take(bytes, &mut cursor, header.timecnt * time_size)?;
    let type_indexes = take(bytes, &mut cursor, header.timecnt)?;
    let ttinfos = take(bytes, &mut cursor, header.typecnt * TTINFO_LEN)?;
    let designations = take(bytes, &mut cursor, header.charcnt)?;

    let types = ttinfos
        .chunks_exact(TTINFO_LEN)
        .map(|chunk| parse_ttinfo(chunk, designations))
        .collect::<Result<Vec<_>, _>>()?;
    let initial = types
        .first()
        .ok_or_else(|| TzdataError::NotTzif("zero time types".to_owned()))?;

    let mut transitions = Vec::with_capacity(header.timecnt + 1);
    transitions.push(RawTransition::new(
        i64::MIN,
        initial.utoff,
        initial.dst,
        initial.abbreviation.clone(),
    ));

    for (chunk, &type_index) in times.chunks_exact(time_size).zip(type_indexes) {
        let timestamp = if wide {
            be_i64(chunk, 0)?
        } else {
            i64::from(be_i32(chunk, 0)?)
        };
        let time_type = types.get(usize::from(type_index)).ok_or_else(|| {
            TzdataError::NotTzif(format!("time type index {type_index} out of range"))
        })?;
        transitions.push(RawTransition::new(
            timestamp,
            time_type.utoff,
            time_type.dst,
            time_type.abbreviation.clone(),
        ));
    }
    Ok(transitions)
}

/// Decode one ttinfo record and resolve its designation
fn parse_ttinfo(chunk: &[u8], designations: &[u8]) -> Result<TimeType, TzdataError> {
    let utoff = be_i32(chunk, 0)?;
    let dst = chunk.get(4).copied().ok_or(TzdataError::Truncated)? != 0;
    let desigidx = usize::from(chunk.get(5).copied().ok_or(TzdataError::Truncated)?);
    let abbreviation = designation_at(designations, desigidx)?;
    Ok(TimeType {
        utoff,
        dst,
        abbreviation,
    })
}

/// Read the NUL-terminated designation starting at `start`
fn designation_at(designations: &[u8], start: usize) -> Result<String, TzdataError> {
    let tail = designations
        .get(start..)
        .ok_or(TzdataError::BadDesignation(start))?;
    let end = tail
        .iter()
        .position(|&byte| byte == 0)
        .ok_or(TzdataError::BadDesignation(start))?;
    Ok(String::from_utf8_lossy(&tail[..end]).into_owned())
}

/// Advance `cursor` past `len` bytes and return the consumed slice
fn take<'a>(bytes: &'a [u8], cursor: &mut usize, len: usize) -> Result<&'a [u8], TzdataError> {
    let end = cursor.checked_add(len).ok_or(TzdataError::Truncated)?;
    let slice = bytes.get(*cursor..end).ok_or(TzdataError::Truncated)?;
    *cursor = end;
    Ok(slice)
}

/// Big-endian u32 at `offset`, widened to a count
fn be_count(bytes: &[u8], offset: usize) -> Result<usize, TzdataError> {
    let value = bytes
        .get(offset..offset + 4)
        .and_then(|raw| <[u8; 4]>::try_from(raw).ok())
        .map(u32::from_be_bytes)
        .ok_or(TzdataError::Truncated)?;
    usize::try_from(value).map_err(|_| TzdataError::Truncated)
}

/// Big-endian i32 at `offset`
fn be_i32(bytes: &[u8], offset: usize) -> Result<i32, TzdataError> {
    bytes
        .get(offset..offset + 4)
        .and_then(|raw| <[u8; 4]>::try_from(raw).ok())
        .map(i32::from_be_bytes)
        .ok_or(TzdataError::Truncated)
}

/// Big-endian i64 at `offset`
fn be_i64(bytes: &[u8], offset: usize) -> Result<i64, TzdataError> {
    bytes
        .get(offset..offset + 8)
        .and_then(|raw| <[u8; 8]>::try_from(raw).ok())
        .map(i64::from_be_bytes)
        .ok_or(TzdataError::Truncated)
}
