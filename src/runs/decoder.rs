// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Data run decoder.
//!
//! ## Run Layout
//!
//! ```text
//! [header : 1 byte]
//!   low nibble  : offset field width in bytes (0..=15)
//!   high nibble : length field width in bytes (0..=15)
//! [length : length_size bytes]  unsigned, LE
//! [offset : offset_size bytes]  two's complement over exactly offset_size*8 bits, LE
//! ```
//!
//! A `0x00` header terminates the list. An offset width of zero marks a
//! sparse run whose offset is 0.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{DecodeError, RunField};

// ─────────────────────────────── types ───────────────────────────────────────

/// The one-byte run header split into its two field widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunHeader {
    pub raw: u8,
    /// Width of the length field in bytes (high nibble).
    pub length_size: usize,
    /// Width of the offset field in bytes (low nibble).
    pub offset_size: usize,
}

impl RunHeader {
    pub fn from_byte(raw: u8) -> Self {
        Self {
            raw,
            length_size: usize::from(raw >> 4),
            offset_size: usize::from(raw & 0x0F),
        }
    }

    pub fn is_terminator(&self) -> bool {
        self.raw == 0
    }
}

/// One decoded data run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub header: RunHeader,
    pub length_in_clusters: u64,
    /// Signed delta from the previous run's starting cluster.
    pub relative_offset_in_clusters: i64,
    /// Offset field as read, before sign correction.
    pub raw_offset: u128,
}

impl Run {
    pub fn is_sparse(&self) -> bool {
        self.header.offset_size == 0
    }
}

// ─────────────────────────────── functions ───────────────────────────────────

/// Interpret the low `width` bytes of `raw` as a two's-complement integer of
/// exactly `width * 8` bits. A zero width yields 0.
pub fn sign_extend(raw: u128, width: usize) -> i128 {
    if width == 0 {
        return 0;
    }
    let bits = width * 8;
    if bits >= 128 {
        return raw as i128;
    }
    let value = raw & ((1u128 << bits) - 1);
    if value & (1u128 << (bits - 1)) != 0 {
        value as i128 - (1i128 << bits)
    } else {
        value as i128
    }
}

/// Turn a hex string into bytes. Whitespace between tokens is ignored, so
/// `"21 18 34 56"` and `"21183456"` are equivalent.
pub fn normalize_hex(input: &str) -> Result<Vec<u8>, DecodeError> {
    let digits: String = input.split_whitespace().collect();
    hex::decode(&digits).map_err(|e| DecodeError::MalformedInput { reason: e.to_string() })
}

/// Decode a hex data run string into its runs.
pub fn decode(input: &str) -> Result<Vec<Run>, DecodeError> {
    let bytes = normalize_hex(input)?;
    decode_bytes(&bytes)
}

/// Decode raw data run bytes into their runs.
pub fn decode_bytes(bytes: &[u8]) -> Result<Vec<Run>, DecodeError> {
    let runs = RunDecoder::new(bytes).collect::<Result<Vec<_>, _>>()?;
    debug!(runs = runs.len(), bytes = bytes.len(), "Data run decoded");
    Ok(runs)
}

// ─────────────────────────────── RunDecoder ──────────────────────────────────

/// Streaming decoder over a data run byte slice.
///
/// Yields one `Run` per header until the input is exhausted or a `0x00`
/// header is reached. After an error it yields nothing further.
pub struct RunDecoder<'a> {
    cursor: Cursor<&'a [u8]>,
    /// Number of runs emitted so far.
    run: usize,
    done: bool,
}

impl<'a> RunDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { cursor: Cursor::new(bytes), run: 0, done: false }
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    fn read_field(&mut self, run: usize, width: usize, field: RunField) -> Result<u128, DecodeError> {
        if width == 0 {
            return Ok(0);
        }
        let available = self.remaining();
        let truncated = DecodeError::TruncatedInput { run, field, needed: width, available };
        if available < width {
            return Err(truncated);
        }
        self.cursor.read_uint128::<LittleEndian>(width).map_err(|_| truncated)
    }

    fn next_run(&mut self) -> Result<Option<Run>, DecodeError> {
        if self.remaining() == 0 {
            return Ok(None);
        }
        let run = self.run + 1;
        let header = self.read_field(run, 1, RunField::Header)? as u8;
        let header = RunHeader::from_byte(header);
        if header.is_terminator() {
            trace!(run, remaining = self.remaining(), "Terminator header");
            return Ok(None);
        }

        let raw_length = self.read_field(run, header.length_size, RunField::Length)?;
        let length_in_clusters = u64::try_from(raw_length)
            .map_err(|_| DecodeError::FieldOverflow { run, field: RunField::Length })?;

        let raw_offset = self.read_field(run, header.offset_size, RunField::Offset)?;
        let relative_offset_in_clusters = i64::try_from(sign_extend(raw_offset, header.offset_size))
            .map_err(|_| DecodeError::FieldOverflow { run, field: RunField::Offset })?;

        trace!(
            run,
            header = %format_args!("{:02X}", header.raw),
            length = length_in_clusters,
            raw_offset = %raw_offset,
            offset = relative_offset_in_clusters,
            "Run decoded"
        );

        self.run = run;
        Ok(Some(Run { header, length_in_clusters, relative_offset_in_clusters, raw_offset }))
    }
}

impl Iterator for RunDecoder<'_> {
    type Item = Result<Run, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_run() {
            Ok(Some(run)) => Some(Ok(run)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
