// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which field of a run a decode error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunField {
    Header,
    Length,
    Offset,
}

impl fmt::Display for RunField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunField::Header => f.write_str("header"),
            RunField::Length => f.write_str("length"),
            RunField::Offset => f.write_str("offset"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed data run input: {reason}")]
    MalformedInput { reason: String },

    /// `run` is 1-based.
    #[error("Run {run}: {field} field needs {needed} bytes, only {available} remain")]
    TruncatedInput {
        run: usize,
        field: RunField,
        needed: usize,
        available: usize,
    },

    #[error("Run {run}: {field} value does not fit in 64 bits")]
    FieldOverflow { run: usize, field: RunField },
}

#[derive(Debug, Error)]
pub enum CarveError {
    #[error("Source file {path:?} does not exist")]
    SourceNotFound { path: PathBuf },

    #[error("Run {run}: start byte {start_byte} is outside the source (length {medium_len})")]
    SeekOutOfRange {
        run: usize,
        start_byte: i128,
        medium_len: u64,
    },

    #[error("Run {run}: needs {requested} bytes but only {available} are available")]
    SourceTooShort {
        run: usize,
        requested: u128,
        available: u128,
    },

    #[error("Cannot read source: {0}")]
    SourceRead(#[source] std::io::Error),

    #[error("Cannot write output, reconstruction is incomplete: {0}")]
    SinkWriteFailure(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DataRunError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Carve(#[from] CarveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DataRunError>;
