// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Carver: copy resolved ranges out of a raw image into a reconstructed file.
//!
//! Ranges are copied strictly in run order, which is the file's logical
//! order. Any failure aborts the whole carve; bytes already written to the
//! sink stay there.

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::config::SparsePolicy;
use crate::error::CarveError;
use crate::runs::ResolvedRange;

const COPY_BUF_SIZE: usize = 64 * 1024;

/// Copy every range from `source` into `sink`, reading sparse ranges like
/// any other. Returns the number of bytes written.
pub fn carve<R, W>(ranges: &[ResolvedRange], source: &mut R, sink: &mut W) -> Result<u64, CarveError>
where
    R: Read + Seek,
    W: Write,
{
    carve_with(ranges, source, sink, SparsePolicy::Copy)
}

/// Like [`carve`], with an explicit treatment for sparse ranges.
pub fn carve_with<R, W>(
    ranges: &[ResolvedRange],
    source: &mut R,
    sink: &mut W,
    sparse: SparsePolicy,
) -> Result<u64, CarveError>
where
    R: Read + Seek,
    W: Write,
{
    let medium_len = source.seek(SeekFrom::End(0)).map_err(CarveError::SourceRead)?;
    let mut buf = vec![0u8; COPY_BUF_SIZE];
    let mut written: u64 = 0;

    for range in ranges {
        let len = range.byte_len();

        if range.sparse && sparse == SparsePolicy::ZeroFill {
            write_zeros(sink, len, &mut buf)?;
            debug!(run = range.run_index, length = %len, "Sparse segment zero-filled");
            written = written.saturating_add(u64::try_from(len).unwrap_or(u64::MAX));
            continue;
        }

        let start = u64::try_from(range.start_byte)
            .ok()
            .filter(|s| *s <= medium_len)
            .ok_or(CarveError::SeekOutOfRange {
                run: range.run_index,
                start_byte: range.start_byte,
                medium_len,
            })?;

        let available = u128::from(medium_len - start);
        if len > available {
            return Err(CarveError::SourceTooShort {
                run: range.run_index,
                requested: len,
                available,
            });
        }

        source.seek(SeekFrom::Start(start)).map_err(CarveError::SourceRead)?;
        copy_exact(source, sink, len, &mut buf, range.run_index)?;

        debug!(
            run = range.run_index,
            start,
            end = %range.end_byte,
            length = %len,
            "Segment written"
        );
        // len <= medium_len, so it fits.
        written += len as u64;
    }

    info!(runs = ranges.len(), bytes = written, "Carve complete");
    Ok(written)
}

/// Carve `ranges` out of the image at `source_path` into `output_path`.
///
/// The output is created (or truncated) only after the source is known to
/// exist. On failure, whatever was written so far is left on disk.
pub fn carve_to_file(
    ranges: &[ResolvedRange],
    source_path: &Path,
    output_path: &Path,
    sparse: SparsePolicy,
) -> Result<u64, CarveError> {
    if !source_path.is_file() {
        return Err(CarveError::SourceNotFound { path: source_path.to_path_buf() });
    }

    let mut source = File::open(source_path).map_err(CarveError::SourceRead)?;
    let mut sink = BufWriter::new(File::create(output_path).map_err(CarveError::SinkWriteFailure)?);

    info!(source = ?source_path, output = ?output_path, runs = ranges.len(), "Starting reconstruction");
    let written = carve_with(ranges, &mut source, &mut sink, sparse)?;
    sink.flush().map_err(CarveError::SinkWriteFailure)?;

    info!(output = ?output_path, bytes = written, "Reconstructed file saved");
    Ok(written)
}

fn copy_exact<R: Read, W: Write>(
    source: &mut R,
    sink: &mut W,
    len: u128,
    buf: &mut [u8],
    run: usize,
) -> Result<(), CarveError> {
    let mut remaining = len;
    while remaining > 0 {
        let chunk = remaining.min(buf.len() as u128) as usize;
        source.read_exact(&mut buf[..chunk]).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => CarveError::SourceTooShort {
                run,
                requested: len,
                available: len - remaining,
            },
            _ => CarveError::SourceRead(e),
        })?;
        sink.write_all(&buf[..chunk]).map_err(CarveError::SinkWriteFailure)?;
        remaining -= chunk as u128;
    }
    Ok(())
}

fn write_zeros<W: Write>(sink: &mut W, len: u128, buf: &mut [u8]) -> Result<(), CarveError> {
    buf.fill(0);
    let mut remaining = len;
    while remaining > 0 {
        let chunk = remaining.min(buf.len() as u128) as usize;
        sink.write_all(&buf[..chunk]).map_err(CarveError::SinkWriteFailure)?;
        remaining -= chunk as u128;
    }
    Ok(())
}
