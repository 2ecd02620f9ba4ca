//! Table sources.
//!
//! A [`TableSource`] turns a location into a decoded [`ColumnarTable`]. The
//! only suspension point is fetching the raw bytes; decoding is synchronous
//! and shared by every source through [`decode_ipc`].
//!
//! Sources never retry. Transport, status and decode failures propagate to
//! the caller as typed errors.

#[cfg(feature = "http")]
pub mod http;
pub mod local;
pub mod memory;

use std::io::Cursor;
use std::panic;

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use arrow::ipc::reader::StreamReader;
use arrow::ipc::writer::StreamWriter;
use async_trait::async_trait;
use bytes::Bytes;
#[cfg(feature = "http")]
pub use http::HttpTableSource;
pub use local::FileTableSource;
pub use memory::MemoryTableSource;

use crate::error::{Error, Result};
use crate::table::ColumnarTable;

/// Leading and trailing magic of the Arrow IPC file format.
const IPC_FILE_MAGIC: &[u8] = b"ARROW1";

/// Magic plus padding before the embedded stream of an IPC file.
const IPC_FILE_PREAMBLE: usize = 8;

/// Marker preceding a message length in the current stream framing.
const CONTINUATION_MARKER: i32 = -1;

/// A provider of Arrow IPC tables.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Retrieve the raw payload stored at `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be retrieved.
    async fn fetch_bytes(&self, location: &str) -> Result<Bytes>;

    /// Retrieve and decode the table stored at `location`.
    ///
    /// # Errors
    ///
    /// Returns the retrieval error from [`fetch_bytes`](Self::fetch_bytes),
    /// or [`Error::Decode`] if the payload is not Arrow IPC.
    async fn fetch(&self, location: &str) -> Result<ColumnarTable> {
        let bytes = self.fetch_bytes(location).await?;
        log::info!("fetched {} bytes from '{location}'", bytes.len());
        decode_ipc(&bytes)
    }
}

/// Decode an Arrow IPC payload in either the file or the stream format.
///
/// An empty payload decodes to [`ColumnarTable::empty`]: preview endpoints
/// answer with an empty body when there is nothing to show.
///
/// An IPC file embeds a complete stream after its magic, so both formats are
/// read by the same stream decoder; the footer is not consulted. Every
/// message length is checked against the payload before arrow sees it, and a
/// panic inside the arrow reader surfaces as a decode error.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the payload is malformed.
pub fn decode_ipc(bytes: &[u8]) -> Result<ColumnarTable> {
    if bytes.is_empty() {
        return Ok(ColumnarTable::empty());
    }

    let stream = if bytes.starts_with(IPC_FILE_MAGIC) {
        let too_short = bytes.len() < IPC_FILE_PREAMBLE + IPC_FILE_MAGIC.len();
        if too_short || !bytes.ends_with(IPC_FILE_MAGIC) {
            return Err(Error::decode("IPC file: missing trailing magic"));
        }
        &bytes[IPC_FILE_PREAMBLE..]
    } else {
        bytes
    };

    check_stream_framing(stream)?;

    let (schema, batches) = match panic::catch_unwind(|| read_stream(stream)) {
        Ok(decoded) => decoded?,
        Err(panic_payload) => {
            let msg: String = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "reader panicked".to_string()
            };
            log::warn!("arrow IPC reader rejected payload: {msg}");
            return Err(Error::decode(format!("IPC stream: {msg}")));
        }
    };

    ColumnarTable::from_batches(batches, schema)
}

fn read_stream(stream: &[u8]) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let reader = StreamReader::try_new(Cursor::new(stream), None)
        .map_err(|e| Error::decode(format!("IPC stream header: {e}")))?;
    let schema = reader.schema();
    let batches = reader
        .collect::<std::result::Result<Vec<RecordBatch>, _>>()
        .map_err(|e| Error::decode(format!("IPC stream batch: {e}")))?;
    Ok((schema, batches))
}

fn read_i32_le(stream: &[u8], pos: usize) -> Result<i32> {
    stream
        .get(pos..pos.saturating_add(4))
        .and_then(|b| <[u8; 4]>::try_from(b).ok())
        .map(i32::from_le_bytes)
        .ok_or_else(|| Error::decode(format!("IPC stream: truncated length at byte {pos}")))
}

/// Walk the message framing up to the end-of-stream marker, checking that
/// every metadata block and body lies inside `stream`.
///
/// The arrow reader sizes its buffers from these lengths before reading, so
/// they must be bounded by the payload.
fn check_stream_framing(stream: &[u8]) -> Result<()> {
    let mut pos = 0;
    let mut messages = 0usize;

    while pos < stream.len() {
        let mut len = read_i32_le(stream, pos)?;
        pos += 4;
        if len == CONTINUATION_MARKER {
            len = read_i32_le(stream, pos)?;
            pos += 4;
        }
        if len == 0 {
            return Ok(());
        }

        let meta_len = usize::try_from(len)
            .map_err(|_| Error::decode(format!("IPC stream: negative metadata length {len}")))?;
        let meta = pos
            .checked_add(meta_len)
            .and_then(|end| stream.get(pos..end))
            .ok_or_else(|| {
                Error::decode(format!(
                    "IPC stream: metadata of {meta_len} bytes exceeds payload at byte {pos}"
                ))
            })?;
        let message = arrow::ipc::root_as_message(meta)
            .map_err(|e| Error::decode(format!("IPC stream: invalid message {messages}: {e}")))?;
        pos += meta_len;

        let body_len = usize::try_from(message.bodyLength())
            .ok()
            .filter(|len| *len <= stream.len() - pos)
            .ok_or_else(|| {
                Error::decode(format!(
                    "IPC stream: body length {} of message {messages} exceeds payload",
                    message.bodyLength()
                ))
            })?;
        pos += body_len;
        messages += 1;
    }
    Ok(())
}

/// Encode a table as an Arrow IPC stream.
///
/// # Errors
///
/// Returns an Arrow error if a batch cannot be written.
pub fn encode_ipc(table: &ColumnarTable) -> Result<Bytes> {
    let mut buf = Vec::new();
    {
        let mut writer = StreamWriter::try_new(&mut buf, table.schema())?;
        for batch in table.batches() {
            writer.write(batch)?;
        }
        writer.finish()?;
    }
    Ok(Bytes::from(buf))
}

/// Column names of `table` in schema order.
pub fn column_names(table: &ColumnarTable) -> Vec<String> {
    table
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}
