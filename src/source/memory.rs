//! In-memory table source.

use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;
use bytes::Bytes;

use super::{encode_ipc, TableSource};
use crate::error::{Error, Result};
use crate::table::ColumnarTable;

/// A table source serving payloads held in memory, keyed by location.
///
/// Useful for tests and for embedding a preview without a server.
///
/// # Example
///
/// ```
/// use vitrina::source::{MemoryTableSource, TableSource};
/// use vitrina::ColumnarTable;
///
/// # tokio_test_block(async {
/// let source = MemoryTableSource::new();
/// source.insert_table("/arrow_preview", &ColumnarTable::empty()).unwrap();
/// let table = source.fetch("/arrow_preview").await.unwrap();
/// assert_eq!(table.num_rows(), 0);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryTableSource {
    payloads: RwLock<HashMap<String, Bytes>>,
}

impl MemoryTableSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw payload under `location`, replacing any previous one.
    pub fn insert(&self, location: impl Into<String>, payload: Bytes) {
        if let Ok(mut payloads) = self.payloads.write() {
            payloads.insert(location.into(), payload);
        }
    }

    /// Encodes `table` as an IPC stream and stores it under `location`.
    ///
    /// # Errors
    ///
    /// Returns an Arrow error if the table cannot be encoded.
    pub fn insert_table(&self, location: impl Into<String>, table: &ColumnarTable) -> Result<()> {
        self.insert(location, encode_ipc(table)?);
        Ok(())
    }

    /// Removes the payload stored under `location`.
    pub fn remove(&self, location: &str) -> Option<Bytes> {
        self.payloads.write().ok()?.remove(location)
    }

    /// Returns the number of stored payloads.
    pub fn len(&self) -> usize {
        self.payloads.read().map(|p| p.len()).unwrap_or(0)
    }

    /// Returns true if no payloads are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TableSource for MemoryTableSource {
    async fn fetch_bytes(&self, location: &str) -> Result<Bytes> {
        let payloads = self
            .payloads
            .read()
            .map_err(|_| Error::fetch(location, "failed to acquire read lock"))?;

        payloads
            .get(location)
            .cloned()
            .ok_or_else(|| Error::NotFound(location.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Int32Array, RecordBatch};
    use arrow::datatypes::{DataType, Field, Schema};

    use super::*;

    fn create_test_table() -> ColumnarTable {
        let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int32, true)]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(Int32Array::from(vec![Some(1), None]))],
        )
        .unwrap();
        ColumnarTable::from_batch(batch).unwrap()
    }

    #[tokio::test]
    async fn test_insert_table_and_fetch() {
        let source = MemoryTableSource::new();
        source.insert_table("t", &create_test_table()).unwrap();
        assert_eq!(source.len(), 1);

        let table = source.fetch("t").await.unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.cell(0, 0), Some("1".to_string()));
        assert_eq!(table.cell(1, 0), None);
    }

    #[tokio::test]
    async fn test_fetch_unknown_location() {
        let source = MemoryTableSource::new();
        let result = source.fetch("missing").await;
        assert!(matches!(result, Err(Error::NotFound(ref key)) if key == "missing"));
    }

    #[tokio::test]
    async fn test_fetch_raw_garbage_fails_decode() {
        let source = MemoryTableSource::new();
        source.insert("bad", Bytes::from_static(&[0xFF, 0xFF, 0xFF, 0xFF, 4, 0, 0, 0, 9, 9, 9, 9]));
        let result = source.fetch("bad").await;
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[tokio::test]
    async fn test_empty_payload_is_empty_table() {
        let source = MemoryTableSource::new();
        source.insert("empty", Bytes::new());
        let table = source.fetch("empty").await.unwrap();
        assert_eq!(table.num_columns(), 0);
    }

    #[test]
    fn test_remove() {
        let source = MemoryTableSource::new();
        source.insert("k", Bytes::from_static(b"x"));
        assert!(source.remove("k").is_some());
        assert!(source.is_empty());
        assert!(source.remove("k").is_none());
    }
}
