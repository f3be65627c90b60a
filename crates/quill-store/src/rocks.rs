// crates/quill-store/src/rocks.rs
//
// RocksDB-backed persistent storage for Quill records.
//
// One database holds every record kind. Key format:
//   - `{collection}:{store_key}` -> JSON-serialized record
//
// e.g. `credential:{hash}`, `identity:{did}`, `approval:{uuid}`.
// A put under an existing key overwrites it, which gives the per-key
// uniqueness the router's upsert relies on.

use async_trait::async_trait;
use rocksdb::{DBWithThreadMode, MultiThreaded, Options};

use quill_core::error::QuillError;
use quill_core::records::StoredRecord;
use quill_core::traits::RecordStore;

/// RocksDB wrapper implementing `RecordStore` for every record kind.
#[derive(Debug)]
pub struct RocksRecordStore {
    db: DBWithThreadMode<MultiThreaded>,
}

impl RocksRecordStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, QuillError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path)
            .map_err(|e| {
                QuillError::Storage(format!("Failed to open RocksDB at {}: {}", path, e))
            })?;

        Ok(Self { db })
    }

    /// Build the record key: `{collection}:{store_key}`.
    fn record_key<R: StoredRecord>(key: &str) -> Vec<u8> {
        format!("{}:{}", R::COLLECTION, key).into_bytes()
    }

    /// Put raw bytes into RocksDB, mapping errors to QuillError::Storage.
    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), QuillError> {
        self.db
            .put(key, value)
            .map_err(|e| QuillError::Storage(format!("RocksDB put failed: {}", e)))
    }

    /// Get raw bytes from RocksDB, mapping errors to QuillError::Storage.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, QuillError> {
        self.db
            .get(key)
            .map_err(|e| QuillError::Storage(format!("RocksDB get failed: {}", e)))
    }

    /// Get a record by key without going through the async trait.
    pub fn get_record_sync<R: StoredRecord>(&self, key: &str) -> Result<Option<R>, QuillError> {
        match self.get_raw(&Self::record_key::<R>(key))? {
            Some(bytes) => {
                let record: R = serde_json::from_slice(&bytes)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Store a record synchronously under its natural key.
    pub fn save_record_sync<R: StoredRecord>(&self, mut record: R) -> Result<R, QuillError> {
        record.touch();
        let json = serde_json::to_vec(&record)?;
        self.put_raw(&Self::record_key::<R>(&record.store_key()), &json)?;
        Ok(record)
    }

    /// Count records of one kind by scanning its key prefix.
    pub fn count<R: StoredRecord>(&self) -> Result<usize, QuillError> {
        let prefix_str = format!("{}:", R::COLLECTION);
        let prefix = prefix_str.as_bytes();
        let mut count = 0;

        for item in self.db.prefix_iterator(prefix) {
            let (key, _value) = item
                .map_err(|e| QuillError::Storage(format!("RocksDB iteration error: {}", e)))?;

            // Stop when the prefix no longer matches.
            if !key.starts_with(prefix) {
                break;
            }
            count += 1;
        }

        Ok(count)
    }
}

#[async_trait]
impl<R: StoredRecord> RecordStore<R> for RocksRecordStore {
    async fn find_one(&self, key: &str) -> Result<Option<R>, QuillError> {
        self.get_record_sync(key)
    }

    async fn save(&self, record: R) -> Result<R, QuillError> {
        self.save_record_sync(record)
    }
}
