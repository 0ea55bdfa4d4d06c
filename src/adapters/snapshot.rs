use crate::core::{ListingRecord, SnapshotStore, Storage};
use crate::utils::error::{NotifierError, Result};
use async_trait::async_trait;

pub const DEFAULT_STATE_FILE: &str = "listing-notifier.json";

/// Snapshot persisted as a JSON array in a single file of a [`Storage`].
pub struct JsonSnapshotStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> JsonSnapshotStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> SnapshotStore for JsonSnapshotStore<S> {
    async fn load(&self) -> Result<Vec<ListingRecord>> {
        let data = match self.storage.read_file(&self.file_name).await {
            Ok(data) => data,
            Err(NotifierError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Snapshot {} does not exist yet, starting empty", self.file_name);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let items: Vec<ListingRecord> = serde_json::from_slice(&data)?;
        Ok(items)
    }

    async fn save(&self, items: &[ListingRecord]) -> Result<()> {
        let data = serde_json::to_vec_pretty(items)?;
        tracing::debug!("Writing snapshot ({} bytes) to {}", data.len(), self.file_name);
        self.storage.write_file(&self.file_name, &data).await
    }
}
