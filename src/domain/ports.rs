use crate::domain::model::{ListingRecord, MessagePayload};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Raw byte storage the snapshot store writes through.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn search_url(&self) -> &str;
    fn webhook_url(&self) -> &str;
    fn state_dir(&self) -> &Path;
    fn state_file(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn currency(&self) -> &str;
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Previous run's listings; empty when nothing was persisted yet.
    async fn load(&self) -> Result<Vec<ListingRecord>>;
    /// Replaces the persisted listings with `items` in full.
    async fn save(&self, items: &[ListingRecord]) -> Result<()>;
}

#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<ListingRecord>>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, payload: &MessagePayload) -> Result<()>;
}
