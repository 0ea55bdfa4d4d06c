pub mod detector;
pub mod message;
pub mod runner;

pub use crate::domain::model::{ListingRecord, MessagePayload, RunReport};
pub use crate::domain::ports::{ConfigProvider, ListingSource, Notifier, SnapshotStore, Storage};
pub use crate::utils::error::Result;
