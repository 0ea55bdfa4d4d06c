// Adapters layer: concrete implementations of the domain ports.

pub mod snapshot;
pub mod source;
pub mod webhook;

pub use snapshot::JsonSnapshotStore;
pub use source::{HttpListingSource, ListingSelectors};
pub use webhook::WebhookNotifier;
