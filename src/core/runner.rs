use crate::core::detector::detect_changes;
use crate::core::message::build_message;
use crate::domain::model::RunReport;
use crate::domain::ports::{ListingSource, Notifier, SnapshotStore};
use crate::utils::error::Result;

/// One load → fetch → detect → notify → save cycle.
pub struct Runner<St: SnapshotStore, Src: ListingSource, N: Notifier> {
    store: St,
    source: Src,
    notifier: N,
    currency: String,
}

impl<St: SnapshotStore, Src: ListingSource, N: Notifier> Runner<St, Src, N> {
    pub fn new(store: St, source: Src, notifier: N, currency: impl Into<String>) -> Self {
        Self {
            store,
            source,
            notifier,
            currency: currency.into(),
        }
    }

    /// Load, fetch and save errors abort the run; a failed load or fetch
    /// leaves the snapshot untouched. Delivery errors are only logged.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting listing check");

        let previous = self.store.load().await?;
        tracing::debug!("Loaded {} listings from snapshot", previous.len());

        let current = self.source.fetch().await?;
        tracing::info!("Fetched {} listings", current.len());

        let change_set = detect_changes(&previous, &current);
        tracing::info!("{} new or cheaper listings", change_set.len());

        let mut notified = false;
        if !change_set.is_empty() {
            let payload = build_message(&change_set, &self.currency);
            match self.notifier.send(&payload).await {
                Ok(()) => {
                    tracing::info!("Notification sent for {} listings", change_set.len());
                    notified = true;
                }
                Err(e) => tracing::warn!("Notification delivery failed: {}", e),
            }
        }

        self.store.save(&current).await?;
        tracing::debug!("Snapshot updated with {} listings", current.len());

        Ok(RunReport {
            fetched: current.len(),
            changed: change_set.len(),
            notified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ListingRecord, MessagePayload};
    use crate::utils::error::NotifierError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStore {
        saved: Arc<Mutex<Option<Vec<ListingRecord>>>>,
        previous: Vec<ListingRecord>,
        fail_load: bool,
        fail_save: bool,
    }

    #[async_trait]
    impl SnapshotStore for MockStore {
        async fn load(&self) -> Result<Vec<ListingRecord>> {
            if self.fail_load {
                return Err(NotifierError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "denied",
                )));
            }
            Ok(self.previous.clone())
        }

        async fn save(&self, items: &[ListingRecord]) -> Result<()> {
            if self.fail_save {
                return Err(NotifierError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only state dir",
                )));
            }
            *self.saved.lock().await = Some(items.to_vec());
            Ok(())
        }
    }

    struct MockSource {
        listings: Option<Vec<ListingRecord>>,
    }

    #[async_trait]
    impl ListingSource for MockSource {
        async fn fetch(&self) -> Result<Vec<ListingRecord>> {
            self.listings
                .clone()
                .ok_or_else(|| NotifierError::FetchStatusError {
                    url: "https://www.avito.ru/search".to_string(),
                    status: 502,
                })
        }
    }

    #[derive(Clone, Default)]
    struct MockNotifier {
        sent: Arc<Mutex<Vec<MessagePayload>>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn send(&self, payload: &MessagePayload) -> Result<()> {
            self.sent.lock().await.push(payload.clone());
            if self.fail {
                return Err(NotifierError::FetchStatusError {
                    url: "https://hooks.slack.com/services/T/B/X".to_string(),
                    status: 500,
                });
            }
            Ok(())
        }
    }

    fn rec(id: &str, price: u64) -> ListingRecord {
        ListingRecord::new(id, format!("Item {}", id), format!("https://www.avito.ru/{}", id), price)
    }

    #[tokio::test]
    async fn test_run_notifies_once_and_saves_current() {
        let store = MockStore {
            previous: vec![rec("A", 1000)],
            ..Default::default()
        };
        let current = vec![rec("A", 800), rec("B", 0)];
        let notifier = MockNotifier::default();
        let runner = Runner::new(
            store.clone(),
            MockSource { listings: Some(current.clone()) },
            notifier.clone(),
            "руб.",
        );

        let report = runner.run().await.unwrap();

        assert_eq!(report, RunReport { fetched: 2, changed: 2, notified: true });
        let sent = notifier.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].text,
            "<https://www.avito.ru/A|Item A> за *800* руб.\n\n<https://www.avito.ru/B|Item B>\n\n"
        );
        assert_eq!(store.saved.lock().await.clone(), Some(current));
    }

    #[tokio::test]
    async fn test_run_without_changes_skips_notification_but_saves() {
        let previous = vec![rec("A", 800)];
        let store = MockStore {
            previous: previous.clone(),
            ..Default::default()
        };
        let notifier = MockNotifier::default();
        let current = vec![rec("A", 900)];
        let runner = Runner::new(
            store.clone(),
            MockSource { listings: Some(current.clone()) },
            notifier.clone(),
            "руб.",
        );

        let report = runner.run().await.unwrap();

        assert_eq!(report, RunReport { fetched: 1, changed: 0, notified: false });
        assert!(notifier.sent.lock().await.is_empty());
        assert_eq!(store.saved.lock().await.clone(), Some(current));
    }

    #[tokio::test]
    async fn test_delivery_failure_still_saves() {
        let store = MockStore::default();
        let notifier = MockNotifier {
            fail: true,
            ..Default::default()
        };
        let current = vec![rec("A", 10)];
        let runner = Runner::new(
            store.clone(),
            MockSource { listings: Some(current.clone()) },
            notifier.clone(),
            "руб.",
        );

        let report = runner.run().await.unwrap();

        assert!(!report.notified);
        assert_eq!(report.changed, 1);
        assert_eq!(notifier.sent.lock().await.len(), 1);
        assert_eq!(store.saved.lock().await.clone(), Some(current));
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_without_save_or_notification() {
        let store = MockStore::default();
        let notifier = MockNotifier::default();
        let runner = Runner::new(store.clone(), MockSource { listings: None }, notifier.clone(), "руб.");

        let err = runner.run().await.unwrap_err();

        assert!(matches!(err, NotifierError::FetchStatusError { status: 502, .. }));
        assert!(notifier.sent.lock().await.is_empty());
        assert!(store.saved.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_load_failure_aborts_before_fetch() {
        let store = MockStore {
            fail_load: true,
            ..Default::default()
        };
        let notifier = MockNotifier::default();
        let runner = Runner::new(
            store.clone(),
            MockSource { listings: Some(vec![rec("A", 1)]) },
            notifier.clone(),
            "руб.",
        );

        assert!(matches!(runner.run().await, Err(NotifierError::IoError(_))));
        assert!(notifier.sent.lock().await.is_empty());
        assert!(store.saved.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_save_failure_is_fatal() {
        let store = MockStore {
            previous: vec![rec("A", 1000)],
            fail_save: true,
            ..Default::default()
        };
        let notifier = MockNotifier::default();
        let runner = Runner::new(
            store.clone(),
            MockSource { listings: Some(vec![rec("A", 800)]) },
            notifier.clone(),
            "руб.",
        );

        let err = runner.run().await.unwrap_err();

        assert!(matches!(err, NotifierError::IoError(_)));
        assert_eq!(err.exit_code(), 3);
        // Delivery happens before the save, so the drop was still announced.
        assert_eq!(notifier.sent.lock().await.len(), 1);
        assert!(store.saved.lock().await.is_none());
    }
}
