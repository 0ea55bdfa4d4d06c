use serde::{Deserialize, Serialize};

/// One listing as observed on the search page at fetch time.
///
/// `price == 0` means the page showed no parseable price. It is never a free
/// listing; see [`ListingRecord::has_price`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(default, alias = "Title")]
    pub title: String,
    #[serde(default, alias = "Link")]
    pub link: String,
    #[serde(default, alias = "Price")]
    pub price: u64,
}

impl ListingRecord {
    pub const NO_PRICE: u64 = 0;

    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        link: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            link: link.into(),
            price,
        }
    }

    pub fn has_price(&self) -> bool {
        self.price != Self::NO_PRICE
    }
}

/// Body posted to the webhook: `{"text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub text: String,
}

/// Summary of one invocation, returned by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub fetched: usize,
    pub changed: usize,
    /// True only when a message was sent and the endpoint accepted it.
    pub notified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_price_is_no_price() {
        assert!(!ListingRecord::new("1", "Bike", "https://x/1", 0).has_price());
        assert!(ListingRecord::new("1", "Bike", "https://x/1", 1).has_price());
    }

    #[test]
    fn test_snapshot_field_names() {
        let record = ListingRecord::new("i42", "Sofa", "https://www.avito.ru/i42", 1500);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "i42", "title": "Sofa", "link": "https://www.avito.ru/i42", "price": 1500})
        );
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let record: ListingRecord = serde_json::from_str(r#"{"id": "i7"}"#).unwrap();
        assert_eq!(record, ListingRecord::new("i7", "", "", 0));
        assert!(serde_json::from_str::<ListingRecord>(r#"{"title": "no id"}"#).is_err());
    }

    #[test]
    fn test_reads_capitalized_legacy_fields() {
        let raw = r#"{"ID": "i9", "Title": "Desk", "Link": "https://www.avito.ru/i9", "Price": 700}"#;
        let record: ListingRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record, ListingRecord::new("i9", "Desk", "https://www.avito.ru/i9", 700));
    }
}
