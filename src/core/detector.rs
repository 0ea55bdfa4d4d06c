use crate::domain::model::ListingRecord;

/// Returns the listings in `current` worth notifying about, in `current` order.
///
/// A listing is reported when its id is absent from `previous`, or when every
/// previous record with that id had a strictly higher price. The scan over
/// `previous` stops at the first same-id record whose price is not above the
/// current one, so with duplicate ids in `previous` a single such record is
/// enough to suppress the listing.
pub fn detect_changes(previous: &[ListingRecord], current: &[ListingRecord]) -> Vec<ListingRecord> {
    current
        .iter()
        .filter(|item| is_notify_worthy(item, previous))
        .cloned()
        .collect()
}

pub fn is_notify_worthy(item: &ListingRecord, previous: &[ListingRecord]) -> bool {
    !previous
        .iter()
        .any(|old| old.id == item.id && item.price >= old.price)
}
