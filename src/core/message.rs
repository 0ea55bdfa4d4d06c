use crate::domain::model::{ListingRecord, MessagePayload};

pub const DEFAULT_CURRENCY: &str = "руб.";

/// Renders the change set as one Slack-formatted message.
///
/// Each listing becomes `<link|title>`, followed by ` за *price* currency`
/// when a price is known, and a blank line.
pub fn build_message(items: &[ListingRecord], currency: &str) -> MessagePayload {
    let mut text = String::new();
    for item in items {
        text.push_str(&format!("<{}|{}>", item.link, item.title));
        if item.has_price() {
            text.push_str(&format!(" за *{}* {}", item.price, currency));
        }
        text.push_str("\n\n");
    }
    MessagePayload { text }
}
