//! Search page fetch and listing extraction.

use crate::core::{ListingRecord, ListingSource};
use crate::utils::error::{NotifierError, Result};
use crate::utils::validation::parse_web_url;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

/// CSS selectors locating listings on a search result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// One element per listing.
    pub item: String,
    /// Attribute of the item element holding the listing id.
    pub id_attr: String,
    /// Anchor inside the item; its text is the title, its `href` the link.
    pub link: String,
    /// Element inside the item whose digits form the price.
    pub price: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item: ".catalog-list .item".to_string(),
            id_attr: "id".to_string(),
            link: "h3.title a".to_string(),
            price: ".about".to_string(),
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| NotifierError::SelectorError {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\d]").expect("static regex"))
}

/// Digits of `raw` read as a price; [`ListingRecord::NO_PRICE`] when there are
/// none or they overflow.
pub fn parse_price(raw: &str) -> u64 {
    non_digits()
        .replace_all(raw, "")
        .parse()
        .unwrap_or(ListingRecord::NO_PRICE)
}

/// Parses every listing on the page.
///
/// Elements missing the id attribute or the link `href` do not stop the
/// scan; they are collected and reported together as one
/// [`NotifierError::ExtractionError`].
pub fn extract_listings(
    html: &str,
    base_url: &Url,
    selectors: &ListingSelectors,
) -> Result<Vec<ListingRecord>> {
    let item_sel = parse_selector(&selectors.item)?;
    let link_sel = parse_selector(&selectors.link)?;
    let price_sel = parse_selector(&selectors.price)?;

    let document = Html::parse_document(html);
    let mut items = Vec::new();
    let mut failures = Vec::new();

    for (index, element) in document.select(&item_sel).enumerate() {
        match extract_one(element, base_url, selectors, &link_sel, &price_sel) {
            Ok(item) => items.push(item),
            Err(reason) => {
                tracing::warn!("Skipping listing #{}: {}", index, reason);
                failures.push(format!("item #{}: {}", index, reason));
            }
        }
    }

    if !failures.is_empty() {
        return Err(NotifierError::ExtractionError { failures });
    }
    Ok(items)
}

fn extract_one(
    element: ElementRef<'_>,
    base_url: &Url,
    selectors: &ListingSelectors,
    link_sel: &Selector,
    price_sel: &Selector,
) -> std::result::Result<ListingRecord, String> {
    let id = element
        .value()
        .attr(&selectors.id_attr)
        .ok_or_else(|| format!("missing '{}' attribute", selectors.id_attr))?;

    let anchor = element.select(link_sel).next();
    let title = anchor
        .map(|a| a.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    let href = anchor
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| format!("missing link href (id {})", id))?;
    let link = base_url
        .join(href)
        .map_err(|e| format!("bad link href '{}': {}", href, e))?;

    let price = element
        .select(price_sel)
        .next()
        .map(|p| parse_price(&p.inner_html()))
        .unwrap_or(ListingRecord::NO_PRICE);

    Ok(ListingRecord {
        id: id.to_string(),
        title,
        link: link.to_string(),
        price,
    })
}

/// Fetches the search page over HTTP and extracts its listings.
pub struct HttpListingSource {
    client: Client,
    search_url: Url,
    selectors: ListingSelectors,
}

impl HttpListingSource {
    pub fn new(
        search_url: &str,
        selectors: ListingSelectors,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self> {
        let search_url = parse_web_url("search_url", search_url)?;

        let mut builder = Client::builder().timeout(timeout);
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent);
        }

        Ok(Self {
            client: builder.build()?,
            search_url,
            selectors,
        })
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch(&self) -> Result<Vec<ListingRecord>> {
        tracing::debug!("Fetching search page: {}", self.search_url);
        let response = self.client.get(self.search_url.clone()).send().await?;

        let status = response.status();
        tracing::debug!("Search page response status: {}", status);
        if !status.is_success() {
            return Err(NotifierError::FetchStatusError {
                url: self.search_url.to_string(),
                status: status.as_u16(),
            });
        }

        // Final URL after redirects is the base for relative links.
        let base_url = response.url().clone();
        let body = response.text().await?;
        extract_listings(&body, &base_url, &self.selectors)
    }
}
