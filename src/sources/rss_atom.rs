use feed_rs::parser;
use reqwest::blocking::Client;

use crate::domain::FeedItem;
use crate::errors::{FeederError, FeederResult};
use crate::sources::traits::FeedSource;

/// Fetches RSS, Atom and JSON Feed documents over HTTP
pub struct RssAtomSource {
    client: Client,
}

impl RssAtomSource {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn fetch_bytes(&self, url: &str) -> FeederResult<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }

    fn items_from_bytes(bytes: &[u8]) -> FeederResult<Vec<FeedItem>> {
        let parsed = parser::parse(bytes).map_err(|e| FeederError::FeedParse(e.to_string()))?;

        let items = parsed
            .entries
            .into_iter()
            .map(|entry| {
                let title = entry
                    .title
                    .map(|t| t.content)
                    .unwrap_or_else(|| "Untitled".to_string());

                let link = entry.links.into_iter().next().map(|l| l.href);

                FeedItem::new(title)
                    .with_link(link)
                    .with_published(entry.published.or(entry.updated))
            })
            .collect();

        Ok(items)
    }
}

impl Default for RssAtomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedSource for RssAtomSource {
    fn fetch_items(&self, url: &str) -> FeederResult<Vec<FeedItem>> {
        let bytes = self.fetch_bytes(url)?;
        Self::items_from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    // Sample RSS feed (based on Rust Blog format)
    const SAMPLE_RSS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Rust Blog</title>
    <link>https://blog.rust-lang.org/</link>
    <description>Empowering everyone to build reliable and efficient software.</description>
    <item>
      <title>Announcing Rust 1.75.0</title>
      <link>https://blog.rust-lang.org/2023/12/28/Rust-1.75.0.html</link>
      <pubDate>Thu, 28 Dec 2023 00:00:00 +0000</pubDate>
      <guid>https://blog.rust-lang.org/2023/12/28/Rust-1.75.0.html</guid>
    </item>
    <item>
      <title>Rust 2024 Call for Testing</title>
      <link>https://blog.rust-lang.org/2024/01/10/Rust-2024-CFT.html</link>
      <pubDate>Wed, 10 Jan 2024 00:00:00 +0000</pubDate>
      <guid>https://blog.rust-lang.org/2024/01/10/Rust-2024-CFT.html</guid>
    </item>
    <item>
      <title>Undated note</title>
      <link>https://blog.rust-lang.org/notes/undated.html</link>
      <guid>https://blog.rust-lang.org/notes/undated.html</guid>
    </item>
  </channel>
</rss>"#;

    // Sample Atom feed
    const SAMPLE_ATOM: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Tech Blog</title>
  <link href="https://example.com/"/>
  <id>https://example.com/feed.atom</id>
  <updated>2024-01-15T12:00:00Z</updated>
  <entry>
    <title>Understanding WebAssembly</title>
    <link href="https://example.com/posts/wasm-intro"/>
    <id>https://example.com/posts/wasm-intro</id>
    <updated>2024-01-15T12:00:00Z</updated>
  </entry>
</feed>"#;

    #[test]
    fn test_rss_items() {
        let items = RssAtomSource::items_from_bytes(SAMPLE_RSS).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Announcing Rust 1.75.0");
        assert_eq!(
            items[0].link.as_deref(),
            Some("https://blog.rust-lang.org/2023/12/28/Rust-1.75.0.html")
        );
        assert_eq!(items[0].published, Some(ts("2023-12-28T00:00:00Z")));
        assert_eq!(items[1].published, Some(ts("2024-01-10T00:00:00Z")));
    }

    #[test]
    fn test_rss_item_without_date() {
        let items = RssAtomSource::items_from_bytes(SAMPLE_RSS).unwrap();

        assert_eq!(items[2].title, "Undated note");
        assert!(items[2].published.is_none());
    }

    #[test]
    fn test_atom_falls_back_to_updated() {
        let items = RssAtomSource::items_from_bytes(SAMPLE_ATOM).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Understanding WebAssembly");
        assert_eq!(items[0].published, Some(ts("2024-01-15T12:00:00Z")));
        assert!(items[0]
            .link
            .as_deref()
            .is_some_and(|l| l.contains("wasm-intro")));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let result = RssAtomSource::items_from_bytes(b"definitely not a feed");
        assert!(matches!(result, Err(FeederError::FeedParse(_))));
    }
}
