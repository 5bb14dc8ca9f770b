use chrono::{DateTime, Utc};
use feed_rs::parser;
use tracing::warn;

/// A normalized feed entry.
///
/// Missing fields stay explicit options here; placeholders are only
/// substituted at render time.
#[derive(Debug, Clone)]
pub struct Entry {
    pub title: Option<String>,
    pub link: String,
    pub summary: String,
    pub published: Option<DateTime<Utc>>,
    pub feed_name: String,
    pub feed_url: String,
}

/// Normalize raw feed content into entries.
///
/// Structural parsing (RSS/Atom envelope, item extraction) is delegated
/// to feed-rs. Timestamps prefer the published time, falling back to the
/// updated time. Entries without any link cannot be rendered and are
/// skipped; the rest of the feed is kept.
pub fn parse_entries(content: &[u8], feed_name: &str, feed_url: &str) -> anyhow::Result<Vec<Entry>> {
    let feed = parser::parse(content)?;

    let mut entries = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        let Some(link) = entry.links.first().map(|l| l.href.clone()) else {
            warn!(
                feed = feed_name,
                id = %entry.id,
                "Skipping entry with no link"
            );
            continue;
        };

        let title = entry.title.map(|t| t.content);
        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();
        let published: Option<DateTime<Utc>> = entry.published.or(entry.updated);

        entries.push(Entry {
            title,
            link,
            summary,
            published,
            feed_name: feed_name.to_string(),
            feed_url: feed_url.to_string(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RSS_TWO_ITEMS: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Example Blog</title>
    <item>
      <guid>post-1</guid>
      <title>First Post</title>
      <link>https://example.com/post-1</link>
      <description>Summary of the first post</description>
      <pubDate>Mon, 03 Mar 2025 12:00:00 GMT</pubDate>
    </item>
    <item>
      <guid>post-2</guid>
      <title>Second Post</title>
      <link>https://example.com/post-2</link>
      <description>Summary of the second post</description>
      <pubDate>Tue, 04 Mar 2025 08:30:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_rss_entries() {
        let entries = parse_entries(RSS_TWO_ITEMS.as_bytes(), "Example", "https://example.com/rss")
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("First Post"));
        assert_eq!(entries[0].link, "https://example.com/post-1");
        assert_eq!(entries[0].summary, "Summary of the first post");
        assert_eq!(entries[0].feed_name, "Example");
        assert_eq!(entries[0].feed_url, "https://example.com/rss");
        assert_eq!(
            entries[0].published,
            Some(Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_atom_published_preferred_over_updated() {
        let atom = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Atom</title>
  <id>urn:example</id>
  <updated>2025-03-05T00:00:00Z</updated>
  <entry>
    <id>urn:entry-1</id>
    <title>Entry</title>
    <link href="https://example.com/entry-1"/>
    <published>2025-03-01T10:00:00Z</published>
    <updated>2025-03-05T00:00:00Z</updated>
  </entry>
</feed>"#;

        let entries = parse_entries(atom.as_bytes(), "Atom", "https://example.com/atom").unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].published,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_updated_used_when_published_missing() {
        let atom = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Atom</title>
  <id>urn:example</id>
  <updated>2025-03-05T00:00:00Z</updated>
  <entry>
    <id>urn:entry-1</id>
    <title>Entry</title>
    <link href="https://example.com/entry-1"/>
    <updated>2025-03-05T00:00:00Z</updated>
  </entry>
</feed>"#;

        let entries = parse_entries(atom.as_bytes(), "Atom", "https://example.com/atom").unwrap();

        assert_eq!(
            entries[0].published,
            Some(Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_date_stays_none() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title>
  <item>
    <guid>1</guid>
    <title>Undated</title>
    <link>https://example.com/undated</link>
  </item>
</channel></rss>"#;

        let entries = parse_entries(rss.as_bytes(), "Feed", "https://example.com/rss").unwrap();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].published.is_none());
    }

    #[test]
    fn test_missing_title_stays_none() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title>
  <item>
    <guid>1</guid>
    <link>https://example.com/untitled</link>
  </item>
</channel></rss>"#;

        let entries = parse_entries(rss.as_bytes(), "Feed", "https://example.com/rss").unwrap();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].title.is_none());
        assert_eq!(entries[0].summary, "");
    }

    #[test]
    fn test_entry_without_link_skipped() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>t</title>
  <item>
    <guid>no-link</guid>
    <title>Orphan</title>
  </item>
  <item>
    <guid>ok</guid>
    <title>Kept</title>
    <link>https://example.com/kept</link>
  </item>
</channel></rss>"#;

        let entries = parse_entries(rss.as_bytes(), "Feed", "https://example.com/rss").unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].link, "https://example.com/kept");
    }

    #[test]
    fn test_empty_feed_yields_no_entries() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>empty</title></channel></rss>"#;

        let entries = parse_entries(rss.as_bytes(), "Feed", "https://example.com/rss").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_invalid_document_is_error() {
        let result = parse_entries(b"<not a feed", "Feed", "https://example.com/rss");
        assert!(result.is_err());
    }
}
