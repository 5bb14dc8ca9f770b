use std::collections::{HashMap, HashSet};

use askama::Template;

use crate::config::{FeedConfig, PlanetConfig};
use crate::paginator::Page;
use crate::parser::Entry;

/// How many page links to show on each side of the active page.
const PAGE_WINDOW: usize = 2;
/// How many contributors the sidebar ranking lists.
const TOP_AUTHOR_COUNT: usize = 5;

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub planet_name: String,
    pub encoding: String,
    pub output_dir: String,
    pub page: usize,
    pub total_pages: usize,
    pub entries: Vec<EntryView>,
    pub feeds: Vec<FeedConfig>,
    pub pagination: Pagination,
    pub top_authors: Vec<TopAuthor>,
    pub stats: Stats,
}

/// One entry as shown on a page, placeholders resolved and the
/// timestamp formatted.
pub struct EntryView {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub date: String,
    pub feed_name: String,
    pub feed_url: String,
}

pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub active: bool,
}

pub struct Pagination {
    pub prev: Option<String>,
    pub next: Option<String>,
    pub pages: Vec<PageLink>,
}

pub struct TopAuthor {
    pub name: String,
    pub url: String,
    pub count: usize,
}

pub struct Stats {
    pub total_entries: usize,
    pub unique_feeds: usize,
}

/// Output filename for a page. Page 1 is the site's landing page.
pub fn page_filename(page: usize) -> String {
    format!("index{page}.html")
}

/// Render one page to HTML.
///
/// `all_entries` is the full merged set; the contributor ranking and
/// stats are global, not per-page.
pub fn render_page(
    page: &Page<'_>,
    feeds: &[FeedConfig],
    all_entries: &[Entry],
    planet: &PlanetConfig,
) -> anyhow::Result<String> {
    let template = PageTemplate {
        planet_name: planet.name.clone(),
        encoding: planet.encoding.clone(),
        output_dir: planet
            .output_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        page: page.number,
        total_pages: page.total_pages,
        entries: page
            .entries
            .iter()
            .map(|e| entry_view(e, &planet.date_format))
            .collect(),
        feeds: feeds.to_vec(),
        pagination: pagination(page.number, page.total_pages),
        top_authors: top_authors(all_entries),
        stats: stats(all_entries),
    };
    Ok(template.render()?)
}

fn entry_view(entry: &Entry, date_format: &str) -> EntryView {
    EntryView {
        title: entry
            .title
            .clone()
            .unwrap_or_else(|| "Untitled".to_string()),
        link: entry.link.clone(),
        summary: entry.summary.clone(),
        date: entry
            .published
            .map(|dt| dt.format(date_format).to_string())
            .unwrap_or_else(|| "Unknown date".to_string()),
        feed_name: entry.feed_name.clone(),
        feed_url: entry.feed_url.clone(),
    }
}

/// Pagination controls: previous/next plus a window of page numbers
/// from `max(1, p-2)` to `min(total, p+2)`.
pub fn pagination(page: usize, total_pages: usize) -> Pagination {
    let prev = (page > 1).then(|| page_filename(page - 1));
    let next = (page < total_pages).then(|| page_filename(page + 1));

    let first = page.saturating_sub(PAGE_WINDOW).max(1);
    let last = (page + PAGE_WINDOW).min(total_pages);
    let pages = (first..=last)
        .map(|number| PageLink {
            number,
            href: page_filename(number),
            active: number == page,
        })
        .collect();

    Pagination { prev, next, pages }
}

/// Rank sources by entry count over the global set, top 5.
///
/// Ties keep first-encountered order; each source is paired with the
/// URL of its first entry.
pub fn top_authors(entries: &[Entry]) -> Vec<TopAuthor> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut authors: Vec<TopAuthor> = Vec::new();

    for entry in entries {
        match index.get(entry.feed_name.as_str()) {
            Some(&i) => authors[i].count += 1,
            None => {
                index.insert(&entry.feed_name, authors.len());
                authors.push(TopAuthor {
                    name: entry.feed_name.clone(),
                    url: entry.feed_url.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-encounter order within equal counts
    authors.sort_by(|a, b| b.count.cmp(&a.count));
    authors.truncate(TOP_AUTHOR_COUNT);
    authors
}

pub fn stats(entries: &[Entry]) -> Stats {
    let unique_feeds = entries
        .iter()
        .map(|e| e.feed_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    Stats {
        total_entries: entries.len(),
        unique_feeds,
    }
}
