use anyhow::Context;
use tracing::info;

use crate::aggregator::AggregateResult;
use crate::config::Config;
use crate::paginator::paginate;
use crate::render::{self, page_filename};

const PRUNE_FILENAME: &str = "feeds_to_prune.txt";

pub struct SiteSummary {
    pub pages: usize,
    pub entries: usize,
}

/// Render every page and write the site to the output directory.
///
/// Per-source problems were already absorbed upstream; any failure here
/// (rendering, directory creation, file writes) is fatal.
pub async fn generate(config: &Config, result: &AggregateResult) -> anyhow::Result<SiteSummary> {
    let output_dir = &config.planet.output_dir;
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let pages = paginate(
        &result.entries,
        config.planet.items_per_page,
        config.planet.max_pages,
    );

    for page in &pages {
        let html = render::render_page(page, &config.feeds, &result.entries, &config.planet)?;
        let filename = page_filename(page.number);
        let path = output_dir.join(&filename);
        tokio::fs::write(&path, html)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Generated {}", filename);
    }

    if !result.prune.is_empty() {
        let path = output_dir.join(PRUNE_FILENAME);
        let body = result
            .prune
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Generated list of feeds to prune at {}", path.display());
    }

    Ok(SiteSummary {
        pages: pages.len(),
        entries: result.entries.len(),
    })
}
