use crate::cache::DevCache;
use crate::config::Config;
use crate::error::Result;
use crate::infra::form::PageFormExtractor;
use crate::infra::http::{HttpFetcher, HttpSubjectFetcher};
use crate::terms::aggregate::{AggregateOptions, SubjectAggregator};
use crate::terms::discovery::{DiscoveryOptions, TermDiscovery};
use crate::types::{PageFetcher, TermRecord};
use chrono::Datelike;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const CACHE_NAMESPACE: &str = "terms";

/// End-to-end scrape of one registration page: fetch the page, discover its
/// valid terms, fan out one subject fetch per term, and return the enriched
/// records.
pub struct CatalogScraper {
    fetcher: Arc<dyn PageFetcher>,
    discovery: TermDiscovery,
    aggregator: SubjectAggregator,
    cache: Option<Arc<dyn DevCache>>,
}

impl CatalogScraper {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        discovery: TermDiscovery,
        aggregator: SubjectAggregator,
        cache: Option<Arc<dyn DevCache>>,
    ) -> Self {
        Self {
            fetcher,
            discovery,
            aggregator,
            cache,
        }
    }

    /// Wires up the HTTP collaborators from configuration. The reference year
    /// is fixed to the current calendar year at construction time.
    pub fn from_config(config: &Config, cache: Option<Arc<dyn DevCache>>) -> Self {
        let discovery = TermDiscovery::new(
            Arc::new(PageFormExtractor),
            DiscoveryOptions {
                term_field: config.discovery.term_field.clone(),
                primary_host: config.discovery.primary_host.clone(),
                reference_year: chrono::Utc::now().year(),
            },
        );

        let subject_fetcher = HttpSubjectFetcher::new(
            config.discovery.term_field.clone(),
            config
                .discovery
                .subject_post_fields
                .iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
        );
        let aggregator = SubjectAggregator::new(
            Arc::new(subject_fetcher),
            AggregateOptions {
                fetch_timeout: duration_or_none(config.aggregator.fetch_timeout_seconds),
                deadline: duration_or_none(config.aggregator.deadline_seconds),
                allow_partial: config.aggregator.allow_partial,
            },
        );

        Self::new(Arc::new(HttpFetcher::new()), discovery, aggregator, cache)
    }

    pub async fn scrape_terms(&self, url: &str) -> Result<Vec<TermRecord>> {
        if let Some(cache) = &self.cache {
            if let Some(records) = cache.get(CACHE_NAMESPACE, url) {
                info!(url = %url, count = records.len(), "returning cached term records");
                return Ok(records);
            }
        }

        let page_body = self.fetcher.fetch(url).await?;
        let discovered = self.discovery.discover(&page_body, url)?;
        if discovered.terms.is_empty() {
            return Ok(Vec::new());
        }

        let records = self
            .aggregator
            .attach_subjects(discovered.terms, &discovered.post_url)
            .await?;

        if let Some(cache) = &self.cache {
            if let Err(err) = cache.set(CACHE_NAMESPACE, url, &records) {
                warn!(error = %err, "failed to write dev cache entry");
            }
        }

        Ok(records)
    }
}

fn duration_or_none(seconds: u64) -> Option<Duration> {
    if seconds == 0 {
        None
    } else {
        Some(Duration::from_secs(seconds))
    }
}
