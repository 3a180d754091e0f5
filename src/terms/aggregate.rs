use crate::error::{CatalogError, Result};
use crate::types::{SubjectFetcher, SubjectRecord, TermRecord};
use futures::future::{join_all, try_join_all};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Settings for the per-term subject fan-out.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Timeout applied to each individual subject fetch.
    pub fetch_timeout: Option<Duration>,
    /// Overall deadline for the whole fan-out.
    pub deadline: Option<Duration>,
    /// When set, a failed fetch attaches an empty subject list instead of
    /// failing the aggregate. Default is fail-fast.
    pub allow_partial: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: Some(Duration::from_secs(30)),
            deadline: Some(Duration::from_secs(120)),
            allow_partial: false,
        }
    }
}

/// Fans out one subject fetch per term and attaches each result to its
/// originating term.
pub struct SubjectAggregator {
    fetcher: Arc<dyn SubjectFetcher>,
    options: AggregateOptions,
}

impl SubjectAggregator {
    pub fn new(fetcher: Arc<dyn SubjectFetcher>, options: AggregateOptions) -> Self {
        Self { fetcher, options }
    }

    /// Populates `deps` on every term. All fetches start immediately and run
    /// concurrently; results are routed back by position, so completion order
    /// never affects which term receives which subjects.
    pub async fn attach_subjects(
        &self,
        mut terms: Vec<TermRecord>,
        post_url: &str,
    ) -> Result<Vec<TermRecord>> {
        let fetches = terms
            .iter()
            .map(|term| self.fetch_one(post_url, term.value.term_id.clone()));

        let run = async {
            if self.options.allow_partial {
                let settled = join_all(fetches).await;
                let mut collected = Vec::with_capacity(settled.len());
                for result in settled {
                    match result {
                        Ok(subjects) => collected.push(subjects),
                        Err(err) => {
                            warn!(error = %err, "subject fetch failed, attaching empty list");
                            collected.push(Vec::new());
                        }
                    }
                }
                Ok(collected)
            } else {
                try_join_all(fetches).await
            }
        };

        let results = match self.options.deadline {
            Some(limit) => timeout(limit, run).await.map_err(|_| CatalogError::Deadline {
                seconds: limit.as_secs(),
            })??,
            None => run.await?,
        };

        for (term, subjects) in terms.iter_mut().zip(results) {
            term.deps = Some(subjects);
        }
        info!(count = terms.len(), "attached subject lists to terms");
        Ok(terms)
    }

    async fn fetch_one(&self, post_url: &str, term_id: String) -> Result<Vec<SubjectRecord>> {
        let fetch = self.fetcher.fetch_subjects(post_url, &term_id);
        let result = match self.options.fetch_timeout {
            Some(limit) => match timeout(limit, fetch).await {
                Ok(result) => result,
                Err(_) => return Err(CatalogError::FetchTimeout { term_id }),
            },
            None => fetch.await,
        };

        // Whatever the transport reports, the failure names its term.
        result.map_err(|err| match err {
            CatalogError::Fetch { .. } | CatalogError::FetchTimeout { .. } => err,
            other => CatalogError::Fetch {
                term_id,
                message: other.to_string(),
            },
        })
    }
}
