use crate::error::{CatalogError, Result};
use crate::types::{PageFetcher, SubjectFetcher, SubjectRecord};
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Plain GET fetcher on a shared reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "fetching page");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Fetches the subject list for one term by posting the term selection to the
/// registration form's submission URL and reading the subject select options
/// off the response.
pub struct HttpSubjectFetcher {
    client: reqwest::Client,
    /// Field name the term id is posted under.
    term_field: String,
    /// Fixed fields posted alongside the term id.
    extra_fields: Vec<(String, String)>,
}

impl HttpSubjectFetcher {
    pub fn new(term_field: impl Into<String>, extra_fields: Vec<(String, String)>) -> Self {
        Self {
            client: reqwest::Client::new(),
            term_field: term_field.into(),
            extra_fields,
        }
    }

    fn parse_subjects(body: &str, term_id: &str) -> Vec<SubjectRecord> {
        let document = Html::parse_document(body);
        let subject_selector = Selector::parse("select#subj_id option").unwrap();
        let fallback_selector = Selector::parse("select option").unwrap();

        let mut options: Vec<_> = document.select(&subject_selector).collect();
        if options.is_empty() {
            options = document.select(&fallback_selector).collect();
        }

        options
            .into_iter()
            .filter_map(|option| {
                let value = option.value().attr("value")?.trim();
                let text = option.text().collect::<String>().trim().to_string();
                // "%" is the catch-all entry on subject selects
                if value.is_empty() || value == "%" {
                    return None;
                }
                Some(SubjectRecord {
                    subject_id: value.to_string(),
                    text,
                    term_id: term_id.to_string(),
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SubjectFetcher for HttpSubjectFetcher {
    async fn fetch_subjects(&self, post_url: &str, term_id: &str) -> Result<Vec<SubjectRecord>> {
        let mut body: Vec<(&str, &str)> = self
            .extra_fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        body.push((self.term_field.as_str(), term_id));

        let response = self
            .client
            .post(post_url)
            .form(&body)
            .send()
            .await
            .map_err(|e| CatalogError::Fetch {
                term_id: term_id.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::Fetch {
                term_id: term_id.to_string(),
                message: format!("subject request returned status {}", response.status()),
            });
        }

        let text = response.text().await.map_err(|e| CatalogError::Fetch {
            term_id: term_id.to_string(),
            message: e.to_string(),
        })?;

        let subjects = Self::parse_subjects(&text, term_id);
        if subjects.is_empty() {
            warn!(term_id = %term_id, url = %post_url, "no subject options found in response");
        }
        Ok(subjects)
    }
}
