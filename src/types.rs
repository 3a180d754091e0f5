use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One extracted form control. Multi-option controls carry their options as
/// `alternatives`, each tagged with the owning control's field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<FormField>,
}

/// The extracted representation of an HTML form: its controls in document
/// order plus the resolved submission URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormModel {
    pub fields: Vec<FormField>,
    pub submission_url: String,
}

/// One name/value/text triple of a request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadEntry {
    pub name: String,
    pub value: String,
    pub text: String,
}

/// A complete request payload for one term: the sibling fields of the term
/// selector plus exactly one term selection.
pub type RequestPayload = Vec<PayloadEntry>;

/// A course-subject grouping scoped to one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    pub text: String,
    #[serde(rename = "termId")]
    pub term_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermInfo {
    #[serde(rename = "termId")]
    pub term_id: String,
    pub text: String,
    pub host: String,
    #[serde(rename = "subCollegeName", skip_serializing_if = "Option::is_none")]
    pub sub_college_name: Option<String>,
}

/// Output unit of the discovery pipeline. `deps` is `None` until the subject
/// aggregator has run for this term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: TermInfo,
    pub deps: Option<Vec<SubjectRecord>>,
}

impl TermRecord {
    pub fn new(value: TermInfo) -> Self {
        Self {
            kind: "terms".to_string(),
            value,
            deps: None,
        }
    }
}

/// Turns a raw page body into a form model.
pub trait FormExtractor: Send + Sync {
    fn extract(&self, page_body: &str, page_url: &str) -> Result<FormModel>;
}

/// Fetches a raw page body.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches the subject list for one (submission URL, term id) pair.
#[async_trait::async_trait]
pub trait SubjectFetcher: Send + Sync {
    async fn fetch_subjects(&self, post_url: &str, term_id: &str) -> Result<Vec<SubjectRecord>>;
}
