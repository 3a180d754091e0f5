use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not parse page at {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Form field '{field}' not found in form at {url}")]
    FieldNotFound { field: String, url: String },

    #[error("Subject fetch failed for term {term_id}: {message}")]
    Fetch { term_id: String, message: String },

    #[error("Subject fetch timed out for term {term_id}")]
    FetchTimeout { term_id: String },

    #[error("Subject aggregation exceeded its deadline after {seconds}s")]
    Deadline { seconds: u64 },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
