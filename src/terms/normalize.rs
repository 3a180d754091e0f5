use once_cell::sync::Lazy;
use regex::Regex;

static VIEW_ONLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\(\s*view\s+only\s*\)").unwrap());
static SUMMER_ORDINAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsummer\s+(i{1,2})\s*$").unwrap());
static LAW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)law").unwrap());
static CPS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)cps").unwrap());
static SEMESTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)semester").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A term label after host-scoped normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLabel {
    pub text: String,
    pub sub_college_name: Option<String>,
}

/// Host-independent cleanup applied before validity checking: drops the
/// "(View Only)" marker and rewrites Roman summer ordinals to digits.
pub fn clean_label(raw: &str) -> String {
    let stripped = VIEW_ONLY_RE.replace_all(raw, "");
    let trimmed = stripped.trim();

    let rewritten = SUMMER_ORDINAL_RE.replace(trimmed, |caps: &regex::Captures| {
        match caps[1].len() {
            2 => "Summer 2",
            _ => "Summer 1",
        }
    });

    rewritten.trim().to_string()
}

/// Disambiguates sub-college naming embedded in term labels on the primary
/// host. Other hosts pass through untouched.
pub fn normalize_label(host: &str, primary_host: &str, raw: &str) -> NormalizedLabel {
    if host != primary_host {
        return NormalizedLabel {
            text: raw.to_string(),
            sub_college_name: None,
        };
    }

    let padded = format!(" {} ", raw.to_lowercase());
    let (text, sub_college_name) = if padded.contains(" law ") {
        (LAW_RE.replace_all(raw, "").into_owned(), Some("LAW".to_string()))
    } else if padded.contains(" cps ") {
        (CPS_RE.replace_all(raw, "").into_owned(), Some("CPS".to_string()))
    } else {
        (SEMESTER_RE.replace_all(raw, "").into_owned(), None)
    };

    NormalizedLabel {
        text: WHITESPACE_RE.replace_all(&text, " ").trim().to_string(),
        sub_college_name,
    }
}
