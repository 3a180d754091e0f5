use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Decides whether a candidate term is current enough to keep.
///
/// Prefers a 4-digit year found in the display label; terms dated before
/// `reference_year` are stale. Labels without a year fall back to the first
/// four characters of the term id, accepted only when they parse as a year
/// close to `reference_year`. The fallback signals an unexpected label format
/// upstream, so it logs.
pub fn is_current_term(term_id: &str, display_text: &str, reference_year: i32) -> bool {
    if let Some(m) = YEAR_RE.find(display_text) {
        return match m.as_str().parse::<i32>() {
            Ok(year) => year >= reference_year,
            Err(_) => false,
        };
    }

    warn!(
        term_id = %term_id,
        text = %display_text,
        "term label has no 4-digit year, falling back to id prefix"
    );

    match term_id.get(..4).and_then(|s| s.parse::<i32>().ok()) {
        Some(id_year) => id_year > reference_year - 3 && id_year < reference_year + 3,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_year_at_or_after_reference_is_current() {
        assert!(is_current_term("202510", "Fall 2025", 2025));
        assert!(is_current_term("203010", "Fall 2030", 2025));
        assert!(is_current_term("202510", "Fall 2025", 2024));
    }

    #[test]
    fn label_year_before_reference_is_stale() {
        assert!(!is_current_term("202410", "Fall 2024", 2025));
        assert!(!is_current_term("199910", "Spring 1999", 2025));
    }

    #[test]
    fn id_prefix_fallback_accepts_nearby_years_only() {
        // No year in the label, so the id prefix decides.
        assert!(is_current_term("202510", "Fall", 2025));
        assert!(is_current_term("202310", "Fall", 2025));
        assert!(is_current_term("202710", "Fall", 2025));
        assert!(!is_current_term("202210", "Fall", 2025));
        assert!(!is_current_term("202810", "Fall", 2025));
    }

    #[test]
    fn unparseable_id_prefix_is_rejected() {
        assert!(!is_current_term("term", "Fall", 2025));
        assert!(!is_current_term("ab", "Fall", 2025));
        assert!(!is_current_term("", "Fall", 2025));
    }

    #[test]
    fn label_year_wins_over_id_prefix() {
        // Stale label year rejects even when the id prefix is in range.
        assert!(!is_current_term("202510", "Fall 2020", 2025));
    }
}
