use crate::error::{CatalogError, Result};
use crate::terms::normalize::clean_label;
use crate::terms::validity::is_current_term;
use crate::types::{FormModel, PayloadEntry, RequestPayload};
use tracing::{debug, warn};

/// The payloads built for one form: the submission URL plus one payload per
/// surviving term alternative, in form order.
#[derive(Debug, Clone)]
pub struct TermPayloads {
    pub post_url: String,
    pub payloads: Vec<RequestPayload>,
}

/// Builds one complete request payload per valid term.
///
/// The form's fields are split into the term selector (matched by name) and
/// its siblings; every surviving alternative of the selector yields one
/// payload that combines the unchanged siblings with that single term
/// selection.
pub fn build_term_payloads(
    form: &FormModel,
    term_field_name: &str,
    reference_year: i32,
) -> Result<TermPayloads> {
    let mut matches = form
        .fields
        .iter()
        .filter(|f| f.name == term_field_name);

    let term_field = matches.next().ok_or_else(|| CatalogError::FieldNotFound {
        field: term_field_name.to_string(),
        url: form.submission_url.clone(),
    })?;
    if matches.next().is_some() {
        // Tolerant but noisy: the first match wins.
        warn!(
            field = %term_field_name,
            url = %form.submission_url,
            "form has more than one term selector field"
        );
    }

    let siblings: Vec<PayloadEntry> = form
        .fields
        .iter()
        .filter(|f| f.name != term_field_name)
        .map(|f| PayloadEntry {
            name: f.name.clone(),
            value: f.value.clone(),
            text: f.text.clone(),
        })
        .collect();

    let mut payloads = Vec::new();
    for alt in &term_field.alternatives {
        if alt.name != term_field.name {
            debug!(expected = %term_field.name, got = %alt.name, "skipping stray alternative");
            continue;
        }

        let trimmed = alt.text.trim();
        if trimmed.eq_ignore_ascii_case("none") {
            continue;
        }

        let cleaned = clean_label(trimmed);
        if cleaned.len() < 2 {
            warn!(term_id = %alt.value, text = %alt.text, "term label too short after cleanup");
            continue;
        }

        if !is_current_term(&alt.value, &cleaned, reference_year) {
            continue;
        }

        let mut payload = siblings.clone();
        payload.push(PayloadEntry {
            name: alt.name.clone(),
            value: alt.value.clone(),
            text: cleaned,
        });
        payloads.push(payload);
    }

    Ok(TermPayloads {
        post_url: form.submission_url.clone(),
        payloads,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FormField;

    fn option(name: &str, value: &str, text: &str) -> FormField {
        FormField {
            name: name.to_string(),
            value: value.to_string(),
            text: text.to_string(),
            alternatives: Vec::new(),
        }
    }

    fn term_form(alternatives: Vec<FormField>) -> FormModel {
        FormModel {
            fields: vec![
                option("p_calling_proc", "bwckschd.p_disp_dyn_sched", ""),
                FormField {
                    name: "p_term".to_string(),
                    value: String::new(),
                    text: String::new(),
                    alternatives,
                },
            ],
            submission_url: "https://banner.neu.edu/prod/bwckgens.p_proc_term_date".to_string(),
        }
    }

    #[test]
    fn one_payload_per_surviving_alternative() {
        let form = term_form(vec![
            option("p_term", "", "None"),
            option("p_term", "201010", "Fall 2010"),
            option("p_term", "202610", "Fall 2026"),
        ]);

        let built = build_term_payloads(&form, "p_term", 2025).unwrap();
        assert_eq!(built.payloads.len(), 1);

        let payload = &built.payloads[0];
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0].name, "p_calling_proc");
        assert_eq!(payload[1].name, "p_term");
        assert_eq!(payload[1].value, "202610");
        assert_eq!(payload[1].text, "Fall 2026");
    }

    #[test]
    fn missing_term_field_is_an_error() {
        let form = term_form(vec![]);
        let err = build_term_payloads(&form, "term_in", 2025).unwrap_err();
        assert!(matches!(err, CatalogError::FieldNotFound { .. }));
        assert!(err.to_string().contains("term_in"));
    }

    #[test]
    fn stray_and_short_alternatives_are_skipped() {
        let form = term_form(vec![
            option("p_other", "202610", "Fall 2026"),
            option("p_term", "202610", " x "),
            option("p_term", "202630", "Summer 2026 (View Only)"),
        ]);

        let built = build_term_payloads(&form, "p_term", 2025).unwrap();
        assert_eq!(built.payloads.len(), 1);
        assert_eq!(built.payloads[0].last().unwrap().text, "Summer 2026");
    }

    #[test]
    fn payload_order_follows_form_order() {
        let form = term_form(vec![
            option("p_term", "202610", "Fall 2026"),
            option("p_term", "202630", "Summer 2026"),
            option("p_term", "202710", "Fall 2027"),
        ]);

        let built = build_term_payloads(&form, "p_term", 2025).unwrap();
        let ids: Vec<&str> = built
            .payloads
            .iter()
            .map(|p| p.last().unwrap().value.as_str())
            .collect();
        assert_eq!(ids, vec!["202610", "202630", "202710"]);
    }
}
