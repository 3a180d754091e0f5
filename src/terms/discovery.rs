use crate::error::Result;
use crate::hosts;
use crate::terms::normalize::normalize_label;
use crate::terms::payload::{build_term_payloads, TermPayloads};
use crate::types::{FormExtractor, TermInfo, TermRecord};
use std::sync::Arc;
use tracing::{info, warn};

/// Settings for one discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Field name of the term selector in the registration form.
    pub term_field: String,
    /// Primary domain of the institution; sub-college label rules apply only
    /// to this host.
    pub primary_host: String,
    /// Current calendar year, supplied by the caller so runs are
    /// reproducible in tests.
    pub reference_year: i32,
}

/// Discovered terms together with the URL their follow-up requests post to.
#[derive(Debug, Clone)]
pub struct DiscoveredTerms {
    pub post_url: String,
    pub terms: Vec<TermRecord>,
}

/// Turns an extracted registration form into a filtered, normalized term list.
pub struct TermDiscovery {
    extractor: Arc<dyn FormExtractor>,
    options: DiscoveryOptions,
}

impl TermDiscovery {
    pub fn new(extractor: Arc<dyn FormExtractor>, options: DiscoveryOptions) -> Self {
        Self { extractor, options }
    }

    /// Extracts the registration form from `page_body` and produces one
    /// `TermRecord` per valid term, in form order. An empty result is not an
    /// error; it is logged and returned as-is.
    pub fn discover(&self, page_body: &str, page_url: &str) -> Result<DiscoveredTerms> {
        let form = self.extractor.extract(page_body, page_url)?;
        let TermPayloads { post_url, payloads } =
            build_term_payloads(&form, &self.options.term_field, self.options.reference_year)?;

        let host = hosts::classify(page_url);

        let terms: Vec<TermRecord> = payloads
            .iter()
            .filter_map(|payload| {
                payload.iter().find(|e| e.name == self.options.term_field)
            })
            .map(|entry| {
                let label = normalize_label(&host, &self.options.primary_host, &entry.text);
                TermRecord::new(TermInfo {
                    term_id: entry.value.clone(),
                    text: label.text,
                    host: host.clone(),
                    sub_college_name: label.sub_college_name,
                })
            })
            .collect();

        if terms.is_empty() {
            warn!(url = %page_url, "no valid terms found on registration page");
        } else {
            info!(url = %page_url, count = terms.len(), "discovered terms");
        }

        Ok(DiscoveredTerms { post_url, terms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::types::{FormField, FormModel};

    struct FixedForm(FormModel);

    impl FormExtractor for FixedForm {
        fn extract(&self, _body: &str, _url: &str) -> Result<FormModel> {
            Ok(self.0.clone())
        }
    }

    fn term_option(value: &str, text: &str) -> FormField {
        FormField {
            name: "p_term".to_string(),
            value: value.to_string(),
            text: text.to_string(),
            alternatives: Vec::new(),
        }
    }

    fn discovery(form: FormModel) -> TermDiscovery {
        TermDiscovery::new(
            Arc::new(FixedForm(form)),
            DiscoveryOptions {
                term_field: "p_term".to_string(),
                primary_host: "neu.edu".to_string(),
                reference_year: 2025,
            },
        )
    }

    fn form_with(alternatives: Vec<FormField>) -> FormModel {
        FormModel {
            fields: vec![FormField {
                name: "p_term".to_string(),
                value: String::new(),
                text: String::new(),
                alternatives,
            }],
            submission_url: "https://banner.neu.edu/prod/bwckgens.p_proc_term_date".to_string(),
        }
    }

    #[test]
    fn discovers_normalized_terms_in_form_order() {
        let d = discovery(form_with(vec![
            term_option("202610", "Fall Semester 2026"),
            term_option("202615", "CPS Fall 2026"),
            term_option("202612", "Law Fall 2026"),
        ]));

        let out = d
            .discover("<html/>", "https://banner.neu.edu/prod/bwckschd.p_disp_dyn_sched")
            .unwrap();

        assert_eq!(out.post_url, "https://banner.neu.edu/prod/bwckgens.p_proc_term_date");
        assert_eq!(out.terms.len(), 3);

        let first = &out.terms[0];
        assert_eq!(first.kind, "terms");
        assert_eq!(first.value.term_id, "202610");
        assert_eq!(first.value.text, "Fall 2026");
        assert_eq!(first.value.host, "neu.edu");
        assert_eq!(first.value.sub_college_name, None);
        assert_eq!(first.deps, None);

        assert_eq!(out.terms[1].value.sub_college_name.as_deref(), Some("CPS"));
        assert_eq!(out.terms[1].value.text, "Fall 2026");
        assert_eq!(out.terms[2].value.sub_college_name.as_deref(), Some("LAW"));
    }

    #[test]
    fn all_invalid_terms_yield_an_empty_list() {
        let d = discovery(form_with(vec![
            term_option("", "None"),
            term_option("201010", "Fall 2010"),
        ]));

        let out = d
            .discover("<html/>", "https://banner.neu.edu/prod/bwckschd.p_disp_dyn_sched")
            .unwrap();
        assert!(out.terms.is_empty());
    }

    #[test]
    fn missing_term_selector_surfaces_field_not_found() {
        let d = discovery(FormModel {
            fields: Vec::new(),
            submission_url: "https://example.edu/post".to_string(),
        });

        let err = d.discover("<html/>", "https://example.edu/page").unwrap_err();
        assert!(matches!(err, CatalogError::FieldNotFound { .. }));
    }

    #[test]
    fn duplicate_term_ids_are_preserved() {
        // The source form repeats an id; one record per surviving alternative.
        let d = discovery(form_with(vec![
            term_option("202610", "Fall 2026"),
            term_option("202610", "Fall 2026 (View Only)"),
        ]));

        let out = d
            .discover("<html/>", "https://banner.neu.edu/prod/bwckschd.p_disp_dyn_sched")
            .unwrap();
        assert_eq!(out.terms.len(), 2);
        assert_eq!(out.terms[0].value.term_id, out.terms[1].value.term_id);
    }
}
