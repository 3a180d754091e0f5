use crate::error::{CatalogError, Result};
use crate::types::{FormExtractor, FormField, FormModel};
use reqwest::Url;
use scraper::{Html, Selector};
use tracing::debug;

/// Extracts the first `<form>` of a page into a generic form model: inputs
/// become plain fields, selects carry their options as alternatives tagged
/// with the select's field name.
pub struct PageFormExtractor;

impl FormExtractor for PageFormExtractor {
    fn extract(&self, page_body: &str, page_url: &str) -> Result<FormModel> {
        let document = Html::parse_document(page_body);
        let form_selector = Selector::parse("form").unwrap();
        let control_selector = Selector::parse("input, select").unwrap();
        let option_selector = Selector::parse("option").unwrap();

        let mut forms = document.select(&form_selector);
        let form = forms.next().ok_or_else(|| CatalogError::Parse {
            url: page_url.to_string(),
            message: "no form element found".to_string(),
        })?;
        if forms.next().is_some() {
            debug!(url = %page_url, "page has multiple forms, using the first");
        }

        let submission_url = match form.value().attr("action") {
            Some(action) => Url::parse(page_url)
                .and_then(|base| base.join(action))
                .map(|u| u.to_string())
                .map_err(|e| CatalogError::Parse {
                    url: page_url.to_string(),
                    message: format!("cannot resolve form action '{action}': {e}"),
                })?,
            None => page_url.to_string(),
        };

        let mut fields = Vec::new();
        for control in form.select(&control_selector) {
            let Some(name) = control.value().attr("name") else {
                continue;
            };

            match control.value().name() {
                "select" => {
                    let alternatives = control
                        .select(&option_selector)
                        .map(|option| {
                            let text = option.text().collect::<String>().trim().to_string();
                            FormField {
                                name: name.to_string(),
                                value: option.value().attr("value").unwrap_or(&text).to_string(),
                                text,
                                alternatives: Vec::new(),
                            }
                        })
                        .collect();
                    fields.push(FormField {
                        name: name.to_string(),
                        value: String::new(),
                        text: String::new(),
                        alternatives,
                    });
                }
                _ => {
                    fields.push(FormField {
                        name: name.to_string(),
                        value: control.value().attr("value").unwrap_or_default().to_string(),
                        text: String::new(),
                        alternatives: Vec::new(),
                    });
                }
            }
        }

        Ok(FormModel {
            fields,
            submission_url,
        })
    }
}
