use reqwest::Url;

/// Classifies a page URL by its registrable domain, e.g.
/// `https://banner.neu.edu/prod/...` -> `neu.edu`. Used only to tag output
/// records; unparseable input falls back to the raw string.
pub fn classify(url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_string(),
            None => return url.to_string(),
        },
        Err(_) => return url.to_string(),
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_to_registrable_domain() {
        assert_eq!(classify("https://banner.neu.edu/prod/bwckschd.p_disp_dyn_sched"), "neu.edu");
        assert_eq!(classify("https://www.example.edu/page"), "example.edu");
        assert_eq!(classify("https://example.edu/page"), "example.edu");
    }

    #[test]
    fn unparseable_input_passes_through() {
        assert_eq!(classify("not a url"), "not a url");
    }
}
