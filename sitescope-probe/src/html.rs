//! Synchronous HTML extraction helpers. `scraper::Html` is not `Send`,
//! so callers must parse inside a sync call and keep only the extracted
//! strings across await points.

use scraper::{Html, Selector};

/// All anchor href values, as written in the document.
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// Href values of `<link rel="alternate" hreflang=...>` tags. The `rel`
/// comparison is case-insensitive.
pub fn extract_alternate_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("link[hreflang][href]").unwrap();

    document
        .select(&selector)
        .filter(|el| {
            el.value()
                .attr("rel")
                .map(|rel| rel.eq_ignore_ascii_case("alternate"))
                .unwrap_or(false)
        })
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// Trimmed `<title>` text, or `None` when the tag is missing or empty.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").unwrap();

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links() {
        let html = r#"<html><body>
            <a href="https://www.resmed.com/en-us/">US</a>
            <a href="/relative/path">rel</a>
            <a>no href</a>
        </body></html>"#;

        let links = extract_links(html);
        assert_eq!(links.len(), 2);
        assert!(links.contains(&"https://www.resmed.com/en-us/".to_string()));
        assert!(links.contains(&"/relative/path".to_string()));
    }

    #[test]
    fn test_extract_alternate_hrefs_case_insensitive_rel() {
        let html = r#"<html><head>
            <link rel="Alternate" hreflang="de-de" href="https://www.resmed.de/">
            <link rel="alternate" hreflang="fr-fr" href="https://www.resmed.fr/">
            <link rel="stylesheet" href="/style.css">
            <link rel="alternate" type="application/rss+xml" href="/feed.xml">
        </head></html>"#;

        let alts = extract_alternate_hrefs(html);
        assert_eq!(alts.len(), 2);
        assert!(alts.contains(&"https://www.resmed.de/".to_string()));
        assert!(alts.contains(&"https://www.resmed.fr/".to_string()));
    }

    #[test]
    fn test_extract_title_trims_whitespace() {
        let html = "<html><head><title>\n  ResMed Germany \n</title></head></html>";
        assert_eq!(extract_title(html), Some("ResMed Germany".to_string()));
    }

    #[test]
    fn test_extract_title_missing() {
        assert_eq!(extract_title("<html><body>no title</body></html>"), None);
    }

    #[test]
    fn test_extract_title_garbage_input() {
        // html5ever recovers from anything; just must not panic
        let _ = extract_title("<<<%%% not html at all");
    }
}
