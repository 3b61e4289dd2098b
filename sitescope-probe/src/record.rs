use serde::{Deserialize, Serialize};

/// One entry in the site inventory. Built once per enrichment pass; the
/// only later mutation is the host/url rewrite during redirect collapsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub host: String,
    pub url: String,
    pub status: Option<u16>,
    pub title: Option<String>,
    pub hosting_provider: Option<String>,
    pub ip: Option<String>,
    pub cname_chain: Vec<String>,
    pub final_url: Option<String>,
}

impl SiteRecord {
    /// New record with every enrichment field absent. `host` is derived
    /// from the URL by stripping scheme and path.
    pub fn new(url: String) -> Self {
        let host = host_of(&url);
        Self {
            host,
            url,
            status: None,
            title: None,
            hosting_provider: None,
            ip: None,
            cname_chain: Vec::new(),
            final_url: None,
        }
    }
}

/// Lower-cased hostname of a URL: scheme stripped, everything from the
/// first `/` on dropped.
pub fn host_of(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_lowercase()
}
