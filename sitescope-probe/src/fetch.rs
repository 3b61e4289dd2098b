use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (SitescopeBot/0.1; +https://github.com/trapdoorsec/sitescope)";
const FETCH_TIMEOUT_SECS: u64 = 20;

/// Everything we keep from a successful GET. Headers are stored with
/// lower-cased keys so downstream classification does no case juggling.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub final_url: String,
}

/// Redirect-following GET wrapper. Any network, TLS, timeout, or decode
/// error collapses to `None` - a failed fetch is "unknown", never a
/// pipeline failure.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new() -> Self {
        Self::with_timeout(FETCH_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs / 2))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Option<FetchOutcome> {
        debug!("Fetching {}", url);

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), v.to_string());
            }
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                debug!("Body decode failed for {}: {}", url, e);
                return None;
            }
        };

        Some(FetchOutcome {
            status,
            headers,
            body,
            final_url,
        })
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}
