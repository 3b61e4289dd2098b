//! The four independent candidate producers: seed-page scraping, hreflang
//! expansion, certificate-transparency lookup, and TLD/subdomain
//! generation. Each strategy creates its own HTTP client scoped to the
//! phase and tolerates every failure by contributing nothing.

use crate::classify::{is_org_url, normalize_root, registrable_base, ORG_DOMAIN};
use crate::wordlists::{SUBDOMAINS, TLDS};
use serde::Deserialize;
use sitescope_probe::record::host_of;
use sitescope_probe::{html, HttpProbe};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info, warn};

const CRT_SH_URL: &str = "https://crt.sh/?q=%.resmed.com&output=json";
const CT_TIMEOUT_SECS: u64 = 30;

/// Fetch each seed page and collect the roots of every organization link
/// found on it. A seed that fails to fetch contributes nothing.
pub async fn scrape_seed_pages(seeds: &[&str]) -> HashSet<String> {
    let probe = HttpProbe::new();
    let mut roots = HashSet::new();

    for seed in seeds {
        let outcome = match probe.fetch(seed).await {
            Some(o) => o,
            None => {
                debug!("Seed page unreachable, skipping: {}", seed);
                continue;
            }
        };

        for link in html::extract_links(&outcome.body) {
            if is_org_url(&link) {
                roots.insert(normalize_root(&link));
            }
        }
    }

    info!("Seed scraping found {} roots", roots.len());
    roots
}

/// Fetch every known root under the concurrency bound and collect
/// organization URLs from its `<link rel="alternate" hreflang>` tags.
/// Returns only the newly observed roots; callers union as they see fit.
pub async fn expand_hreflang(roots: &HashSet<String>, limit: usize) -> HashSet<String> {
    let probe = Arc::new(HttpProbe::new());
    let semaphore = Arc::new(Semaphore::new(limit));
    let found: Arc<Mutex<HashSet<String>>> = Arc::new(Mutex::new(HashSet::new()));

    let mut tasks = Vec::new();
    for root in roots {
        let root = root.clone();
        let probe = probe.clone();
        let semaphore = semaphore.clone();
        let found = found.clone();

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await.expect("semaphore closed");

            let outcome = match probe.fetch(&root).await {
                Some(o) => o,
                None => return,
            };

            let alternates = html::extract_alternate_hrefs(&outcome.body);
            let mut found = found.lock().await;
            for alt in alternates {
                if is_org_url(&alt) {
                    found.insert(normalize_root(&alt));
                }
            }
        }));
    }

    for task in tasks {
        if let Err(e) = task.await {
            warn!("Hreflang worker failed: {}", e);
        }
    }

    let found = Arc::try_unwrap(found)
        .expect("hreflang workers finished")
        .into_inner();
    info!("Hreflang expansion found {} roots", found.len());
    found
}

#[derive(Debug, Deserialize)]
struct CtLogEntry {
    #[serde(default)]
    name_value: String,
}

/// One query against the public certificate-transparency search API.
/// Any failure (network, non-200, malformed JSON) yields an empty set.
pub async fn query_ct_logs() -> HashSet<String> {
    query_ct_endpoint(CRT_SH_URL).await
}

pub async fn query_ct_endpoint(endpoint: &str) -> HashSet<String> {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(CT_TIMEOUT_SECS))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            warn!("Certificate transparency client build failed: {}", e);
            return HashSet::new();
        }
    };

    let response = match client.get(endpoint).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("Certificate transparency query failed: {}", e);
            return HashSet::new();
        }
    };

    if response.status().as_u16() != 200 {
        warn!(
            "Certificate transparency query returned status {}",
            response.status()
        );
        return HashSet::new();
    }

    let entries: Vec<CtLogEntry> = match response.json().await {
        Ok(e) => e,
        Err(e) => {
            warn!("Certificate transparency response malformed: {}", e);
            return HashSet::new();
        }
    };

    let mut domains = HashSet::new();
    let needle = format!("{}.", ORG_DOMAIN);
    for entry in entries {
        for line in entry.name_value.split('\n') {
            let line = line.trim().to_lowercase();
            if line.contains(&needle) && !line.starts_with('*') {
                let domain = line.replace("*.", "");
                if !domain.is_empty() && !domain.starts_with('.') {
                    domains.insert(format!("https://{}", domain));
                }
            }
        }
    }

    info!("Certificate transparency found {} domains", domains.len());
    domains
}

/// Deterministic `https://{org}.{tld}` and `https://www.{org}.{tld}`
/// candidates over the compiled-in TLD list. Mostly non-existent by
/// construction; must pass the liveness filter before use.
pub fn enumerate_tlds() -> HashSet<String> {
    let mut candidates = HashSet::new();
    for tld in TLDS {
        candidates.insert(format!("https://{}.{}", ORG_DOMAIN, tld));
        candidates.insert(format!("https://www.{}.{}", ORG_DOMAIN, tld));
    }
    candidates
}

/// Cross the subdomain wordlist with every distinct registrable base
/// among the discovered URLs. Also liveness-gated.
pub fn enumerate_subdomains(discovered: &HashSet<String>) -> HashSet<String> {
    let mut bases = HashSet::new();
    for url in discovered {
        if let Some(base) = registrable_base(&host_of(url)) {
            bases.insert(base);
        }
    }

    let mut candidates = HashSet::new();
    for base in &bases {
        for sub in SUBDOMAINS {
            candidates.insert(format!("https://{}.{}", sub, base));
        }
    }

    debug!(
        "Generated {} subdomain candidates over {} bases",
        candidates.len(),
        bases.len()
    );
    candidates
}
