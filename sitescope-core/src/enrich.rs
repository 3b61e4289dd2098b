//! Per-host metadata enrichment: one fetch, one CNAME walk, one forward
//! lookup, one hosting guess, one `SiteRecord` out. A dead host still
//! produces a record (host/url only); no failure here is fatal.

use crate::classify::guess_hosting;
use sitescope_probe::fetch::FetchOutcome;
use sitescope_probe::{html, DnsProbe, HttpProbe, SiteRecord};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{info, warn};

/// Fold a fetch outcome, CNAME chain and IP into a record. Pure except
/// for the HTML title parse; `title` stays absent unless the response
/// declared an HTML content type and the document actually had a title.
pub fn assemble_record(
    url: &str,
    outcome: Option<&FetchOutcome>,
    cname_chain: Vec<String>,
    ip: Option<String>,
) -> SiteRecord {
    let mut record = SiteRecord::new(url.to_string());

    if let Some(outcome) = outcome {
        record.status = Some(outcome.status);
        record.final_url = Some(outcome.final_url.clone());

        let is_html = outcome
            .headers
            .get("content-type")
            .map(|ct| ct.to_lowercase().contains("text/html"))
            .unwrap_or(false);
        if is_html {
            record.title = html::extract_title(&outcome.body);
        }

        record.hosting_provider = guess_hosting(&outcome.headers, &cname_chain);
    } else {
        record.hosting_provider = guess_hosting(&Default::default(), &cname_chain);
    }

    record.cname_chain = cname_chain;
    record.ip = ip;
    record
}

/// Enrich every candidate URL under the global concurrency bound.
/// Candidates are sorted before dispatch and the result list is sorted
/// again by URL so the dedup stage always sees the same order, whatever
/// order the workers finished in.
pub async fn enrich_all(candidates: Vec<String>, limit: usize) -> Vec<SiteRecord> {
    let mut candidates = candidates;
    candidates.sort();

    let probe = Arc::new(HttpProbe::new());
    let dns = Arc::new(DnsProbe::new());
    let semaphore = Arc::new(Semaphore::new(limit));
    let records: Arc<Mutex<Vec<SiteRecord>>> = Arc::new(Mutex::new(Vec::new()));

    info!("Enriching {} candidates", candidates.len());

    let mut tasks = Vec::new();
    for url in candidates {
        let probe = probe.clone();
        let dns = dns.clone();
        let semaphore = semaphore.clone();
        let records = records.clone();

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await.expect("semaphore closed");

            let outcome = probe.fetch(&url).await;

            let host = sitescope_probe::record::host_of(&url);
            let cname_chain = dns.resolve_cname_chain(&host).await;
            let ip = dns.resolve_ip(&host).await;

            let record = assemble_record(&url, outcome.as_ref(), cname_chain, ip);
            records.lock().await.push(record);
        }));
    }

    for task in tasks {
        if let Err(e) = task.await {
            warn!("Enrichment worker failed: {}", e);
        }
    }

    let mut records = Arc::try_unwrap(records)
        .expect("enrichment workers finished")
        .into_inner();
    records.sort_by(|a, b| a.url.cmp(&b.url));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn outcome(status: u16, headers: &[(&str, &str)], body: &str, final_url: &str) -> FetchOutcome {
        FetchOutcome {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            body: body.to_string(),
            final_url: final_url.to_string(),
        }
    }

    #[test]
    fn test_assemble_record_failed_fetch_keeps_host_and_url() {
        let record = assemble_record("https://www.resmed.xx", None, Vec::new(), None);
        assert_eq!(record.host, "www.resmed.xx");
        assert_eq!(record.url, "https://www.resmed.xx");
        assert!(record.status.is_none());
        assert!(record.title.is_none());
        assert!(record.final_url.is_none());
    }

    #[test]
    fn test_assemble_record_html_title_extracted() {
        let o = outcome(
            200,
            &[("content-type", "text/html; charset=utf-8"), ("server", "cloudflare")],
            "<html><head><title> ResMed </title></head></html>",
            "https://www.resmed.com/",
        );
        let record = assemble_record("https://resmed.com", Some(&o), Vec::new(), Some("1.2.3.4".into()));

        assert_eq!(record.status, Some(200));
        assert_eq!(record.title.as_deref(), Some("ResMed"));
        assert_eq!(record.hosting_provider.as_deref(), Some("Cloudflare"));
        assert_eq!(record.final_url.as_deref(), Some("https://www.resmed.com/"));
        assert_eq!(record.ip.as_deref(), Some("1.2.3.4"));
    }

    #[test]
    fn test_assemble_record_non_html_body_never_parsed() {
        let o = outcome(
            200,
            &[("content-type", "application/json")],
            "<title>should be ignored</title>",
            "https://api.example/",
        );
        let record = assemble_record("https://resmed.com", Some(&o), Vec::new(), None);
        assert!(record.title.is_none());
    }

    #[test]
    fn test_assemble_record_hosting_from_cname_without_fetch() {
        let chain = vec!["sites.wpenginepowered.com".to_string()];
        let record = assemble_record("https://blog.resmed.com", None, chain.clone(), None);
        assert_eq!(record.hosting_provider.as_deref(), Some("WP Engine"));
        assert_eq!(record.cname_chain, chain);
    }
}
