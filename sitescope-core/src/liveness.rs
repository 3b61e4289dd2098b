//! DNS-existence pre-filter for the generated (TLD/subdomain) candidate
//! sets. Deliberately decoupled from HTTP reachability: a host may
//! resolve and still fail every later fetch, and that is handled by the
//! exclusion and dedup stages instead.

use sitescope_probe::record::host_of;
use sitescope_probe::{DnsProbe, HostResolver};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{info, warn};

/// Keep only the candidates whose host resolves in forward DNS, checked
/// under the global concurrency bound.
pub async fn filter_live(candidates: &HashSet<String>, limit: usize) -> HashSet<String> {
    filter_live_with(Arc::new(DnsProbe::new()), candidates, limit).await
}

/// The same filter over any resolver implementation.
pub async fn filter_live_with<R>(
    dns: Arc<R>,
    candidates: &HashSet<String>,
    limit: usize,
) -> HashSet<String>
where
    R: HostResolver + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit));
    let live: Arc<Mutex<HashSet<String>>> = Arc::new(Mutex::new(HashSet::new()));

    info!("Checking {} candidates for DNS resolution", candidates.len());

    let mut tasks = Vec::new();
    for candidate in candidates {
        let candidate = candidate.clone();
        let dns = dns.clone();
        let semaphore = semaphore.clone();
        let live = live.clone();

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await.expect("semaphore closed");
            if dns.resolves(&host_of(&candidate)).await {
                live.lock().await.insert(candidate);
            }
        }));
    }

    for task in tasks {
        if let Err(e) = task.await {
            warn!("Liveness worker failed: {}", e);
        }
    }

    let live = Arc::try_unwrap(live)
        .expect("liveness workers finished")
        .into_inner();
    info!("{} candidates resolve in DNS", live.len());
    live
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Resolver backed by a fixed host table.
    struct TableResolver {
        known: HashSet<String>,
    }

    #[async_trait::async_trait]
    impl HostResolver for TableResolver {
        async fn resolves(&self, host: &str) -> bool {
            self.known.contains(host)
        }
    }

    fn resolver_for(hosts: &[&str]) -> Arc<TableResolver> {
        Arc::new(TableResolver {
            known: hosts.iter().map(|h| h.to_string()).collect(),
        })
    }

    #[tokio::test]
    async fn test_filter_live_drops_non_resolving_candidates() {
        let dns = resolver_for(&["www.resmed.de", "shop.resmed.com"]);

        let mut candidates = HashSet::new();
        candidates.insert("https://www.resmed.de".to_string());
        candidates.insert("https://shop.resmed.com".to_string());
        candidates.insert("https://stage.resmed.xx".to_string());

        let live = filter_live_with(dns, &candidates, 20).await;

        assert_eq!(live.len(), 2);
        assert!(live.contains("https://www.resmed.de"));
        assert!(live.contains("https://shop.resmed.com"));
        assert!(!live.contains("https://stage.resmed.xx"));
    }

    #[tokio::test]
    async fn test_filter_live_resolves_the_host_not_the_url() {
        let dns = resolver_for(&["portal.resmed.fr"]);

        let mut candidates = HashSet::new();
        candidates.insert("https://portal.resmed.fr/en-fr/login".to_string());

        let live = filter_live_with(dns, &candidates, 1).await;

        assert_eq!(live.len(), 1);
        assert!(live.contains("https://portal.resmed.fr/en-fr/login"));
    }

    #[tokio::test]
    async fn test_filter_live_empty_input() {
        let dns = resolver_for(&[]);
        let live = filter_live_with(dns, &HashSet::new(), 20).await;
        assert!(live.is_empty());
    }
}
