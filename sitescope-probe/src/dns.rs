use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

const MAX_CNAME_HOPS: usize = 5;

/// Liveness seam: anything that can say whether a host resolves. Lets the
/// existence filter run against a lookup table in tests instead of a live
/// resolver.
#[async_trait::async_trait]
pub trait HostResolver: Send + Sync {
    /// Does the host resolve at all?
    async fn resolves(&self, host: &str) -> bool;
}

/// Best-effort DNS lookups. Every operation swallows resolver errors and
/// reports what it managed to collect - a host that does not resolve is a
/// signal, not a failure.
pub struct DnsProbe {
    resolver: TokioAsyncResolver,
}

impl DnsProbe {
    pub fn new() -> Self {
        let resolver =
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());
        Self { resolver }
    }

    /// Walk the CNAME chain for `host`, up to 5 hops. The first lookup
    /// that fails (NXDOMAIN, no CNAME record, timeout) ends the walk and
    /// whatever was collected so far is returned.
    pub async fn resolve_cname_chain(&self, host: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = host.to_string();

        for _ in 0..MAX_CNAME_HOPS {
            let lookup = match self.resolver.lookup(current.as_str(), RecordType::CNAME).await {
                Ok(l) => l,
                Err(e) => {
                    debug!("CNAME walk stopped at {}: {}", current, e);
                    break;
                }
            };

            let target = lookup.iter().find_map(|rdata| match rdata {
                RData::CNAME(cname) => Some(cname.0.to_utf8()),
                _ => None,
            });

            match target {
                Some(t) => {
                    let t = t.trim_end_matches('.').to_string();
                    chain.push(t.clone());
                    current = t;
                }
                None => break,
            }
        }

        chain
    }

    /// Single forward lookup. Used as a best-effort signal only.
    pub async fn resolve_ip(&self, host: &str) -> Option<String> {
        match self.resolver.lookup_ip(host).await {
            Ok(lookup) => lookup.iter().next().map(|ip| ip.to_string()),
            Err(e) => {
                debug!("Forward lookup failed for {}: {}", host, e);
                None
            }
        }
    }

}

#[async_trait::async_trait]
impl HostResolver for DnsProbe {
    async fn resolves(&self, host: &str) -> bool {
        self.resolver.lookup_ip(host).await.is_ok()
    }
}

impl Default for DnsProbe {
    fn default() -> Self {
        Self::new()
    }
}
