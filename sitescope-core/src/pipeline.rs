//! End-to-end catalog orchestration: discovery strategies feeding one
//! working set, host-level exclusion, enrichment, result-level exclusion
//! and the final redirect collapse. No phase failure is fatal - every
//! stage degrades to whatever data it could get.

use crate::classify::{should_exclude_host, should_exclude_result};
use crate::dedup::dedup_by_final_root;
use crate::{discover, enrich, liveness, wordlists};
use indicatif::{ProgressBar, ProgressStyle};
use sitescope_probe::SiteRecord;
use std::collections::HashSet;
use std::time::Duration;
use tracing::info;

/// Global concurrency bound shared by every network-bound phase.
pub const DEFAULT_CONCURRENCY: usize = 20;

pub struct CatalogOptions {
    pub concurrency: usize,
    pub show_progress: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            show_progress: false,
        }
    }
}

fn phase_spinner(enabled: bool, message: &str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    Some(pb)
}

fn finish_phase(spinner: Option<ProgressBar>, message: String) {
    info!("{}", message);
    if let Some(pb) = spinner {
        pb.finish_with_message(message);
    }
}

/// Run the full discovery-and-cataloging pipeline and return the
/// deduplicated inventory. Callers decide what to do with it (the CLI
/// writes CSV).
pub async fn run_catalog(options: &CatalogOptions) -> Vec<SiteRecord> {
    let mut working_set: HashSet<String> = HashSet::new();

    // Phase 1: seed-page scraping
    let pb = phase_spinner(options.show_progress, "Scraping country selectors...");
    let seed_roots = discover::scrape_seed_pages(wordlists::SEED_PAGES).await;
    finish_phase(pb, format!("Seed scraping: {} roots", seed_roots.len()));
    working_set.extend(seed_roots.iter().cloned());

    // Phase 2: hreflang expansion of the seed roots
    let pb = phase_spinner(options.show_progress, "Expanding via hreflang tags...");
    let expanded = discover::expand_hreflang(&seed_roots, options.concurrency).await;
    finish_phase(pb, format!("Hreflang expansion: {} roots", expanded.len()));
    working_set.extend(expanded);

    // Phase 3: certificate transparency
    let pb = phase_spinner(options.show_progress, "Querying certificate transparency logs...");
    let ct_domains = discover::query_ct_logs().await;
    finish_phase(pb, format!("Certificate transparency: {} domains", ct_domains.len()));
    working_set.extend(ct_domains);

    // Phase 4: TLD enumeration, liveness-gated
    let pb = phase_spinner(options.show_progress, "Enumerating TLD variations...");
    let tld_live = liveness::filter_live(&discover::enumerate_tlds(), options.concurrency).await;
    finish_phase(pb, format!("TLD enumeration: {} live domains", tld_live.len()));
    working_set.extend(tld_live);

    // Phase 5: subdomain enumeration over everything found so far,
    // liveness-gated
    let pb = phase_spinner(options.show_progress, "Enumerating subdomains...");
    let subdomain_candidates = discover::enumerate_subdomains(&working_set);
    let subdomain_live = liveness::filter_live(&subdomain_candidates, options.concurrency).await;
    finish_phase(pb, format!("Subdomain enumeration: {} live domains", subdomain_live.len()));
    working_set.extend(subdomain_live);

    // Hostname-level exclusion, then a fixed order so dedup's
    // first-seen-wins policy is reproducible across runs
    let mut candidates: Vec<String> = working_set
        .into_iter()
        .filter(|url| !should_exclude_host(url))
        .collect();
    candidates.sort();
    info!("{} unique candidates after host filtering", candidates.len());

    // Phase 6: enrichment
    let pb = phase_spinner(options.show_progress, "Cataloging discovered domains...");
    let records = enrich::enrich_all(candidates, options.concurrency).await;
    finish_phase(pb, format!("Enrichment: {} records", records.len()));

    // Result-level exclusion
    let kept: Vec<SiteRecord> = records
        .into_iter()
        .filter(|r| {
            !should_exclude_result(
                r.status,
                r.title.as_deref(),
                r.hosting_provider.as_deref(),
                r.ip.as_deref(),
            )
        })
        .collect();
    info!("{} records after result filtering", kept.len());

    // Redirect collapse
    let inventory = dedup_by_final_root(kept);
    info!("{} unique sites after dedup", inventory.len());
    inventory
}
