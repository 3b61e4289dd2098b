//! Redirect-aware collapse of the enriched record set. Records whose
//! fetches landed on the same final root are merged down to one entry,
//! first seen in the (already deterministic) input order wins.

use crate::classify::normalize_root;
use sitescope_probe::record::host_of;
use sitescope_probe::SiteRecord;
use std::collections::HashSet;
use tracing::debug;

/// Collapse records by final-redirect root. When the kept record was a
/// redirect (its own root differs from the final root), its host/url are
/// rewritten to the destination before it is stored. Later records for a
/// root that has already been seen are discarded. Output preserves
/// insertion order; running the pass twice changes nothing.
pub fn dedup_by_final_root(records: Vec<SiteRecord>) -> Vec<SiteRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut deduped = Vec::new();

    for mut record in records {
        let final_root = match record.final_url.as_deref() {
            Some(final_url) => normalize_root(final_url),
            None => normalize_root(&record.url),
        };

        if !seen.insert(final_root.clone()) {
            debug!("Dropping duplicate for {}", final_root);
            continue;
        }

        if normalize_root(&record.url) != final_root {
            record.host = host_of(&final_root);
            record.url = final_root;
        }

        deduped.push(record);
    }

    deduped
}
