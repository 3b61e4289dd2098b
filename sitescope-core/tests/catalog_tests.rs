// End-to-end behavior of the catalog stages, minus live DNS: discovery
// over a mock server, hostname filtering, result filtering and the
// redirect collapse working together.

use sitescope_core::classify::{should_exclude_host, should_exclude_result};
use sitescope_core::dedup::dedup_by_final_root;
use sitescope_core::discover::{enumerate_subdomains, scrape_seed_pages};
use sitescope_core::SiteRecord;
use std::collections::HashSet;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn enriched(url: &str, final_url: &str, title: &str) -> SiteRecord {
    let mut r = SiteRecord::new(url.to_string());
    r.status = Some(200);
    r.title = Some(title.to_string());
    r.final_url = Some(final_url.to_string());
    r
}

#[tokio::test]
async fn test_seed_to_inventory_scenario() {
    // Seed page links to the shop and the main site; an api host shows
    // up too and must be dropped before any fetch would happen.
    let mock_server = MockServer::start().await;
    let page = r#"<html><body>
        <a href="https://shop.resmed.com/">Shop</a>
        <a href="https://www.resmed.com/en-us/">Main</a>
        <a href="https://api.resmed.com/v2/">API</a>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/selector"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_bytes(page.as_bytes()),
        )
        .mount(&mock_server)
        .await;

    let seed = format!("{}/selector", mock_server.uri());
    let discovered = scrape_seed_pages(&[seed.as_str()]).await;

    assert!(discovered.contains("https://shop.resmed.com"));
    assert!(discovered.contains("https://www.resmed.com"));
    assert!(discovered.contains("https://api.resmed.com"));

    let surviving: Vec<&String> = discovered
        .iter()
        .filter(|url| !should_exclude_host(url))
        .collect();

    assert!(surviving.iter().any(|u| u.as_str() == "https://shop.resmed.com"));
    assert!(surviving.iter().any(|u| u.as_str() == "https://www.resmed.com"));
    assert!(!surviving.iter().any(|u| u.as_str() == "https://api.resmed.com"));

    // Hreflang expansion found www.resmed.de; TLD enumeration separately
    // produced resmed.de, which redirects there. After enrichment both
    // exist as records; dedup must leave exactly one entry for the
    // destination.
    let records = vec![
        enriched("https://resmed.de", "https://www.resmed.de/", "ResMed DE"),
        enriched("https://www.resmed.de", "https://www.resmed.de/", "ResMed DE"),
        enriched("https://www.resmed.com", "https://www.resmed.com/", "ResMed"),
    ];

    let inventory = dedup_by_final_root(records);

    let de_entries: Vec<_> = inventory
        .iter()
        .filter(|r| r.host == "www.resmed.de")
        .collect();
    assert_eq!(de_entries.len(), 1);
    assert_eq!(de_entries[0].url, "https://www.resmed.de");
    assert_eq!(inventory.len(), 2);
}

#[test]
fn test_result_filter_then_dedup() {
    let mut login = enriched("https://secure.resmed.com", "https://secure.resmed.com/", "Sign In");
    login.status = Some(200);

    let mut forbidden = enriched("https://www.resmed.ru", "https://www.resmed.ru/", "ResMed RU");
    forbidden.status = Some(403);

    let mut empty = SiteRecord::new("https://www.resmed.ua".to_string());
    empty.ip = Some("5.6.7.8".to_string());

    let good = enriched("https://www.resmed.fr", "https://www.resmed.fr/", "ResMed France");

    let kept: Vec<SiteRecord> = vec![login, forbidden, empty, good]
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

    assert_eq!(kept.len(), 1);
    let inventory = dedup_by_final_root(kept);
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].host, "www.resmed.fr");
}

#[test]
fn test_subdomain_enumeration_feeds_from_discovered_set() {
    let mut discovered = HashSet::new();
    discovered.insert("https://www.resmed.com".to_string());
    discovered.insert("https://www.resmed.co.uk".to_string());

    let candidates = enumerate_subdomains(&discovered);

    assert!(candidates.contains("https://shop.resmed.co.uk"));
    assert!(candidates.contains("https://investor.resmed.com"));
    // Multi-label TLD base survived registrable-base extraction intact
    assert!(!candidates.contains("https://shop.co.uk"));
}
