//! Pure classification rules: organization URL matching, hostname and
//! result exclusion, and hosting-provider fingerprinting. Everything here
//! is stateless and table-driven so individual rules can be tested in
//! isolation.

use once_cell::sync::Lazy;
use regex::Regex;
use sitescope_probe::record::host_of;
use std::collections::HashMap;

/// The organization label whose domain family we are cataloging.
pub const ORG_DOMAIN: &str = "resmed";

/// Hosts under this domain are hard-excluded from the catalog.
const DENYLISTED_DOMAIN: &str = "resmed.ca";

static ORG_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://[^/]*resmed\.[a-z.]+(/|$)").unwrap());

static ROOT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(https?://[^/]+)").unwrap());

/// Hostname prefixes that mark non-production or infrastructure hosts.
/// Each entry matches as a literal prefix, or as a hyphen-delimited infix
/// token (with trailing `.`/`-` stripped), e.g. `uat.` also catches
/// `foo-uat.resmed.com`.
const EXCLUDED_PREFIXES: &[&str] = &[
    "vpn.", "mail.", "webmail.",
    "admin.", "admin-",
    "api.", "api-", "apim.", "apigateway",
    "dev.", "dev-", "dev2-", "dev3-", "developer.",
    "stage.", "staging.", "staging-",
    "test.", "test-",
    "uat.", "uat-", "uat2-",
    "qa.", "qa-", "qa2-",
    "sbx.", "-sbx.", "sandbox.",
    "sit.", "-sit.",
    "poc.", "-poc.",
    "internal-",
];

/// Keywords excluded when found as a substring of ANY dot-separated label.
/// Intentionally broad: "devops" matches "dev", "developer" matches "dev".
/// The false-positive surface is accepted in exchange for never shipping
/// an internal host in the inventory.
const EXCLUDED_KEYWORDS: &[&str] = &[
    "dev", "uat", "test", "staging", "stage", "admin", "sandbox", "sbx",
    "sit", "qa", "poc", "api", "backend", "analytics", "cognos", "portal",
];

/// HTTP statuses that disqualify a result outright.
const EXCLUDED_STATUSES: &[u16] = &[401, 403, 404, 429, 503];

/// Title fragments identifying login walls.
const LOGIN_TITLE_WORDS: &[&str] = &["sign in", "signin", "login", "sign-in"];

/// Does this URL belong to the organization's domain family?
pub fn is_org_url(url: &str) -> bool {
    ORG_URL_RE.is_match(url)
}

/// Reduce a URL to its root: scheme + host, no path, no trailing slash.
/// Non-URL input is returned unchanged.
pub fn normalize_root(url: &str) -> String {
    match ROOT_RE.captures(url) {
        Some(caps) => caps[1].trim_end_matches('/').to_string(),
        None => url.to_string(),
    }
}

/// Registrable base domain for an organization host, derived label-wise:
/// the suffix starting at the exact label `resmed`. Returns `None` when
/// the host has no such label (e.g. `notresmed.com`).
pub fn registrable_base(host: &str) -> Option<String> {
    let labels: Vec<&str> = host.split('.').collect();
    let idx = labels.iter().position(|l| *l == ORG_DOMAIN)?;
    if idx + 1 >= labels.len() {
        return None;
    }
    Some(labels[idx..].join("."))
}

/// Hostname-level exclusion, applied before any fetch is attempted.
pub fn should_exclude_host(url: &str) -> bool {
    let host = host_of(url);

    if host.contains(DENYLISTED_DOMAIN) {
        return true;
    }

    for prefix in EXCLUDED_PREFIXES {
        let infix = format!("-{}", prefix.trim_end_matches(['.', '-']));
        if host.starts_with(prefix) || host.contains(&infix) {
            return true;
        }
    }

    for label in host.split('.') {
        for keyword in EXCLUDED_KEYWORDS {
            if label.contains(keyword) {
                return true;
            }
        }
    }

    false
}

/// Result-level exclusion, applied after enrichment. An IP alone is not
/// enough signal to keep a record.
pub fn should_exclude_result(
    status: Option<u16>,
    title: Option<&str>,
    hosting: Option<&str>,
    _ip: Option<&str>,
) -> bool {
    if let Some(code) = status {
        if EXCLUDED_STATUSES.contains(&code) {
            return true;
        }
    }

    if let Some(t) = title {
        let t = t.to_lowercase();
        if LOGIN_TITLE_WORDS.iter().any(|w| t.contains(w)) {
            return true;
        }
    }

    status.is_none() && title.is_none() && hosting.is_none()
}

/// Which signal a hosting rule inspects.
enum Signal {
    /// Combined server + via + cname-chain + x-powered-by haystack.
    Haystack,
    /// A header being present at all, regardless of value.
    HeaderPresent,
    /// The X-Powered-By value only.
    PoweredBy,
    /// The Server value only - reserved for raw web-server tokens that
    /// must not outrank platform rules.
    ServerHeader,
}

struct HostingRule {
    signal: Signal,
    tokens: &'static [&'static str],
    label: &'static str,
}

/// Ordered, first-match-wins. CDNs sit on top because they front most of
/// the other platforms; bare web servers come last and label as
/// self-hosted only when nothing else fired.
static HOSTING_RULES: &[HostingRule] = &[
    // CDNs
    HostingRule { signal: Signal::Haystack, tokens: &["cloudflare"], label: "Cloudflare" },
    HostingRule { signal: Signal::HeaderPresent, tokens: &["cf-ray"], label: "Cloudflare" },
    HostingRule { signal: Signal::Haystack, tokens: &["akamai", "edgesuite.net", "akamaihd.net", "akamaiedge"], label: "Akamai" },
    HostingRule { signal: Signal::Haystack, tokens: &["fastly", "fastly.net"], label: "Fastly" },
    HostingRule { signal: Signal::Haystack, tokens: &["cloudfront", "cloudfront.net"], label: "Amazon CloudFront" },
    // E-commerce platforms
    HostingRule { signal: Signal::Haystack, tokens: &["shopify", "myshopify.com"], label: "Shopify" },
    HostingRule { signal: Signal::Haystack, tokens: &["bigcommerce", "mybigcommerce.com"], label: "BigCommerce" },
    HostingRule { signal: Signal::PoweredBy, tokens: &["woocommerce"], label: "WooCommerce" },
    // CMS / marketing platforms
    HostingRule { signal: Signal::Haystack, tokens: &["hubspot", "hscoscdn", "hubspot.net"], label: "HubSpot" },
    HostingRule { signal: Signal::Haystack, tokens: &["wordpress.com", "wp.com"], label: "WordPress.com" },
    HostingRule { signal: Signal::Haystack, tokens: &["squarespace"], label: "Squarespace" },
    HostingRule { signal: Signal::Haystack, tokens: &["wix"], label: "Wix" },
    HostingRule { signal: Signal::Haystack, tokens: &["webflow"], label: "Webflow" },
    HostingRule { signal: Signal::Haystack, tokens: &["ghost"], label: "Ghost" },
    // Managed WordPress
    HostingRule { signal: Signal::Haystack, tokens: &["wpengine", "wpenginepowered"], label: "WP Engine" },
    HostingRule { signal: Signal::Haystack, tokens: &["kinsta"], label: "Kinsta" },
    HostingRule { signal: Signal::Haystack, tokens: &["pantheon", "pantheonsite.io"], label: "Pantheon" },
    HostingRule { signal: Signal::Haystack, tokens: &["flywheel"], label: "Flywheel" },
    // PaaS / clouds
    HostingRule { signal: Signal::Haystack, tokens: &["vercel", "vercel-dns", "vercel.app"], label: "Vercel" },
    HostingRule { signal: Signal::Haystack, tokens: &["netlify", "netlify.app", "netlify.com"], label: "Netlify" },
    HostingRule { signal: Signal::Haystack, tokens: &["heroku", "herokuapp.com"], label: "Heroku" },
    HostingRule { signal: Signal::Haystack, tokens: &["aws", "amazon", "elastic"], label: "AWS" },
    HostingRule { signal: Signal::Haystack, tokens: &["azure", "azurewebsites", "windows"], label: "Microsoft Azure" },
    HostingRule { signal: Signal::Haystack, tokens: &["google", "gcp", "appspot"], label: "Google Cloud" },
    HostingRule { signal: Signal::Haystack, tokens: &["digitalocean"], label: "DigitalOcean" },
    HostingRule { signal: Signal::Haystack, tokens: &["linode"], label: "Linode" },
    HostingRule { signal: Signal::Haystack, tokens: &["vultr"], label: "Vultr" },
    // Enterprise IR / analytics platforms
    HostingRule { signal: Signal::Haystack, tokens: &["equisolve"], label: "Q4 (Equisolve)" },
    HostingRule { signal: Signal::Haystack, tokens: &["q4web"], label: "Q4 Web Systems" },
    HostingRule { signal: Signal::Haystack, tokens: &["adobedc", "adobedtm", "omtrdc"], label: "Adobe Experience Cloud" },
    HostingRule { signal: Signal::Haystack, tokens: &["optimizely", "episerver"], label: "Optimizely" },
    HostingRule { signal: Signal::Haystack, tokens: &["sitecore"], label: "Sitecore" },
    HostingRule { signal: Signal::Haystack, tokens: &["acquia"], label: "Acquia" },
    // Bare web servers, only when no platform matched
    HostingRule { signal: Signal::ServerHeader, tokens: &["nginx"], label: "Nginx (self-hosted)" },
    HostingRule { signal: Signal::ServerHeader, tokens: &["apache"], label: "Apache (self-hosted)" },
    HostingRule { signal: Signal::ServerHeader, tokens: &["iis", "microsoft"], label: "IIS (self-hosted)" },
    HostingRule { signal: Signal::ServerHeader, tokens: &["litespeed"], label: "LiteSpeed (self-hosted)" },
];

/// Best-guess hosting provider from response headers and the CNAME chain.
/// Expects header keys already lower-cased (as `HttpProbe` stores them).
/// Returns `None` when no rule fires - never guesses.
pub fn guess_hosting(
    headers: &HashMap<String, String>,
    cname_chain: &[String],
) -> Option<String> {
    let server = headers.get("server").map(|s| s.to_lowercase()).unwrap_or_default();
    let via = headers.get("via").map(|s| s.to_lowercase()).unwrap_or_default();
    let powered_by = headers
        .get("x-powered-by")
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    let cname = cname_chain.join(" ").to_lowercase();

    let haystack = format!("{} {} {} {}", server, via, cname, powered_by);

    for rule in HOSTING_RULES {
        let hit = match rule.signal {
            Signal::Haystack => rule.tokens.iter().any(|t| haystack.contains(t)),
            Signal::HeaderPresent => rule.tokens.iter().any(|t| headers.contains_key(*t)),
            Signal::PoweredBy => rule.tokens.iter().any(|t| powered_by.contains(t)),
            Signal::ServerHeader => rule.tokens.iter().any(|t| server.contains(t)),
        };
        if hit {
            return Some(rule.label.to_string());
        }
    }

    None
}
