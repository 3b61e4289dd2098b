//! Compiled-in seed pages and enumeration wordlists. Not configurable at
//! runtime; the catalog is a single-shot batch tool aimed at one
//! organization's domain family.

/// Country-selector pages known to link out across the whole site family.
pub const SEED_PAGES: &[&str] = &[
    "https://ap.resmed.com/home/country-selector",
    "https://www.resmed.asia/en-bn/country_selector",
    "https://www.resmed.tw/zh-tw/consumer/country_selector",
    "https://www.resmed.co.th/en-th/consumer/country_selector",
    "https://www.resmed.lat/healthcare-professional/country_selector",
    "https://www.resmed.la/country-selector",
    "https://me.resmed.com/",
];

/// Common subdomains to enumerate against every discovered base domain.
pub const SUBDOMAINS: &[&str] = &[
    "www", "shop", "support", "blog", "portal", "api", "mail", "webmail",
    "admin", "secure", "vpn", "remote", "careers", "investor", "newsroom",
    "dev", "stage", "staging", "test", "prod", "china", "ap", "me", "eu",
];

/// Common TLDs and multi-label TLDs to test against the organization name.
pub const TLDS: &[&str] = &[
    "com", "org", "net", "co.uk", "com.au", "com.cn", "co.jp", "co.kr",
    "co.th", "co.in", "co.id", "co.nz", "com.br", "com.tw", "com.hk",
    "com.sg", "com.my", "com.ph", "com.vn", "de", "fr", "es", "it", "nl",
    "be", "ch", "at", "dk", "se", "no", "fi", "pl", "cz", "pt", "ie", "gr",
    "ru", "ua", "ca", "mx", "ar", "cl", "pe", "lat", "la", "asia", "ae",
    "sa", "qa", "eg", "za", "jp", "kr", "tw", "hk", "sg", "my", "th", "id",
    "ph", "vn", "in",
];
