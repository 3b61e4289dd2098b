pub mod dns;
pub mod fetch;
pub mod html;
pub mod record;

pub use dns::{DnsProbe, HostResolver};
pub use fetch::{FetchOutcome, HttpProbe};
pub use record::SiteRecord;
