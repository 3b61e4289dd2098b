pub mod classify;
pub mod dedup;
pub mod discover;
pub mod enrich;
pub mod error;
pub mod inventory;
pub mod liveness;
pub mod pipeline;
pub mod wordlists;

pub use error::CatalogError;
pub use pipeline::{run_catalog, CatalogOptions, DEFAULT_CONCURRENCY};
pub use sitescope_probe::SiteRecord;

pub fn print_banner() {
    println!(
        r#"
          _ __
   _____ (_) /____  ___ _________  ___  ___
  / ___// / __/ _ \/ __/ __/ _ \/ _ \/ _ \
 (__  )/ / /_/  __/__ \ /_/ /_/ / /_/ /  __/
/____//_/\__/\___/____/\__/\___/ .___/\___/
                              /_/   v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
