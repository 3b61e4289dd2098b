use thiserror::Error;

/// Errors that can actually end a catalog run. Discovery and enrichment
/// failures are absorbed as absent data long before they get here; only
/// writing the final inventory can fail the program.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
