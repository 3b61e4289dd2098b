//! Final inventory output. One CSV file, absent fields as empty strings,
//! CNAME chain semicolon-joined, `final_url` dropped from the schema.

use crate::error::Result;
use sitescope_probe::SiteRecord;
use std::path::Path;
use tracing::info;

const CSV_HEADER: &[&str] = &[
    "host",
    "url",
    "status",
    "title",
    "hosting_provider",
    "ip",
    "cname_chain",
];

pub fn write_inventory(path: &Path, records: &[SiteRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record(&[
            record.host.clone(),
            record.url.clone(),
            record.status.map(|s| s.to_string()).unwrap_or_default(),
            record.title.clone().unwrap_or_default(),
            record.hosting_provider.clone().unwrap_or_default(),
            record.ip.clone().unwrap_or_default(),
            record.cname_chain.join(";"),
        ])?;
    }

    writer.flush()?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_inventory_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.csv");

        let mut full = SiteRecord::new("https://www.resmed.de".to_string());
        full.status = Some(200);
        full.title = Some("ResMed Germany".to_string());
        full.hosting_provider = Some("Akamai".to_string());
        full.ip = Some("2.3.4.5".to_string());
        full.cname_chain = vec![
            "www.resmed.de.edgesuite.net".to_string(),
            "a1234.b.akamai.net".to_string(),
        ];
        full.final_url = Some("https://www.resmed.de/".to_string());

        let sparse = SiteRecord::new("https://www.resmed.cz".to_string());

        write_inventory(&path, &[full, sparse]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();

        assert_eq!(
            lines.next().unwrap(),
            "host,url,status,title,hosting_provider,ip,cname_chain"
        );
        let first = lines.next().unwrap();
        assert!(first.contains("www.resmed.de.edgesuite.net;a1234.b.akamai.net"));
        // final_url never appears in the output schema
        assert!(!contents.contains("https://www.resmed.de/"));

        let second = lines.next().unwrap();
        assert!(second.starts_with("www.resmed.cz,https://www.resmed.cz,,,,,"));
    }

    #[test]
    fn test_write_inventory_unwritable_path_fails() {
        let records = [SiteRecord::new("https://www.resmed.com".to_string())];
        let result = write_inventory(Path::new("/nonexistent-dir/sites.csv"), &records);
        assert!(result.is_err());
    }
}
