//! Catalog loading. The reference catalog ships embedded in the binary; a JSON
//! file with the same shape can replace it at startup via `JOB_CATALOG_PATH`.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::jobs::models::JobPosting;

const SEED_CATALOG_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/jobs.json"));

/// Returns the built-in beauty-clinic catalog (five postings).
pub fn seed_catalog() -> Result<Vec<JobPosting>> {
    parse_catalog(SEED_CATALOG_JSON).context("Embedded job catalog is malformed")
}

/// Reads a catalog from a JSON file containing an array of postings.
pub async fn load_catalog(path: &Path) -> Result<Vec<JobPosting>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read job catalog: {}", path.display()))?;

    let postings = parse_catalog(&raw)
        .with_context(|| format!("Invalid job catalog: {}", path.display()))?;

    info!("Loaded {} postings from {}", postings.len(), path.display());
    Ok(postings)
}

/// Parses and validates a catalog. Posting ids must be unique.
pub fn parse_catalog(raw: &str) -> Result<Vec<JobPosting>> {
    let postings: Vec<JobPosting> = serde_json::from_str(raw)?;

    let mut seen = HashSet::new();
    for posting in &postings {
        if !seen.insert(posting.id.as_str()) {
            bail!("Duplicate posting id '{}'", posting.id);
        }
    }

    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::models::Seniority;

    #[test]
    fn test_seed_catalog_has_five_postings() {
        let catalog = seed_catalog().unwrap();
        assert_eq!(catalog.len(), 5);
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_seed_catalog_carries_display_fields() {
        let catalog = seed_catalog().unwrap();
        let first = &catalog[0];
        assert_eq!(first.title, "受付カウンセラー");
        assert_eq!(first.seniority, Some(Seniority::Junior));
        let salary = first.salary_negotiation.as_ref().unwrap();
        assert_eq!((salary.min, salary.max, salary.average), (300, 400, 350));
        assert_eq!(first.placement_history[0].year, 2024);
        assert!(first.benefits.contains(&"書類選考免除".to_string()));
    }

    #[test]
    fn test_every_seed_posting_is_in_tokyo() {
        let catalog = seed_catalog().unwrap();
        assert!(catalog.iter().all(|p| p.location.contains("東京")));
    }

    #[test]
    fn test_parse_catalog_rejects_duplicate_ids() {
        let raw = r#"[
            {"id": "1", "title": "a", "company": "b", "location": "c", "url": "d"},
            {"id": "1", "title": "e", "company": "f", "location": "g", "url": "h"}
        ]"#;
        let err = parse_catalog(raw).unwrap_err();
        assert!(err.to_string().contains("Duplicate posting id"));
    }

    #[test]
    fn test_parse_catalog_accepts_minimal_entries() {
        let raw = r#"[{"id": "x", "title": "t", "company": "c", "location": "l", "url": "u"}]"#;
        let catalog = parse_catalog(raw).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog[0].skills.is_empty());
        assert!(catalog[0].seniority.is_none());
    }

    #[test]
    fn test_parse_catalog_accepts_empty_array() {
        assert!(parse_catalog("[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file_is_an_error() {
        let err = load_catalog(Path::new("/nonexistent/jobs.json")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read job catalog"));
    }
}
