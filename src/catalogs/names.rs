//! Star name table loader.
//!
//! JSON array of `{ "id": <hip>, "common_name": "...", "alternate_name": "..." | null }`.

use anyhow::Context;
use serde::Deserialize;

use crate::{NameTable, StarName};

#[derive(Debug, Deserialize)]
struct NameRecord {
    id: u64,
    #[serde(flatten)]
    name: StarName,
}

/// Parse a name table from JSON.
pub fn load_star_names(json: &str) -> anyhow::Result<NameTable> {
    let records: Vec<NameRecord> =
        serde_json::from_str(json).context("parsing star name table")?;
    Ok(records.into_iter().map(|r| (r.id, r.name)).collect())
}

/// Parse a name table from a JSON file.
pub fn load_star_names_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<NameTable> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading name table {}", path.display()))?;
    load_star_names(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_and_alternate_names() {
        let json = r#"[
            { "id": 26727, "common_name": "Alnitak", "alternate_name": "Tautoru" },
            { "id": 11767, "common_name": "Polaris", "alternate_name": null },
            { "id": 60718, "common_name": "Acrux" }
        ]"#;
        let names = load_star_names(json).unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(
            names.get(26727),
            Some(&StarName::new("Alnitak", Some("Tautoru".to_string())))
        );
        assert_eq!(names.get(11767).unwrap().alternate_name, None);
        assert_eq!(names.get(60718).unwrap().alternate_name, None);
    }

    #[test]
    fn reports_malformed_json() {
        let err = load_star_names("[{ \"id\": \"x\" }]").unwrap_err();
        assert!(format!("{err:#}").contains("star name table"));
    }
}
