//! Catalog table loader for Hipparcos-numbered bright-star tables.
//!
//! The table is CSV with a header row and the columns
//! `hip,mag,ra_deg,dec_deg,bv`: identifier, apparent V magnitude, right
//! ascension and declination in degrees (J2000), and B−V color index.
//!
//! Only the identifier is validated here. A numeric field that is empty or
//! does not parse is kept as NaN so the projector can skip the row; a
//! trailing color column may be missing entirely.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::{CatalogEntry, StarCatalog};

/// Build an entry from the five text fields of one catalog row.
///
/// Returns `None` only when the identifier is not an unsigned integer.
pub fn entry_from_fields(fields: [&str; 5]) -> Option<CatalogEntry> {
    let [hip, mag, ra, dec, bv] = fields;
    let id: u64 = hip.trim().parse().ok()?;
    let bv = parse_number(bv);
    Some(CatalogEntry {
        id,
        magnitude: parse_number(mag),
        ra_deg: parse_number(ra),
        dec_deg: parse_number(dec),
        bv: bv.is_finite().then_some(bv),
    })
}

/// Load a catalog table from an in-memory CSV string.
pub fn load_catalog_csv(data: &str) -> anyhow::Result<StarCatalog> {
    load_catalog_csv_from_reader(data.as_bytes())
}

/// Load a catalog table from any CSV reader.
pub fn load_catalog_csv_from_reader<R: Read>(reader: R) -> anyhow::Result<StarCatalog> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    let mut dropped = 0usize;
    for (row, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading catalog row {}", row + 1))?;
        let field = |i: usize| record.get(i).unwrap_or("");
        match entry_from_fields([field(0), field(1), field(2), field(3), field(4)]) {
            Some(entry) => entries.push(entry),
            None => {
                dropped += 1;
                debug!(
                    "Dropping catalog row {} with identifier {:?}",
                    row + 1,
                    field(0)
                );
            }
        }
    }

    debug!(
        "Loaded {} catalog entries ({} rows without an identifier)",
        entries.len(),
        dropped
    );
    Ok(StarCatalog::new(entries))
}

/// Load a catalog table from a CSV file.
pub fn load_catalog_csv_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<StarCatalog> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening catalog file {}", path.display()))?;
    load_catalog_csv_from_reader(file)
}

fn parse_number(s: &str) -> f64 {
    s.trim().parse().unwrap_or(f64::NAN)
}
