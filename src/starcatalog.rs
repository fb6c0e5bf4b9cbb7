//! In-memory star catalog and name table.
//!
//! Both are read-only after loading. `StarCatalog` keeps catalog order (the
//! order stars are emitted in) and an id lookup; `NameTable` maps catalog ids
//! to display names.

use std::collections::HashMap;

use crate::{CatalogEntry, StarName};

#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<u64, usize>,
}

impl StarCatalog {
    /// Build a catalog from owned entries.
    ///
    /// When an identifier repeats, lookups by id return the first entry;
    /// every entry is still projected.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            by_id.entry(entry.id).or_insert(idx);
        }
        Self { entries, by_id }
    }

    /// Return the total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the catalog contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Look up an entry by catalog identifier.
    pub fn get(&self, id: u64) -> Option<&CatalogEntry> {
        self.by_id.get(&id).map(|&idx| &self.entries[idx])
    }
}

impl<'a> IntoIterator for &'a StarCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Catalog id → display names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTable {
    names: HashMap<u64, StarName>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u64, name: StarName) -> Option<StarName> {
        self.names.insert(id, name)
    }

    pub fn get(&self, id: u64) -> Option<&StarName> {
        self.names.get(&id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(u64, StarName)> for NameTable {
    fn from_iter<I: IntoIterator<Item = (u64, StarName)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id_keeps_catalog_order() {
        let catalog = StarCatalog::new(vec![
            CatalogEntry::new(30, 1.0, 10.0, 0.0, None),
            CatalogEntry::new(10, 2.0, 20.0, 0.0, None),
            CatalogEntry::new(20, 3.0, 30.0, 0.0, None),
        ]);
        let ids: Vec<u64> = catalog.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert_eq!(catalog.get(10).map(|e| e.magnitude), Some(2.0));
        assert!(catalog.get(99).is_none());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn duplicate_ids_resolve_to_first_entry() {
        let catalog = StarCatalog::new(vec![
            CatalogEntry::new(7, 1.0, 10.0, 0.0, None),
            CatalogEntry::new(7, 5.0, 20.0, 0.0, None),
        ]);
        assert_eq!(catalog.get(7).map(|e| e.magnitude), Some(1.0));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn name_table_from_pairs() {
        let names: NameTable = vec![
            (11767, StarName::new("Polaris", None)),
            (26727, StarName::new("Alnitak", Some("Tautoru".into()))),
        ]
        .into_iter()
        .collect();
        assert_eq!(names.len(), 2);
        let alnitak = names.get(26727).map(|n| n.common_name.as_str());
        assert_eq!(alnitak, Some("Alnitak"));
        assert!(names.get(1).is_none());
    }
}
