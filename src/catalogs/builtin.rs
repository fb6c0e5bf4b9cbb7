//! Tables shipped with the crate: the bright named stars of the southern sky
//! and five Māori star figures.

use crate::constellation::{load_constellations, ConstellationSpec};
use crate::{NameTable, StarCatalog};

use super::hipparcos::load_catalog_csv;
use super::names::load_star_names;

pub const BRIGHT_STARS_CSV: &str = include_str!("../../data/bright_stars.csv");
pub const STAR_NAMES_JSON: &str = include_str!("../../data/star_names.json");
pub const CONSTELLATIONS_JSON: &str = include_str!("../../data/constellations.json");

pub fn bright_stars() -> anyhow::Result<StarCatalog> {
    load_catalog_csv(BRIGHT_STARS_CSV)
}

pub fn star_names() -> anyhow::Result<NameTable> {
    load_star_names(STAR_NAMES_JSON)
}

pub fn constellations() -> anyhow::Result<Vec<ConstellationSpec>> {
    load_constellations(CONSTELLATIONS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_load() {
        let catalog = bright_stars().unwrap();
        assert!(catalog.len() >= 30);
        assert!(catalog.iter().all(|e| e.has_valid_coordinates()));

        let names = star_names().unwrap();
        assert_eq!(names.get(26727).unwrap().common_name, "Alnitak");

        let figures = constellations().unwrap();
        assert_eq!(figures.len(), 5);
        // Every figure member is present in the shipped catalog
        for figure in &figures {
            for id in figure.member_ids() {
                assert!(
                    catalog.get(id).is_some(),
                    "{} lists unknown star {}",
                    figure.name,
                    id
                );
            }
        }
    }
}
