//! Loaders for the static tables the sky is built from: the star catalog,
//! the star name table, and the tables shipped with the crate.

pub mod builtin;
pub mod hipparcos;
pub mod names;

pub use hipparcos::{entry_from_fields, load_catalog_csv, load_catalog_csv_from_file};
pub use names::{load_star_names, load_star_names_from_file};
