//! Integration tests - Translate complete query descriptions against a YAML catalog
//!
//! These tests go through the public entry points only: catalog loading,
//! `Translator::translate`, and response-shape validation.

mod response_shape_tests;
mod translation_scenarios;

use std::path::PathBuf;

use odata_translator::edm::EdmCatalog;

pub(crate) fn sales_catalog() -> EdmCatalog {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sales_edm.yaml");
    EdmCatalog::from_yaml_file(&path).expect("sales fixture should load")
}
