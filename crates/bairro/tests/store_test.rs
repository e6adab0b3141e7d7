//! Integration tests for loading and saving datasets.

use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use bairro::store::to_pipe_string;
use bairro::{BairroError, Dataset, DatasetFormat, PriceLevel, Record, TriState};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

const JSON_DATA: &str = r#"[
  {
    "name": "Jojo Ramen",
    "cuisine": ["japonesa", "ramen"],
    "price_level": "$$",
    "accepts_voucher": "Sim",
    "diet_options": "vegetariano; sem glúten",
    "accessibility": null,
    "hours": "12h-23h",
    "highlights": "Tonkotsu"
  },
  {
    "name": "Pirajá",
    "cuisine": "boteco",
    "price_level": "$$$$",
    "accepts_voucher": false,
    "accessibility": 1
  },
  "not a restaurant"
]"#;

const PIPE_DATA: &str = "\
# name | cuisine | price | voucher | diet | accessibility | hours | address | description
Jojo Ramen | japonesa;ramen | $$ | sim | vegetariano;sem glúten | | 12h-23h | |
Pirajá | boteco | | não | | yes
 | orphan line with no name
";

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_json_with_lenient_fields() {
    let file = create_test_file(JSON_DATA, ".json");
    let dataset = Dataset::load(file.path()).unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.metadata.format, DatasetFormat::Json);
    assert!(dataset.metadata.hash.as_deref().unwrap().starts_with("sha256:"));

    let jojo = &dataset.records[0];
    assert_eq!(jojo.price_level, Some(PriceLevel::Moderate));
    assert_eq!(jojo.accepts_voucher, TriState::Yes);
    assert_eq!(jojo.accessibility, TriState::Unknown);
    assert!(jojo.has_diet_option("sem glúten"));
    assert_eq!(jojo.highlights, vec!["Tonkotsu"]);

    let piraja = &dataset.records[1];
    assert!(piraja.has_cuisine("boteco"));
    assert_eq!(piraja.price_level, None);
    assert_eq!(piraja.accepts_voucher, TriState::No);
    assert_eq!(piraja.accessibility, TriState::Yes);
}

#[test]
fn test_load_pipe() {
    let file = create_test_file(PIPE_DATA, ".txt");
    let dataset = Dataset::load(file.path()).unwrap();

    assert_eq!(dataset.metadata.format, DatasetFormat::Pipe);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records[0].hours.as_deref(), Some("12h-23h"));
    assert_eq!(dataset.records[0].address, None);
    assert_eq!(dataset.records[1].accepts_voucher, TriState::No);
    assert_eq!(dataset.records[1].accessibility, TriState::Yes);
}

#[test]
fn test_both_formats_agree() {
    let json = create_test_file(JSON_DATA, ".json");
    let pipe = create_test_file(PIPE_DATA, ".txt");
    let from_json = Dataset::load(json.path()).unwrap();
    let from_pipe = Dataset::load(pipe.path()).unwrap();

    let (a, b) = (&from_json.records[0], &from_pipe.records[0]);
    assert_eq!(a.name, b.name);
    assert_eq!(a.cuisine, b.cuisine);
    assert_eq!(a.price_level, b.price_level);
    assert_eq!(a.accepts_voucher, b.accepts_voucher);
    assert_eq!(a.diet_options, b.diet_options);
    assert_eq!(a.hours, b.hours);
}

#[test]
fn test_forced_format() {
    let file = create_test_file("A | italiana | $", ".dat");
    let dataset = Dataset::load_with(file.path(), Some(DatasetFormat::Pipe)).unwrap();
    assert_eq!(dataset.records[0].price_level, Some(PriceLevel::Budget));

    let err = Dataset::load_with(file.path(), Some(DatasetFormat::Json)).unwrap_err();
    assert!(matches!(err, BairroError::Json(_)));
}

#[test]
fn test_missing_file() {
    let err = Dataset::load("/nonexistent/pinheiros.json").unwrap_err();
    assert!(matches!(err, BairroError::Io { .. }));
}

#[test]
fn test_empty_file_is_empty_dataset() {
    let file = create_test_file("", ".json");
    assert!(Dataset::load(file.path()).unwrap().is_empty());
}

#[test]
fn test_facets() {
    let file = create_test_file(JSON_DATA, ".json");
    let dataset = Dataset::load(file.path()).unwrap();

    assert_eq!(dataset.cuisines(), vec!["boteco", "japonesa", "ramen"]);
    assert_eq!(dataset.diet_options(), vec!["sem glúten", "vegetariano"]);
}

// =============================================================================
// Saving
// =============================================================================

#[test]
fn test_save_and_reload_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("pinheiros.json");

    let dataset = Dataset::from_records(vec![Record::new("Momokuri")
        .with_cuisine(["japonesa"])
        .with_voucher(TriState::No)]);
    dataset.save(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.ends_with("]\n"));
    assert!(written.contains("\"accessibility\": null"));

    let reloaded = Dataset::load(&path).unwrap();
    assert_eq!(reloaded.records, dataset.records);
}

#[test]
fn test_save_pipe() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pinheiros.txt");

    let dataset = Dataset::from_records(vec![Record::new("Pirajá")
        .with_cuisine(["boteco", "brasileira"])
        .with_description("Chope | petiscos\nà tarde")]);
    dataset.save_as(&path, DatasetFormat::Pipe).unwrap();

    let reloaded = Dataset::load(&path).unwrap();
    assert_eq!(reloaded.records[0].name, "Pirajá");
    assert_eq!(reloaded.records[0].cuisine.len(), 2);
    assert_eq!(
        reloaded.records[0].description.as_deref(),
        Some("Chope / petiscos à tarde")
    );
    assert_eq!(to_pipe_string(&dataset.records), fs::read_to_string(&path).unwrap());
}

#[test]
fn test_save_with_history() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pinheiros.json");

    let mut dataset = Dataset::from_records(vec![Record::new("A")]);
    dataset.save_with_history(&path).unwrap();
    assert!(Dataset::list_history(&path).unwrap().is_empty());

    dataset.merge(vec![Record::new("B")]);
    dataset.save_with_history(&path).unwrap();

    let history = Dataset::list_history(&path).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(Dataset::load(&history[0]).unwrap().len(), 1);
    assert_eq!(Dataset::load(&path).unwrap().len(), 2);
}

#[test]
fn test_load_json_with_byte_order_mark() {
    let file = create_test_file(&format!("\u{FEFF}{}", JSON_DATA), ".json");

    let dataset = Dataset::load(file.path()).unwrap();

    assert_eq!(dataset.metadata.format, DatasetFormat::Json);
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records[0].name, "Jojo Ramen");
}

#[test]
fn test_load_json_object_is_rejected() {
    let file = create_test_file(r#"{"name": "Jojo Ramen", "cuisine": "ramen"}"#, ".txt");

    let err = Dataset::load(file.path()).unwrap_err();

    assert!(matches!(err, BairroError::Parse { .. }));
}
