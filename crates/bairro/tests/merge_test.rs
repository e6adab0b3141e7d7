//! Integration tests for the merge engine and text imports.

use bairro::{
    merge_records, Dataset, Guide, IgnoreReason, ImportMode, MergeField, MockProvider,
    PriceLevel, Record, RecordSource, TextBlockParser, TriState,
};

fn curated() -> Vec<Record> {
    vec![
        Record::new("Gael Cozinha Mestiça")
            .with_cuisine(["brasileira"])
            .with_price(PriceLevel::Upscale)
            .with_hours("12h-15h")
            .with_source(RecordSource::Manual),
        Record::new("Pirajá")
            .with_cuisine(["boteco"])
            .with_voucher(TriState::No)
            .with_source(RecordSource::Manual),
    ]
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_new_names_are_added_in_order() {
    let mut data = curated();
    let report = merge_records(
        &mut data,
        vec![Record::new("Momokuri"), Record::new("Jojo Ramen")],
    );

    assert_eq!(report.added, vec!["Momokuri", "Jojo Ramen"]);
    assert_eq!(data.len(), 4);
    assert_eq!(data[3].name, "Jojo Ramen");
    assert!(data[3].updated_at.is_some());
}

#[test]
fn test_match_is_case_insensitive_and_trimmed() {
    let mut data = curated();
    let report = merge_records(
        &mut data,
        vec![Record::new("  PIRAJÁ ").with_address("Av. Brigadeiro Faria Lima, 64")],
    );

    assert!(report.added.is_empty());
    assert_eq!(report.updated.len(), 1);
    assert_eq!(report.updated[0].name, "Pirajá");
    assert_eq!(report.updated[0].fields, vec![MergeField::Address]);
    assert_eq!(data.len(), 2);
    assert_eq!(data[1].name, "Pirajá");
}

#[test]
fn test_existing_values_are_never_overwritten() {
    let mut data = curated();
    let incoming = Record::new("Gael Cozinha Mestiça")
        .with_price(PriceLevel::Budget)
        .with_hours("0h-24h")
        .with_cuisine(["fusion"])
        .with_voucher(TriState::Yes);

    let report = merge_records(&mut data, vec![incoming]);

    let gael = &data[0];
    assert_eq!(gael.price_level, Some(PriceLevel::Upscale));
    assert_eq!(gael.hours.as_deref(), Some("12h-15h"));
    assert!(gael.has_cuisine("brasileira"));
    assert!(!gael.has_cuisine("fusion"));
    assert_eq!(gael.accepts_voucher, TriState::Yes);
    assert_eq!(report.updated[0].fields, vec![MergeField::AcceptsVoucher]);
}

#[test]
fn test_known_no_is_not_blank() {
    let mut data = curated();
    let report = merge_records(
        &mut data,
        vec![Record::new("Pirajá").with_voucher(TriState::Yes)],
    );

    assert_eq!(data[1].accepts_voucher, TriState::No);
    assert_eq!(report.ignored.len(), 1);
    assert_eq!(report.ignored[0].reason, IgnoreReason::NoNewData);
}

#[test]
fn test_nameless_records_are_ignored() {
    let mut data = curated();
    let report = merge_records(&mut data, vec![Record::default().with_hours("18h-23h")]);

    assert_eq!(data.len(), 2);
    assert_eq!(report.ignored[0].reason, IgnoreReason::MissingName);
    assert!(!report.has_changes());
}

#[test]
fn test_duplicate_names_within_a_batch() {
    let mut data = Vec::new();
    let report = merge_records(
        &mut data,
        vec![
            Record::new("Momokuri"),
            Record::new("momokuri").with_hours("19h-23h"),
            Record::new("MOMOKURI").with_hours("18h"),
        ],
    );

    assert_eq!(data.len(), 1);
    assert_eq!(data[0].hours.as_deref(), Some("19h-23h"));
    assert_eq!(report.summary(), "1 added, 1 updated, 1 ignored");
}

#[test]
fn test_merge_is_idempotent() {
    let mut data = curated();
    let batch = vec![
        Record::new("Pirajá").with_hours("12h-0h"),
        Record::new("Momokuri").with_cuisine(["japonesa"]),
    ];

    let first = merge_records(&mut data, batch.clone());
    assert!(first.has_changes());
    let snapshot = data.clone();

    let second = merge_records(&mut data, batch);
    assert!(!second.has_changes());
    assert_eq!(second.ignored.len(), 2);
    assert_eq!(data, snapshot);
}

// =============================================================================
// Imports
// =============================================================================

const NOTES: &str = "\
Pirajá
Endereço: Av. Brigadeiro Faria Lima, 64
Acessibilidade: sim

Nome: Jojo Ramen
Culinária: japonesa; ramen
Preço: $$
Destaques:
- Tonkotsu

Preço: $
";

#[test]
fn test_offline_import_merges_parsed_blocks() {
    let mut dataset = Dataset::from_records(curated());
    let report = Guide::new()
        .import_text(&mut dataset, NOTES, ImportMode::Offline)
        .unwrap();

    assert_eq!(report.added, vec!["Jojo Ramen"]);
    assert_eq!(report.updated.len(), 1);
    assert_eq!(
        report.updated[0].fields,
        vec![MergeField::Address, MergeField::Accessibility]
    );
    assert_eq!(report.ignored[0].reason, IgnoreReason::MissingName);

    let jojo = dataset.find("jojo ramen").unwrap();
    assert_eq!(jojo.source, Some(RecordSource::OfflineImport));
    assert_eq!(jojo.highlights, vec!["Tonkotsu"]);
    assert_eq!(dataset.metadata.record_count, 3);
}

#[test]
fn test_model_import_with_mock_provider() {
    let mut dataset = Dataset::from_records(curated());
    let guide = Guide::new().with_llm(MockProvider::new());

    let report = guide
        .import_text(&mut dataset, NOTES, ImportMode::Model)
        .unwrap();

    assert_eq!(report.summary(), "1 added, 1 updated, 1 ignored");
    let jojo = dataset.find("Jojo Ramen").unwrap();
    assert_eq!(jojo.source, Some(RecordSource::ModelImport));
}

#[test]
fn test_parser_and_merge_agree_on_names() {
    let parsed = TextBlockParser::new().parse("## **Gael Cozinha Mestiça**\nBairro: Pinheiros");
    let mut data = curated();
    let report = merge_records(&mut data, parsed);

    assert_eq!(report.updated[0].fields, vec![MergeField::Neighborhood]);
    assert_eq!(data[0].neighborhood.as_deref(), Some("Pinheiros"));
}
