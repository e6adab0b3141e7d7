//! Integration tests for free-text lexical search.

use bairro::search::{lexical_score, tokenize, DEFAULT_TOP_K};
use bairro::{search_records, Dataset, Guide, PriceLevel, Record};

fn pinheiros() -> Vec<Record> {
    vec![
        Record::new("Jojo Ramen")
            .with_cuisine(["japonesa", "ramen"])
            .with_price(PriceLevel::Moderate)
            .with_address("Rua Doutor Melo Alves, 221")
            .with_highlights(["Tonkotsu cremoso", "Gyoza"]),
        Record::new("Momokuri")
            .with_cuisine(["japonesa"])
            .with_description("Balcão pequeno, ramen de frango às quartas."),
        Record::new("Pirajá")
            .with_cuisine(["boteco"])
            .with_neighborhood("Pinheiros")
            .with_highlights(["Coxinha de frango"]),
        Record::new("Banana Verde")
            .with_cuisine(["vegetariana"])
            .with_hours("12h-15h"),
        Record::new("Arlete Bar e Mercearia").with_cuisine(["boteco"]),
        Record::new("Gael Cozinha Mestiça").with_price(PriceLevel::Upscale),
    ]
}

fn names(results: &[bairro::ScoredRecord]) -> Vec<&str> {
    results.iter().map(|r| r.name()).collect()
}

#[test]
fn test_tokenize_splits_on_punctuation_and_keeps_accents() {
    assert_eq!(
        tokenize("Onde tem RAMEN, coxinha e pão-de-queijo?"),
        vec!["onde", "tem", "ramen", "coxinha", "e", "pão", "de", "queijo"]
    );
    assert!(tokenize("  ?!  ").is_empty());
}

#[test]
fn test_name_match_outranks_description_match() {
    let data = pinheiros();
    let results = search_records(&data, "ramen", 5);

    // Jojo: blob + name = 3; Momokuri: blob only = 1
    assert_eq!(names(&results), vec!["Jojo Ramen", "Momokuri"]);
    assert_eq!(results[0].score, 3);
    assert_eq!(results[1].score, 1);
}

#[test]
fn test_highlight_bonus() {
    let data = pinheiros();
    let jojo = &data[0];

    let tokens = tokenize("gyoza");
    assert_eq!(lexical_score(jojo, &tokens), 2);

    let results = search_records(&data, "frango", 5);
    // Pirajá has it in a highlight (2), Momokuri in the description (1)
    assert_eq!(names(&results), vec!["Pirajá", "Momokuri"]);
}

#[test]
fn test_multiple_tokens_accumulate() {
    let data = pinheiros();
    let results = search_records(&data, "boteco pinheiros", 5);

    assert_eq!(names(&results), vec!["Pirajá", "Arlete Bar e Mercearia"]);
    assert_eq!(results[0].score, 2);
    assert_eq!(results[1].score, 1);
}

#[test]
fn test_ties_keep_dataset_order() {
    let data = pinheiros();
    let results = search_records(&data, "japonesa", 5);

    assert_eq!(names(&results), vec!["Jojo Ramen", "Momokuri"]);
    assert_eq!(results[0].score, results[1].score);
}

#[test]
fn test_price_symbol_is_searchable() {
    let data = pinheiros();
    // "$" is not alphanumeric, so price only matters through other words
    assert!(tokenize("$$$").is_empty());
    let results = search_records(&data, "12h", 5);
    assert_eq!(names(&results), vec!["Banana Verde"]);
}

#[test]
fn test_no_match_falls_back_to_first_k() {
    let data = pinheiros();
    let results = search_records(&data, "churrascaria", 3);

    assert_eq!(
        names(&results),
        vec!["Jojo Ramen", "Momokuri", "Pirajá"]
    );
    assert!(results.iter().all(|r| r.score == 0));
}

#[test]
fn test_empty_query_falls_back_to_first_k() {
    let data = pinheiros();
    assert_eq!(search_records(&data, "", 2).len(), 2);
    assert_eq!(search_records(&data, "!!!", 10).len(), data.len());
}

#[test]
fn test_results_capped_at_k() {
    let data = pinheiros();
    assert_eq!(search_records(&data, "a", 4).len(), 4);
}

#[test]
fn test_empty_dataset() {
    assert!(search_records(&[], "ramen", 5).is_empty());
}

#[test]
fn test_guide_search_uses_configured_top_k() {
    let dataset = Dataset::from_records(pinheiros());
    let results = Guide::new().search(&dataset, "zzz");
    assert_eq!(results.len(), DEFAULT_TOP_K);
}
