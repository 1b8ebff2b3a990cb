//! End-to-end pipeline test: table rows → records → cleaning/tokenization →
//! TF-IDF recommendation.

use projmatch_pdf::{BookletExtractor, TableRow};
use projmatch_recommend::recommend;
use projmatch_text::tokenize_records;

fn row(cells: &[&str]) -> TableRow {
    cells.iter().map(|c| c.to_string()).collect()
}

fn booklet_rows() -> Vec<TableRow> {
    vec![
        row(&["Project No & Title", "A1 Decoding the gut immune landscape"]),
        row(&["Primary Theme", "Immunology"]),
        row(&["Supervisors", "Dr Ada Lovell, Prof Brian Chu"]),
        row(&["Project Description", "Single-cell profiling of immune cells in the human gut."]),
        row(&["We will map immune cell states across donors and tissue regions."]),
        row(&["Reasonable Expected Outcome", "An annotated cell atlas."]),
        row(&["Project No & Title", "A2 Viral dynamics models for pandemics"]),
        row(&["Primary Theme", "Mathematical biology"]),
        row(&["Supervisors", "Dr Carol Deng"]),
        row(&["Project Description", "Developing mathematical models of viral spread"]),
        row(&["during pandemics, fitted to surveillance data."]),
        row(&["Reasonable Expected Outcome", "Calibrated epidemic models."]),
        row(&["Project No & Title", "A3 Cytoskeletal organisation of membranes"]),
        row(&["Primary Theme", "Cell biology"]),
        row(&["Supervisors", "Prof Dana Els"]),
        row(&["Project Description", "Which cytoskeletal proteins organise the membrane?"]),
        row(&["Reasonable Expected Outcome", "A protein interaction map."]),
    ]
}

#[test]
fn rows_to_recommendations() {
    let extractor = BookletExtractor::new();
    let outcome = extractor.extract_from_rows(&booklet_rows());
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.stats.records, 3);

    let (tokenized, report) = tokenize_records(outcome.records);
    assert_eq!(tokenized.len(), 3);
    assert_eq!(report.dropped_rows, 0);
    assert!(tokenized.iter().all(|t| !t.tokens.is_empty()));

    let query = "I am interested in studying the pandemic using mathematical models \
                 of how viruses spread through a population over time";
    let results = recommend(query, &tokenized, 10, 15).unwrap();

    assert!(!results.is_empty());
    assert_eq!(results[0].title, "A2 Viral dynamics models for pandemics");
    assert_eq!(results[0].theme, "Mathematical biology");
    assert_eq!(results[0].supervisors, "Dr Carol Deng");
    assert!(results[0].score > 0.0);
}

#[test]
fn multi_row_description_feeds_tokens() {
    let extractor = BookletExtractor::new();
    let outcome = extractor.extract_from_rows(&booklet_rows());
    let pandemic = &outcome.records[1];
    assert!(pandemic.description.contains("surveillance data"));

    let (tokenized, _) = tokenize_records(outcome.records);
    assert!(tokenized[1].tokens.contains("surveillance"));
}

#[test]
fn unrelated_query_matches_nothing() {
    let extractor = BookletExtractor::new();
    let outcome = extractor.extract_from_rows(&booklet_rows());
    let (tokenized, _) = tokenize_records(outcome.records);

    let query = "I would like to work on quantum gravity, black holes, string theory \
                 and the large scale structure of spacetime itself";
    let results = recommend(query, &tokenized, 10, 15).unwrap();
    assert!(results.is_empty());
}
