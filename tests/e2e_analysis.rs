//! End-to-end tests for scoring and structural analyses on built graphs.
//!
//! Tests movie/director scores, concordance, profit correlation, modularity,
//! assortativity, and the real-vs-null baseline report.

use std::collections::HashMap;

use castgraph::analysis::{
    actor_assortativity, actor_modularity, director_actor_concordance,
    diversity_profit_correlation, run_baseline_report, Attribute,
};
use castgraph::diversity::{director_score, movie_score, ScoreKind};
use castgraph::filters::binarize_race;
use castgraph::{
    build_graph, AnalysisConfig, Demographics, Error, Gender, MovieGraph, MovieRecord, NameIndex,
    NullModelConfig, Race,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

fn enrichment(people: &[(&str, Race, Gender)]) -> HashMap<String, Demographics> {
    people.iter()
        .map(|(n, r, g)| (n.to_string(), Demographics::new(*r, *g)))
        .collect()
}

/// Avatar (2009): D1 directs A1 and A2.
fn avatar() -> (MovieGraph, NameIndex) {
    let people = enrichment(&[
        ("D1", Race::White, Gender::Male),
        ("A1", Race::White, Gender::Male),
        ("A2", Race::Black, Gender::Female),
    ]);
    let records = vec![
        MovieRecord::new("Avatar", 2009, "D1")
            .with_actors(["A1", "A2"])
            .with_budget(237_000_000)
            .with_gross(760_505_847),
    ];
    build_graph(records, &people).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// 1. Scores
// ============================================================================

#[test]
fn test_avatar_scores() {
    let (graph, index) = avatar();
    let m1 = index.require("Avatar2009").unwrap();
    let d1 = index.require("D1").unwrap();
    assert_eq!(movie_score(&graph, ScoreKind::Race, m1), Some(0.5));
    assert_eq!(movie_score(&graph, ScoreKind::Gender, m1), Some(0.5));
    assert_eq!(director_score(&graph, ScoreKind::Race, d1), Some(0.5));
}

#[test]
fn test_empty_cast_is_undefined() {
    let (graph, index) = build_graph(
        vec![MovieRecord::new("Silent", 1999, "D")],
        &enrichment(&[("D", Race::White, Gender::Male)]),
    )
    .unwrap();
    let m = index.require("Silent1999").unwrap();
    assert_eq!(movie_score(&graph, ScoreKind::Race, m), None);
    assert_eq!(movie_score(&graph, ScoreKind::Gender, m), None);
    assert_eq!(director_score(&graph, ScoreKind::Race, index.require("D").unwrap()), None);
}

// ============================================================================
// 2. Director-actor concordance
// ============================================================================

#[test]
fn test_unknown_director_contributes_nothing() {
    let people = enrichment(&[
        ("Known", Race::White, Gender::Female),
        ("A", Race::Black, Gender::Female),
        ("B", Race::White, Gender::Male),
    ]);
    let records = vec![
        MovieRecord::new("Counted", 2000, "Known").with_actors(["A", "B"]),
        MovieRecord::new("Skipped", 2001, "Mystery").with_actors(["A", "B"]),
    ];
    let (graph, index) = build_graph(records, &people).unwrap();
    let c = director_actor_concordance(&graph, &graph, &index).unwrap();

    assert_eq!(c.skipped_movies, 1);
    assert_eq!(c.total_pairs, 2);
    assert_eq!(c.same_race_pairs, 1);
    assert_eq!(c.same_gender_pairs, 1);
    assert_eq!(c.same_race_proportion(), Some(0.5));
    assert_eq!(c.same_gender_proportion(), Some(0.5));
}

#[test]
fn test_concordance_across_derived_graphs() {
    let people = enrichment(&[
        ("D", Race::Asian, Gender::Male),
        ("A", Race::Hispanic, Gender::Male),
        ("U", Race::Unknown, Gender::Male),
    ]);
    let records = vec![MovieRecord::new("M", 2000, "D").with_actors(["A", "U"])];
    let (graph, index) = build_graph(records, &people).unwrap();
    let (directors, director_index) = binarize_race(&graph, &index);

    let c = director_actor_concordance(&directors, &graph, &director_index).unwrap();
    assert_eq!(c.total_pairs, 2);
    assert_eq!(c.race_pairs, 1);
    assert_eq!(c.same_race_proportion(), Some(1.0));
    assert_eq!(c.same_gender_proportion(), Some(1.0));
}

// ============================================================================
// 3. Profit correlation
// ============================================================================

#[test]
fn test_zero_budget_movie_excluded() {
    let people = enrichment(&[
        ("W", Race::White, Gender::Male),
        ("B", Race::Black, Gender::Female),
    ]);
    let records = vec![
        MovieRecord::new("Free", 2000, "W").with_actor("B").with_gross(1_000_000),
        MovieRecord::new("Flop", 2001, "W").with_actor("W").with_budget(100).with_gross(50),
        MovieRecord::new("Hit", 2002, "W").with_actor("B").with_budget(100).with_gross(400),
    ];
    let (graph, _) = build_graph(records, &people).unwrap();
    let corr = diversity_profit_correlation(&graph, &graph.movies()).unwrap();

    assert_eq!(corr.excluded_zero_budget, 1);
    assert_eq!(corr.race_sample, 2);
    assert!(close(*corr.race.as_ref().unwrap(), 1.0));
    assert!(close(*corr.gender.as_ref().unwrap(), 1.0));
}

#[test]
fn test_single_movie_correlation_is_empty_sample() {
    let (graph, _) = avatar();
    let corr = diversity_profit_correlation(&graph, &graph.movies()).unwrap();
    assert!(matches!(corr.race, Err(Error::EmptySample(_))));
}

// ============================================================================
// 4. Modularity and assortativity on a built graph
// ============================================================================

#[test]
fn test_segregated_casts_are_assortative() {
    let people = enrichment(&[
        ("W1", Race::White, Gender::Male),
        ("W2", Race::White, Gender::Female),
        ("B1", Race::Black, Gender::Male),
        ("B2", Race::Black, Gender::Female),
    ]);
    let records = vec![
        MovieRecord::new("White Cast", 2000, "D").with_actors(["W1", "W2"]),
        MovieRecord::new("Black Cast", 2001, "D").with_actors(["B1", "B2"]),
    ];
    let (graph, _) = build_graph(records, &people).unwrap();

    assert!(close(actor_modularity(&graph, Attribute::Race).unwrap(), 0.5));
    assert!(close(actor_assortativity(&graph, Attribute::BinaryRace).unwrap(), 1.0));
    // every pair is mixed-gender
    assert!(close(actor_modularity(&graph, Attribute::Gender).unwrap(), -0.5));
    assert!(close(actor_assortativity(&graph, Attribute::Gender).unwrap(), -1.0));
}

// ============================================================================
// 5. Baseline report
// ============================================================================

#[test]
fn test_baseline_report_collects_failures_without_aborting() {
    let (graph, index) = avatar();
    let config = AnalysisConfig {
        null_model: NullModelConfig { seed: Some(7), ..NullModelConfig::default() },
        ..AnalysisConfig::default()
    };
    let report = run_baseline_report(&graph, &index, &config);

    assert_eq!(report.movies.movie_count, 1);
    assert_eq!(report.movies.average_racial_score, Some(0.5));
    assert!(report.concordance.is_ok());
    // one movie: no correlation, identity null keeps the same single cast
    let failures: Vec<String> = report.failures().into_iter().map(|(name, _)| name).collect();
    assert!(failures.contains(&"profit.race".to_string()));
    let null = report.movie_actor_null.as_ref().unwrap();
    assert_eq!(null.movies.average_racial_score, Some(0.5));
    assert_eq!(report.director_movie_null.as_ref().unwrap().director_count, 1);
    // a lone director can only be rewired onto its own movie
    let null_concordance = report.director_movie_null_concordance.as_ref().unwrap();
    assert_eq!(null_concordance, report.concordance.as_ref().unwrap());
    assert_eq!(null_concordance.total_pairs, 2);
    assert!(!failures.contains(&"director_movie_null_concordance".to_string()));
}

#[test]
fn test_baseline_report_compares_concordance_with_null_directors() {
    let people = enrichment(&[
        ("WD", Race::White, Gender::Male),
        ("BD", Race::Black, Gender::Female),
        ("W", Race::White, Gender::Male),
        ("B", Race::Black, Gender::Female),
    ]);
    let records = vec![
        MovieRecord::new("Matched One", 2000, "WD").with_actors(["W"]),
        MovieRecord::new("Matched Two", 2001, "BD").with_actors(["B"]),
    ];
    let (graph, index) = build_graph(records, &people).unwrap();
    let config = AnalysisConfig {
        null_model: NullModelConfig { seed: Some(11), ..NullModelConfig::default() },
        ..AnalysisConfig::default()
    };
    let report = run_baseline_report(&graph, &index, &config);

    let real = report.concordance.as_ref().unwrap();
    assert_eq!(real.same_race_proportion(), Some(1.0));
    let null = report.director_movie_null_concordance.as_ref().unwrap();
    assert_eq!(null.total_pairs, real.total_pairs);
    assert_eq!(null.skipped_movies, 0);
    // each director is rewired onto one movie, so either both match or neither does
    let same = null.same_race_proportion().unwrap();
    assert!(same == 0.0 || same == 1.0);
    assert_eq!(null.same_gender_proportion(), Some(same));
}
