//! End-to-end tests for derived graphs: unknown removal, race binarization,
//! co-appearance projection, and the longitudinal cleanup.

use std::collections::{BTreeSet, HashMap};

use castgraph::filters::{
    actor_co_graph, binarize_race, prepare_longitudinal, remove_unknown_demographics,
};
use castgraph::{build_graph, Demographics, Gender, MovieGraph, MovieRecord, NameIndex, Race, Role};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ============================================================================
// Helper: build a graph where each named person has the given demographics
// ============================================================================

fn build(records: Vec<MovieRecord>, people: &[(&str, Race, Gender)]) -> (MovieGraph, NameIndex) {
    let map: HashMap<String, Demographics> = people.iter()
        .map(|(n, r, g)| (n.to_string(), Demographics::new(*r, *g)))
        .collect();
    build_graph(records, &map).unwrap()
}

fn assert_lockstep(graph: &MovieGraph, index: &NameIndex) {
    index.verify(graph).unwrap();
    assert_eq!(index.len(), graph.node_count());
    for node in graph.nodes() {
        assert_eq!(index.get(&node.index_key()), Some(node.id));
    }
}

// ============================================================================
// 1. Unknown demographics
// ============================================================================

#[test]
fn test_unknown_actor_removed_with_edges() {
    let (graph, index) = build(
        vec![MovieRecord::new("M1", 2000, "D").with_actors(["A", "B"])],
        &[("D", Race::White, Gender::Male), ("A", Race::Black, Gender::Female), ("B", Race::Unknown, Gender::Male)],
    );
    let (filtered, filtered_index) = remove_unknown_demographics(&graph, &index);

    assert_lockstep(&filtered, &filtered_index);
    assert!(filtered_index.get("B").is_none());
    let m1 = filtered_index.require("M12000").unwrap();
    assert_eq!(filtered.cast_of(m1), vec![filtered_index.require("A").unwrap()]);
    // source graph untouched
    assert_eq!(graph.node_count(), 4);
}

#[test]
fn test_unknown_director_kept() {
    let (graph, index) = build(
        vec![MovieRecord::new("M1", 2000, "D").with_actor("A")],
        &[("A", Race::Asian, Gender::Male)],
    );
    let (filtered, _) = remove_unknown_demographics(&graph, &index);
    let d = index.require("D").unwrap();
    assert_eq!(filtered.person(d).unwrap().role, Role::Director);
    assert_eq!(filtered.node_count(), 3);
}

// ============================================================================
// 2. Race binarization
// ============================================================================

#[test]
fn test_binarize_leaves_two_categories() {
    let (graph, index) = build(
        vec![MovieRecord::new("M1", 2000, "W").with_actors(["B", "H", "U"])],
        &[
            ("W", Race::White, Gender::Male),
            ("B", Race::Black, Gender::Female),
            ("H", Race::Hispanic, Gender::Male),
            ("U", Race::Unknown, Gender::Female),
        ],
    );
    let (binary, binary_index) = binarize_race(&graph, &index);

    assert_lockstep(&binary, &binary_index);
    assert!(binary_index.get("U").is_none());
    let races: BTreeSet<Race> = binary.people()
        .into_iter()
        .map(|p| binary.person(p).unwrap().race)
        .collect();
    assert_eq!(races, BTreeSet::from([Race::White, Race::NonWhite]));
    assert_eq!(binary.person(binary_index.require("H").unwrap()).unwrap().race, Race::NonWhite);
}

// ============================================================================
// 3. Co-appearance projection
// ============================================================================

#[test]
fn test_co_graph_counts_shared_movies() {
    let (graph, index) = build(
        vec![
            MovieRecord::new("M1", 2000, "D").with_actors(["A", "B", "C"]),
            MovieRecord::new("M2", 2001, "D").with_actors(["A", "B"]),
        ],
        &[],
    );
    let co = actor_co_graph(&graph);
    let a = index.require("A").unwrap();
    let b = index.require("B").unwrap();
    let c = index.require("C").unwrap();
    assert_eq!(co.node_count(), 3);
    assert_eq!(co.edge_count(), 4);
    assert_eq!(co.multiplicity(a, b), 2);

    let weighted = co.collapse();
    assert_eq!(weighted.edge_count(), 3);
    assert_eq!(weighted.weight(b, a), 2.0);
    assert_eq!(weighted.weight(a, c), 1.0);
    assert_eq!(weighted.total_weight(), 4.0);
}

// ============================================================================
// 4. Longitudinal cleanup
// ============================================================================

#[test]
fn test_prepare_longitudinal_drops_early_movies_and_orphans() {
    let (graph, index) = build(
        vec![
            MovieRecord::new("Old", 1975, "OldDirector").with_actor("A"),
            MovieRecord::new("New", 1990, "D").with_actor("A"),
        ],
        &[("A", Race::White, Gender::Female)],
    );
    let (clean, clean_index) = prepare_longitudinal(&graph, &index, 1980);
    assert_lockstep(&clean, &clean_index);
    assert!(clean_index.get("Old1975").is_none());
    assert!(clean_index.get("OldDirector").is_none());
    assert!(clean_index.contains_key("A"));
    assert_eq!(clean.node_count(), 3);
}

// ============================================================================
// 5. Property: lockstep after unknown removal
// ============================================================================

fn race_strategy() -> impl Strategy<Value = Race> {
    prop_oneof![Just(Race::White), Just(Race::Black), Just(Race::Asian), Just(Race::Unknown)]
}

fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Unknown)]
}

proptest! {
    #[test]
    fn prop_filter_lockstep(
        demographics in proptest::collection::vec((race_strategy(), gender_strategy()), 6),
        casts in proptest::collection::vec((0usize..6, proptest::collection::vec(0usize..6, 0..4)), 1..8),
    ) {
        let names: Vec<String> = (0..6).map(|i| format!("person{i}")).collect();
        let people: Vec<(&str, Race, Gender)> = names.iter()
            .zip(&demographics)
            .map(|(n, (r, g))| (n.as_str(), *r, *g))
            .collect();
        let records: Vec<MovieRecord> = casts.iter()
            .enumerate()
            .map(|(i, (director, cast))| {
                MovieRecord::new(format!("movie{i}"), 2000, names[*director].clone())
                    .with_actors(cast.iter().map(|a| names[*a].clone()))
            })
            .collect();
        let (graph, index) = build(records, &people);
        let (filtered, filtered_index) = remove_unknown_demographics(&graph, &index);

        prop_assert!(filtered_index.verify(&filtered).is_ok());
        prop_assert_eq!(filtered_index.len(), filtered.node_count());
        for actor in filtered.actors() {
            prop_assert!(filtered.person(actor).unwrap().demographics().is_complete());
        }
    }
}
