//! Diversity scores.
//!
//! A person scores 1 when they belong to the under-represented side of the
//! chosen dichotomy (non-White, Female) and 0 otherwise. Movies average their
//! cast, directors average their movies. Any score whose inputs are all
//! undefined is itself undefined (`None`).

mod stats;

pub use stats::{actor_stats, director_stats, movie_stats, ActorStats, DirectorStats, MovieStats};

use serde::{Deserialize, Serialize};

use crate::graph::MovieGraph;
use crate::model::{Gender, NodeId, PersonAttributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreKind {
    Race,
    Gender,
}

/// 1 for any known non-White category (Other included), 0 for White.
pub fn racial_score(person: &PersonAttributes) -> Option<f64> {
    person.race.is_white().map(|white| if white { 0.0 } else { 1.0 })
}

pub fn gender_score(person: &PersonAttributes) -> Option<f64> {
    match person.gender {
        Gender::Female => Some(1.0),
        Gender::Male => Some(0.0),
        Gender::Unknown => None,
    }
}

pub fn person_score(person: &PersonAttributes, kind: ScoreKind) -> Option<f64> {
    match kind {
        ScoreKind::Race => racial_score(person),
        ScoreKind::Gender => gender_score(person),
    }
}

/// Mean score over the cast members whose score is defined.
pub fn movie_score(graph: &MovieGraph, kind: ScoreKind, movie: NodeId) -> Option<f64> {
    mean(graph.cast_of(movie)
        .into_iter()
        .filter_map(|a| graph.person(a))
        .filter_map(|p| person_score(p, kind)))
}

/// Mean of the defined movie scores over the movies `director` directed.
pub fn director_score(graph: &MovieGraph, kind: ScoreKind, director: NodeId) -> Option<f64> {
    mean(graph.movies_directed_by(director)
        .into_iter()
        .filter_map(|m| movie_score(graph, kind, m)))
}

/// Mean movie score across every scorable movie in the graph.
pub fn average_movie_score(graph: &MovieGraph, kind: ScoreKind) -> Option<f64> {
    mean(graph.movies().into_iter().filter_map(|m| movie_score(graph, kind, m)))
}

/// Mean director score across every scorable director in the graph.
pub fn average_director_score(graph: &MovieGraph, kind: ScoreKind) -> Option<f64> {
    mean(graph.directors().into_iter().filter_map(|d| director_score(graph, kind, d)))
}

pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
