//! Population statistics over the whole graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{director_score, mean, movie_score, person_score, ScoreKind};
use crate::graph::MovieGraph;
use crate::model::{EdgeKind, Gender, NodeId, Race};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorStats {
    pub actor_count: usize,
    pub by_race: BTreeMap<Race, usize>,
    pub by_gender: BTreeMap<Gender, usize>,
    pub average_racial_score: Option<f64>,
    pub average_gender_score: Option<f64>,
    /// Mean number of movies an actor appears in.
    pub average_appearances: Option<f64>,
    pub average_appearances_by_race: BTreeMap<Race, f64>,
    pub average_appearances_by_gender: BTreeMap<Gender, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieStats {
    pub movie_count: usize,
    pub empty_cast_count: usize,
    pub average_cast_size: Option<f64>,
    pub average_racial_score: Option<f64>,
    pub average_gender_score: Option<f64>,
    pub all_white: usize,
    pub all_male: usize,
    pub all_female: usize,
    /// At least half of the gender-known cast is female.
    pub half_female: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorStats {
    pub director_count: usize,
    pub by_race: BTreeMap<Race, usize>,
    pub by_gender: BTreeMap<Gender, usize>,
    pub average_racial_score: Option<f64>,
    pub average_gender_score: Option<f64>,
    pub average_movies_directed: Option<f64>,
    pub average_movies_by_race: BTreeMap<Race, f64>,
    pub average_movies_by_gender: BTreeMap<Gender, f64>,
}

/// Running sum per category, averaged at the end.
struct Segmented<K> {
    sums: BTreeMap<K, (usize, usize)>,
}

impl<K> Default for Segmented<K> {
    fn default() -> Self {
        Self { sums: BTreeMap::new() }
    }
}

impl<K: Ord + Copy> Segmented<K> {
    fn add(&mut self, key: K, value: usize) {
        let slot = self.sums.entry(key).or_insert((0, 0));
        slot.0 += value;
        slot.1 += 1;
    }

    fn counts(&self) -> BTreeMap<K, usize> {
        self.sums.iter().map(|(k, (_, n))| (*k, *n)).collect()
    }

    fn averages(&self) -> BTreeMap<K, f64> {
        self.sums.iter().map(|(k, (s, n))| (*k, *s as f64 / *n as f64)).collect()
    }
}

pub fn actor_stats(graph: &MovieGraph) -> ActorStats {
    let actors = graph.actors();
    let mut by_race = Segmented::default();
    let mut by_gender = Segmented::default();
    let mut appearances = Vec::with_capacity(actors.len());

    for &id in &actors {
        let Some(person) = graph.person(id) else { continue };
        let n = graph.in_degree(id, EdgeKind::Casts);
        by_race.add(person.race, n);
        by_gender.add(person.gender, n);
        appearances.push(n as f64);
    }

    let people: Vec<_> = actors.iter().filter_map(|&id| graph.person(id)).collect();
    ActorStats {
        actor_count: actors.len(),
        by_race: by_race.counts(),
        by_gender: by_gender.counts(),
        average_racial_score: mean(people.iter().filter_map(|p| person_score(p, ScoreKind::Race))),
        average_gender_score: mean(people.iter().filter_map(|p| person_score(p, ScoreKind::Gender))),
        average_appearances: mean(appearances),
        average_appearances_by_race: by_race.averages(),
        average_appearances_by_gender: by_gender.averages(),
    }
}

pub fn movie_stats(graph: &MovieGraph) -> MovieStats {
    let movies = graph.movies();
    let mut stats = MovieStats { movie_count: movies.len(), ..MovieStats::default() };
    let mut race_scores = Vec::new();
    let mut gender_scores = Vec::new();

    for &m in &movies {
        if graph.cast_of(m).is_empty() {
            stats.empty_cast_count += 1;
        }
        if let Some(race) = movie_score(graph, ScoreKind::Race, m) {
            if race == 0.0 {
                stats.all_white += 1;
            }
            race_scores.push(race);
        }
        if let Some(gender) = movie_score(graph, ScoreKind::Gender, m) {
            if gender == 0.0 {
                stats.all_male += 1;
            }
            if gender == 1.0 {
                stats.all_female += 1;
            }
            if gender >= 0.5 {
                stats.half_female += 1;
            }
            gender_scores.push(gender);
        }
    }

    stats.average_cast_size = mean(movies.iter().map(|&m| graph.cast_of(m).len() as f64));
    stats.average_racial_score = mean(race_scores);
    stats.average_gender_score = mean(gender_scores);
    stats
}

pub fn director_stats(graph: &MovieGraph) -> DirectorStats {
    let directors: Vec<NodeId> = graph.directors();
    let mut by_race = Segmented::default();
    let mut by_gender = Segmented::default();
    let mut directed = Vec::with_capacity(directors.len());

    for &id in &directors {
        let Some(person) = graph.person(id) else { continue };
        let n = graph.movies_directed_by(id).len();
        by_race.add(person.race, n);
        by_gender.add(person.gender, n);
        directed.push(n as f64);
    }

    DirectorStats {
        director_count: directors.len(),
        by_race: by_race.counts(),
        by_gender: by_gender.counts(),
        average_racial_score: mean(directors.iter().filter_map(|&d| director_score(graph, ScoreKind::Race, d))),
        average_gender_score: mean(directors.iter().filter_map(|&d| director_score(graph, ScoreKind::Gender, d))),
        average_movies_directed: mean(directed),
        average_movies_by_race: by_race.averages(),
        average_movies_by_gender: by_gender.averages(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use pretty_assertions::assert_eq;

    fn add_person(g: &mut MovieGraph, name: &str, role: Role, race: Race, gender: Gender) -> NodeId {
        g.add_node(NodeAttributes::Person(PersonAttributes::new(name, role, Demographics::new(race, gender))))
    }

    #[test]
    fn test_empty_graph_has_undefined_averages() {
        let g = MovieGraph::new();
        assert_eq!(actor_stats(&g), ActorStats::default());
        assert_eq!(movie_stats(&g), MovieStats::default());
        assert_eq!(director_stats(&g), DirectorStats::default());
    }

    #[test]
    fn test_homogeneous_movie_counts() {
        let mut g = MovieGraph::new();
        let d = add_person(&mut g, "D", Role::Director, Race::Black, Gender::Female);
        let men = g.add_node(NodeAttributes::Movie(MovieAttributes::new("Men", 2000)));
        let mixed = g.add_node(NodeAttributes::Movie(MovieAttributes::new("Mixed", 2001)));
        let empty = g.add_node(NodeAttributes::Movie(MovieAttributes::new("Empty", 2002)));
        let a = add_person(&mut g, "A", Role::Actor, Race::White, Gender::Male);
        let b = add_person(&mut g, "B", Role::Actor, Race::Hispanic, Gender::Female);
        for m in [men, mixed, empty] {
            g.add_edge(d, m, EdgeKind::Directs).unwrap();
        }
        g.add_edge(men, a, EdgeKind::Casts).unwrap();
        g.add_edge(mixed, a, EdgeKind::Casts).unwrap();
        g.add_edge(mixed, b, EdgeKind::Casts).unwrap();

        let stats = movie_stats(&g);
        assert_eq!(stats.movie_count, 3);
        assert_eq!(stats.empty_cast_count, 1);
        assert_eq!(stats.all_white, 1);
        assert_eq!(stats.all_male, 1);
        assert_eq!(stats.all_female, 0);
        assert_eq!(stats.half_female, 1);
        assert_eq!(stats.average_cast_size, Some(1.0));
        assert_eq!(stats.average_gender_score, Some(0.25));

        let actors = actor_stats(&g);
        assert_eq!(actors.actor_count, 2);
        assert_eq!(actors.average_appearances, Some(1.5));
        assert_eq!(actors.average_appearances_by_gender.get(&Gender::Male), Some(&2.0));
        assert_eq!(actors.by_race.get(&Race::Hispanic), Some(&1));

        let directors = director_stats(&g);
        assert_eq!(directors.director_count, 1);
        assert_eq!(directors.average_movies_directed, Some(3.0));
        assert_eq!(directors.average_racial_score, Some(0.25));
    }
}
