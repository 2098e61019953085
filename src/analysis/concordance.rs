use serde::{Deserialize, Serialize};

use crate::graph::{MovieGraph, NameIndex};
use crate::{Error, Result};

/// Director/cast agreement counts. A pair is one (director, cast member)
/// edge pair of a movie whose director has known race and gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concordance {
    pub same_race_pairs: usize,
    /// Pairs where the cast member's race is known.
    pub race_pairs: usize,
    pub same_gender_pairs: usize,
    /// Pairs where the cast member's gender is known.
    pub gender_pairs: usize,
    pub total_pairs: usize,
    /// Movies left out because their director is missing or only partly known.
    pub skipped_movies: usize,
}

impl Concordance {
    /// Share of pairs on the same side of White / Non-White.
    pub fn same_race_proportion(&self) -> Option<f64> {
        ratio(self.same_race_pairs, self.race_pairs)
    }

    pub fn same_gender_proportion(&self) -> Option<f64> {
        ratio(self.same_gender_pairs, self.gender_pairs)
    }
}

fn ratio(num: usize, den: usize) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

/// Compare each movie's director with its cast.
///
/// Casts come from `actor_graph`; directors come from `director_graph`, with
/// movies matched through `director_index` by unique key so the two graphs may
/// be different derivations (say, a binarized director graph and a filtered
/// actor graph).
pub fn director_actor_concordance(
    director_graph: &MovieGraph,
    actor_graph: &MovieGraph,
    director_index: &NameIndex,
) -> Result<Concordance> {
    let mut out = Concordance::default();

    for movie in actor_graph.movies() {
        let Some(attrs) = actor_graph.movie(movie) else { continue };
        let key = attrs.unique_id();
        let twin = director_index.require(&key)?;
        if director_graph.movie(twin).is_none() {
            return Err(Error::InconsistentIndex(format!(
                "{key:?} maps to node {twin}, which is not a movie"
            )));
        }

        let director = director_graph.director_of(twin).and_then(|d| director_graph.person(d));
        let Some(director) = director.filter(|d| d.demographics().is_complete()) else {
            out.skipped_movies += 1;
            continue;
        };

        for member in actor_graph.cast_of(movie) {
            let Some(actor) = actor_graph.person(member) else { continue };
            out.total_pairs += 1;
            if let Some(white) = actor.race.is_white() {
                out.race_pairs += 1;
                if director.race.is_white() == Some(white) {
                    out.same_race_pairs += 1;
                }
            }
            if actor.gender.is_known() {
                out.gender_pairs += 1;
                if actor.gender == director.gender {
                    out.same_gender_pairs += 1;
                }
            }
        }
    }

    tracing::debug!(pairs = out.total_pairs, skipped = out.skipped_movies, "director-actor concordance");
    Ok(out)
}
