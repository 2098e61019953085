//! Real-vs-null baseline run.

use super::{
    actor_assortativity, actor_modularity, diversity_profit_correlation,
    director_actor_concordance, Attribute, Concordance, ProfitCorrelation,
};
use crate::config::AnalysisConfig;
use crate::diversity::{actor_stats, director_stats, movie_stats, ActorStats, DirectorStats, MovieStats};
use crate::graph::{MovieGraph, NameIndex};
use crate::null_model::NullModelGenerator;
use crate::{Error, Result};

/// One statistic per partition attribute.
#[derive(Debug)]
pub struct PerAttribute {
    pub race: Result<f64>,
    pub binary_race: Result<f64>,
    pub gender: Result<f64>,
}

impl PerAttribute {
    fn compute(statistic: &'static str, f: impl Fn(Attribute) -> Result<f64>) -> Self {
        let run = |attribute: Attribute| logged(statistic, attribute.label(), f(attribute));
        Self {
            race: run(Attribute::Race),
            binary_race: run(Attribute::BinaryRace),
            gender: run(Attribute::Gender),
        }
    }

    pub fn get(&self, attribute: Attribute) -> &Result<f64> {
        match attribute {
            Attribute::Race => &self.race,
            Attribute::BinaryRace => &self.binary_race,
            Attribute::Gender => &self.gender,
        }
    }
}

/// Statistics of the movie↔actor null graph.
#[derive(Debug)]
pub struct NullBaseline {
    pub movies: MovieStats,
    pub modularity: PerAttribute,
    pub assortativity: PerAttribute,
}

#[derive(Debug)]
pub struct AnalysisReport {
    pub actors: ActorStats,
    pub movies: MovieStats,
    pub directors: DirectorStats,
    pub modularity: PerAttribute,
    pub assortativity: PerAttribute,
    pub concordance: Result<Concordance>,
    pub profit: Result<ProfitCorrelation>,
    pub movie_actor_null: Result<NullBaseline>,
    /// Director statistics of the director↔movie null graph.
    pub director_movie_null: Result<DirectorStats>,
    /// Concordance of the null graph's directors with the real casts.
    pub director_movie_null_concordance: Result<Concordance>,
}

impl AnalysisReport {
    /// Every statistic that could not be computed, by name.
    pub fn failures(&self) -> Vec<(String, &Error)> {
        let mut out = Vec::new();
        attribute_failures(&mut out, "modularity", &self.modularity);
        attribute_failures(&mut out, "assortativity", &self.assortativity);
        if let Ok(null) = &self.movie_actor_null {
            attribute_failures(&mut out, "movie_actor_null.modularity", &null.modularity);
            attribute_failures(&mut out, "movie_actor_null.assortativity", &null.assortativity);
        }

        if let Err(e) = &self.concordance {
            out.push(("concordance".into(), e));
        }
        match &self.profit {
            Ok(p) => {
                if let Err(e) = &p.race {
                    out.push(("profit.race".into(), e));
                }
                if let Err(e) = &p.gender {
                    out.push(("profit.gender".into(), e));
                }
            }
            Err(e) => out.push(("profit".into(), e)),
        }
        if let Err(e) = &self.movie_actor_null {
            out.push(("movie_actor_null".into(), e));
        }
        if let Err(e) = &self.director_movie_null {
            out.push(("director_movie_null".into(), e));
        }
        if let Err(e) = &self.director_movie_null_concordance {
            out.push(("director_movie_null_concordance".into(), e));
        }
        out
    }
}

fn attribute_failures<'a>(out: &mut Vec<(String, &'a Error)>, prefix: &str, stats: &'a PerAttribute) {
    for attribute in Attribute::ALL {
        if let Err(e) = stats.get(attribute) {
            out.push((format!("{prefix}.{attribute}"), e));
        }
    }
}

fn logged<T>(statistic: &'static str, detail: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::warn!(
            statistic,
            detail,
            undefined = e.is_undefined(),
            error = %e,
            "statistic could not be computed"
        );
    }
    result
}

/// Run every analysis on the real graph and on both null models. One failing
/// statistic never prevents the others.
pub fn run_baseline_report(graph: &MovieGraph, index: &NameIndex, config: &AnalysisConfig) -> AnalysisReport {
    let mut generator = NullModelGenerator::new(config.null_model.clone());

    let movies = graph.movies();
    let movie_actor_null = logged("movie_actor_null", "generate", generator.movie_actor(graph))
        .map(|null| NullBaseline {
            movies: movie_stats(&null),
            modularity: PerAttribute::compute("null_modularity", |a| actor_modularity(&null, a)),
            assortativity: PerAttribute::compute("null_assortativity", |a| actor_assortativity(&null, a)),
        });
    let (director_movie_null, director_movie_null_concordance) =
        match logged("director_movie_null", "generate", generator.director_movie(graph)) {
            Ok(null) => {
                let concordance = NameIndex::from_graph(&null)
                    .and_then(|null_index| director_actor_concordance(&null, graph, &null_index));
                (Ok(director_stats(&null)), logged("concordance", "director_movie_null", concordance))
            }
            Err(e) => {
                let skipped = Err(Error::NotFound(format!("director↔movie null graph: {e}")));
                (Err(e), skipped)
            }
        };

    let report = AnalysisReport {
        actors: actor_stats(graph),
        movies: movie_stats(graph),
        directors: director_stats(graph),
        modularity: PerAttribute::compute("modularity", |a| actor_modularity(graph, a)),
        assortativity: PerAttribute::compute("assortativity", |a| actor_assortativity(graph, a)),
        concordance: logged("concordance", "real", director_actor_concordance(graph, graph, index)),
        profit: logged("profit", "real", diversity_profit_correlation(graph, &movies)),
        movie_actor_null,
        director_movie_null,
        director_movie_null_concordance,
    };
    tracing::info!(failures = report.failures().len(), "baseline report complete");
    report
}
