//! Degree-preserving null models.
//!
//! A null graph keeps every node of its source (same ids, same metadata) and
//! copies the relation that is not being randomized unchanged. Only the
//! randomized relation is rewired, so node-kind populations and the total
//! edge count always match the source.
//!
//! Under [`Reattachment::Shuffled`] only the degree distribution survives;
//! the degree of an individual node is not preserved, and a person's stored
//! role is kept even when their rewired edges no longer justify it.

mod configuration;

pub use configuration::configuration_model;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::{CastStrategy, NullModelConfig, Reattachment};
use crate::graph::MovieGraph;
use crate::model::{EdgeKind, NodeId};
use crate::{Error, Result};

/// Null graph with the movie↔actor relation randomized. Directing edges are
/// copied as-is.
pub fn generate_movie_actor_null<R: Rng + ?Sized>(
    graph: &MovieGraph,
    config: &NullModelConfig,
    rng: &mut R,
) -> Result<MovieGraph> {
    let null = match config.cast_strategy {
        CastStrategy::Configuration => randomize_relation(
            graph,
            EdgeKind::Casts,
            graph.movies(),
            graph.actors(),
            config.reattachment,
            rng,
        )?,
        CastStrategy::UniformRecast => uniform_recast(graph, rng)?,
    };
    tracing::info!(
        strategy = ?config.cast_strategy,
        reattachment = ?config.reattachment,
        edges = null.edge_count(),
        "movie-actor null graph generated"
    );
    Ok(null)
}

/// Null graph with the director↔movie relation randomized. Casting edges are
/// copied as-is; an actor-director contributes only their directing degree.
pub fn generate_director_movie_null<R: Rng + ?Sized>(
    graph: &MovieGraph,
    config: &NullModelConfig,
    rng: &mut R,
) -> Result<MovieGraph> {
    let null = randomize_relation(
        graph,
        EdgeKind::Directs,
        graph.directors(),
        graph.movies(),
        config.reattachment,
        rng,
    )?;
    tracing::info!(
        reattachment = ?config.reattachment,
        edges = null.edge_count(),
        "director-movie null graph generated"
    );
    Ok(null)
}

/// Owns the RNG so a run of null graphs is reproducible from one seed.
#[derive(Debug, Clone)]
pub struct NullModelGenerator {
    config: NullModelConfig,
    rng: StdRng,
}

impl NullModelGenerator {
    pub fn new(config: NullModelConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(NullModelConfig { seed: Some(seed), ..NullModelConfig::default() })
    }

    pub fn config(&self) -> &NullModelConfig {
        &self.config
    }

    pub fn movie_actor(&mut self, graph: &MovieGraph) -> Result<MovieGraph> {
        generate_movie_actor_null(graph, &self.config, &mut self.rng)
    }

    pub fn director_movie(&mut self, graph: &MovieGraph) -> Result<MovieGraph> {
        generate_director_movie_null(graph, &self.config, &mut self.rng)
    }
}

// ============================================================================
// Internals
// ============================================================================

/// Every node of `graph`, plus only its edges of kind `keep`.
fn copy_population(graph: &MovieGraph, keep: EdgeKind) -> Result<MovieGraph> {
    let mut null = MovieGraph::new();
    for node in graph.nodes() {
        null.insert_node(node.clone())?;
    }
    for edge in graph.edges().filter(|e| e.kind == keep) {
        null.add_edge(edge.src, edge.dst, edge.kind)?;
    }
    Ok(null)
}

fn other_kind(kind: EdgeKind) -> EdgeKind {
    match kind {
        EdgeKind::Directs => EdgeKind::Casts,
        EdgeKind::Casts => EdgeKind::Directs,
    }
}

/// Rewire the `kind` edges running from `sources` to `targets` with the
/// configuration model.
fn randomize_relation<R: Rng + ?Sized>(
    graph: &MovieGraph,
    kind: EdgeKind,
    mut sources: Vec<NodeId>,
    mut targets: Vec<NodeId>,
    reattachment: Reattachment,
    rng: &mut R,
) -> Result<MovieGraph> {
    let out: Vec<usize> = sources.iter().map(|&s| graph.out_degree(s, kind)).collect();
    let inc: Vec<usize> = targets.iter().map(|&t| graph.in_degree(t, kind)).collect();
    let topology = configuration_model(&out, &inc, rng)?;

    if reattachment == Reattachment::Shuffled {
        sources.shuffle(rng);
        targets.shuffle(rng);
    }

    let mut null = copy_population(graph, other_kind(kind))?;
    let offset = sources.len();
    for &(a, b) in topology.edges() {
        null.add_edge(sources[a], targets[b - offset], kind)?;
    }
    Ok(null)
}

/// Each movie keeps its cast size and draws a fresh cast uniformly, without
/// replacement, from every actor in the graph.
fn uniform_recast<R: Rng + ?Sized>(graph: &MovieGraph, rng: &mut R) -> Result<MovieGraph> {
    let actors = graph.actors();
    let mut null = copy_population(graph, EdgeKind::Directs)?;
    for movie in graph.movies() {
        let size = graph.out_degree(movie, EdgeKind::Casts);
        if size > actors.len() {
            return Err(Error::InvalidDegreeSequence(format!(
                "movie {movie} casts {size} actors, population has {}",
                actors.len()
            )));
        }
        for &actor in actors.choose_multiple(rng, size) {
            null.add_edge(movie, actor, EdgeKind::Casts)?;
        }
    }
    Ok(null)
}
