//! Derived-graph transforms.
//!
//! Every filter takes the graph (and, where nodes disappear, its index) by
//! reference and returns fresh copies, so the caller's graph is untouched.

use crate::graph::{BipartiteGraph, MovieGraph, NameIndex, Side};
use crate::model::*;
use crate::{Error, Result};

pub use crate::graph::actor_co_graph;

/// Drop actors with unknown race or gender.
///
/// Actor-directors with unknown demographics keep their directing edges: only
/// their acting edges go, and they become plain directors.
pub fn remove_unknown_demographics(graph: &MovieGraph, index: &NameIndex) -> (MovieGraph, NameIndex) {
    let mut graph = graph.clone();
    let mut index = index.clone();
    let mut removed = 0usize;
    let mut demoted = 0usize;

    for id in graph.actors() {
        let Some(person) = graph.person(id) else { continue };
        if person.demographics().is_complete() {
            continue;
        }
        let role = person.role;
        match role {
            Role::Actor => {
                graph.remove_node(id);
                index.remove_node(id);
                removed += 1;
            }
            Role::ActorDirector => {
                graph.retain_edges(|e| !(e.dst == id && e.kind == EdgeKind::Casts));
                if let Some(p) = graph.person_mut(id) {
                    p.role = Role::Director;
                }
                demoted += 1;
            }
            Role::Director => {}
        }
    }

    tracing::info!(removed, demoted, "removed actors with unknown demographics");
    (graph, index)
}

/// Collapse every person's race to White / Non-White, dropping people whose
/// race is unknown.
pub fn binarize_race(graph: &MovieGraph, index: &NameIndex) -> (MovieGraph, NameIndex) {
    let mut graph = graph.clone();
    let mut index = index.clone();
    let mut dropped = 0usize;

    for id in graph.people() {
        let Some(person) = graph.person_mut(id) else { continue };
        if person.race.is_known() {
            person.race = person.race.binarized();
        } else {
            graph.remove_node(id);
            index.remove_node(id);
            dropped += 1;
        }
    }

    tracing::info!(dropped, "binarized race");
    (graph, index)
}

/// Drop movies released before `year`. Unreleased movies (year coerced to 0)
/// always fall below the cutoff.
pub fn remove_movies_before(graph: &MovieGraph, index: &NameIndex, year: i32) -> (MovieGraph, NameIndex) {
    let mut graph = graph.clone();
    let mut index = index.clone();
    let doomed: Vec<NodeId> = graph.movies()
        .into_iter()
        .filter(|&m| graph.movie(m).is_some_and(|a| a.release_year < year))
        .collect();
    for id in &doomed {
        graph.remove_node(*id);
        index.remove_node(*id);
    }
    tracing::info!(removed = doomed.len(), cutoff = year, "removed early movies");
    (graph, index)
}

/// Drop people no longer connected to any movie.
pub fn remove_isolated_people(graph: &MovieGraph, index: &NameIndex) -> (MovieGraph, NameIndex) {
    let mut graph = graph.clone();
    let mut index = index.clone();
    let doomed: Vec<NodeId> = graph.people()
        .into_iter()
        .filter(|&p| graph.degree(p) == 0)
        .collect();
    for id in &doomed {
        graph.remove_node(*id);
        index.remove_node(*id);
    }
    (graph, index)
}

/// The cleanup applied before longitudinal runs: unknown demographics out,
/// early movies out, then whoever is left without a movie.
pub fn prepare_longitudinal(graph: &MovieGraph, index: &NameIndex, min_year: i32) -> (MovieGraph, NameIndex) {
    let (graph, index) = remove_unknown_demographics(graph, index);
    let (graph, index) = remove_movies_before(&graph, &index, min_year);
    remove_isolated_people(&graph, &index)
}

/// Orient a bipartite graph: every edge runs from side zero to side one.
/// The side labels decide the edge kind: Director/Movie gives `Directs`,
/// Movie/Actor gives `Casts`.
///
/// Node ids in the result are the bipartite positions. Nodes without attached
/// metadata are an error.
pub fn bipartite_to_directed(
    bipartite: &BipartiteGraph,
    side0: NodeKind,
    side1: NodeKind,
) -> Result<MovieGraph> {
    let kind = match (side0, side1) {
        (s0, NodeKind::Movie) if s0.directs() => EdgeKind::Directs,
        (NodeKind::Movie, s1) if s1.acts() => EdgeKind::Casts,
        _ => {
            return Err(Error::InvalidBipartition(format!(
                "no edge kind runs from {side0} to {side1}"
            )));
        }
    };

    let mut graph = MovieGraph::new();
    for (pos, node) in bipartite.nodes().iter().enumerate() {
        let attributes = node.attributes.clone().ok_or_else(|| {
            Error::MissingAttribute { node: NodeId(pos as u64), attribute: "metadata" }
        })?;
        let is_movie = matches!(attributes, NodeAttributes::Movie(_));
        let expects_movie = match node.side {
            Side::Zero => side0 == NodeKind::Movie,
            Side::One => side1 == NodeKind::Movie,
        };
        if is_movie != expects_movie {
            return Err(Error::InvalidBipartition(format!(
                "node {pos} on {:?} carries the wrong entity type",
                node.side
            )));
        }
        graph.insert_node(Node::new(NodeId(pos as u64), attributes))?;
    }

    for &(a, b) in bipartite.edges() {
        let (src, dst) = match bipartite.node(a).map(|n| n.side) {
            Some(Side::Zero) => (a, b),
            _ => (b, a),
        };
        graph.add_edge(NodeId(src as u64), NodeId(dst as u64), kind)?;
    }
    Ok(graph)
}
