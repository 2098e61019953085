//! Year-by-year replay of a movie graph.
//!
//! The engine grows a copy of the source graph one release year at a time,
//! oldest first. Nodes keep their source ids and are never removed, so an
//! aggregate evaluated at year Y sees exactly the movies released up to Y.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::diversity::{average_director_score, average_movie_score, ScoreKind};
use crate::filters::prepare_longitudinal;
use crate::graph::{MovieGraph, NameIndex};
use crate::model::{Direction, EdgeKind, NodeId};
use crate::{Error, Result};

/// Movie ids grouped by release year, years ascending.
pub fn year_buckets(graph: &MovieGraph) -> BTreeMap<i32, Vec<NodeId>> {
    let mut buckets: BTreeMap<i32, Vec<NodeId>> = BTreeMap::new();
    for id in graph.movies() {
        if let Some(movie) = graph.movie(id) {
            buckets.entry(movie.release_year).or_default().push(id);
        }
    }
    buckets
}

/// Movies added by one `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearStep {
    pub year: i32,
    pub movies: Vec<NodeId>,
}

pub struct TimeSeriesEngine<'g> {
    source: &'g MovieGraph,
    buckets: Vec<(i32, Vec<NodeId>)>,
    next: usize,
    graph: MovieGraph,
}

impl<'g> TimeSeriesEngine<'g> {
    pub fn new(source: &'g MovieGraph) -> Self {
        Self {
            source,
            buckets: year_buckets(source).into_iter().collect(),
            next: 0,
            graph: MovieGraph::new(),
        }
    }

    pub fn years(&self) -> Vec<i32> {
        self.buckets.iter().map(|(y, _)| *y).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.buckets.len()
    }

    /// The cumulative graph so far.
    pub fn graph(&self) -> &MovieGraph {
        &self.graph
    }

    pub fn into_graph(self) -> MovieGraph {
        self.graph
    }

    /// Insert the next year's movies with their director and cast. Returns
    /// `None` once every year has been consumed.
    pub fn advance(&mut self) -> Result<Option<YearStep>> {
        let Some((year, movies)) = self.buckets.get(self.next).cloned() else {
            return Ok(None);
        };
        self.next += 1;

        for &movie in &movies {
            self.ensure(movie)?;
            let incoming: Vec<NodeId> = self.source
                .edges_of(movie, Direction::Incoming, Some(EdgeKind::Directs))
                .iter()
                .map(|e| e.src)
                .collect();
            for director in incoming {
                self.ensure(director)?;
                self.graph.add_edge(director, movie, EdgeKind::Directs)?;
            }
            for actor in self.source.cast_of(movie) {
                self.ensure(actor)?;
                self.graph.add_edge(movie, actor, EdgeKind::Casts)?;
            }
        }

        tracing::debug!(year, movies = movies.len(), nodes = self.graph.node_count(), "time step");
        Ok(Some(YearStep { year, movies }))
    }

    fn ensure(&mut self, id: NodeId) -> Result<()> {
        if self.graph.contains_node(id) {
            return Ok(());
        }
        let node = self.source.node(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("source node {id}")))?;
        self.graph.insert_node(node)
    }
}

// ============================================================================
// Series
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub years: Vec<i32>,
    pub series: Vec<Series>,
}

impl TimeSeries {
    pub fn get(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }
}

/// Replay `source` and evaluate `aggregate` after every year. The aggregate
/// receives the cumulative graph and the movies released that year, and must
/// return one value per label.
pub fn run<F>(source: &MovieGraph, labels: &[&str], mut aggregate: F) -> Result<TimeSeries>
where
    F: FnMut(&MovieGraph, &[NodeId]) -> Vec<Option<f64>>,
{
    let mut engine = TimeSeriesEngine::new(source);
    let mut out = TimeSeries {
        years: Vec::new(),
        series: labels.iter()
            .map(|l| Series { label: l.to_string(), values: Vec::new() })
            .collect(),
    };

    while let Some(step) = engine.advance()? {
        let values = aggregate(engine.graph(), &step.movies);
        if values.len() != labels.len() {
            return Err(Error::Config(format!(
                "aggregate returned {} values for {} labels in {}",
                values.len(),
                labels.len(),
                step.year
            )));
        }
        for (series, value) in out.series.iter_mut().zip(values) {
            series.values.push(value);
        }
        out.years.push(step.year);
    }
    Ok(out)
}

pub const OVERVIEW_LABELS: [&str; 4] = ["Director gender", "Director racial", "Movie gender", "Movie racial"];

/// Director and movie average scores, in [`OVERVIEW_LABELS`] order.
pub fn diversity_overview(graph: &MovieGraph, _released: &[NodeId]) -> Vec<Option<f64>> {
    vec![
        average_director_score(graph, ScoreKind::Gender),
        average_director_score(graph, ScoreKind::Race),
        average_movie_score(graph, ScoreKind::Gender),
        average_movie_score(graph, ScoreKind::Race),
    ]
}

/// The diversity overview over time, after the longitudinal cleanup.
pub fn diversity_over_time(graph: &MovieGraph, index: &NameIndex, config: &AnalysisConfig) -> Result<TimeSeries> {
    let (cleaned, _) = prepare_longitudinal(graph, index, config.min_release_year);
    run(&cleaned, &OVERVIEW_LABELS, diversity_overview)
}
