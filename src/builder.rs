//! Graph construction from raw movie records.
//!
//! ```text
//! MovieRecord ──► movie node ──Casts──► actor nodes
//!                     ▲
//!                  Directs
//!                     │
//!               director node
//! ```
//!
//! People are keyed by name and created on first reference; a person credited
//! both ways is promoted to ACTOR-DIRECTOR. Demographics come from the
//! [`Enrichment`] source the caller supplies.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::graph::{MovieGraph, NameIndex};
use crate::model::*;
use crate::{Error, Result};

// ============================================================================
// Enrichment seam
// ============================================================================

/// Race/gender lookup for a person, supplied by the scraping layer.
pub trait Enrichment {
    fn demographics(&self, name: &str) -> Demographics;
}

/// Enrichment that knows nobody.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl Enrichment for NoEnrichment {
    fn demographics(&self, _name: &str) -> Demographics {
        Demographics::UNKNOWN
    }
}

impl<S: BuildHasher> Enrichment for HashMap<String, Demographics, S> {
    fn demographics(&self, name: &str) -> Demographics {
        self.get(name).copied().unwrap_or_default()
    }
}

impl Enrichment for BTreeMap<String, Demographics> {
    fn demographics(&self, name: &str) -> Demographics {
        self.get(name).copied().unwrap_or_default()
    }
}

// ============================================================================
// Build report
// ============================================================================

/// A numeric cell that could not be parsed and was replaced by zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercedField {
    pub title: String,
    pub field: &'static str,
    pub raw: String,
}

/// What happened while building, for the caller to surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub movies_added: usize,
    pub duplicate_records: usize,
    pub people_added: usize,
    pub role_promotions: usize,
    pub movies_without_director: usize,
    pub coerced_fields: Vec<CoercedField>,
}

// ============================================================================
// GraphBuilder
// ============================================================================

pub struct GraphBuilder<'e, E: Enrichment + ?Sized> {
    graph: MovieGraph,
    index: NameIndex,
    enrichment: &'e E,
    max_credited_actors: usize,
    report: BuildReport,
}

impl<'e, E: Enrichment + ?Sized> GraphBuilder<'e, E> {
    pub fn new(enrichment: &'e E) -> Self {
        Self::with_config(enrichment, &AnalysisConfig::default())
    }

    pub fn with_config(enrichment: &'e E, config: &AnalysisConfig) -> Self {
        Self {
            graph: MovieGraph::new(),
            index: NameIndex::new(),
            enrichment,
            max_credited_actors: config.max_credited_actors,
            report: BuildReport::default(),
        }
    }

    /// Add one record. Returns the new movie node, or `None` when a movie with
    /// the same title and year is already in the graph.
    pub fn add_movie(&mut self, record: &MovieRecord) -> Result<Option<NodeId>> {
        let title = record.title.trim().to_string();
        let year = self.numeric(&title, "release_year", &record.release_year);
        let release_year = match i32::try_from(year) {
            Ok(y) => y,
            Err(_) => {
                self.coerced(&title, "release_year", &record.release_year);
                0
            }
        };

        let key = unique_movie_id(&title, release_year);
        if let Some(existing) = self.index.get(&key) {
            if self.graph.movie(existing).is_none() {
                return Err(Error::InconsistentIndex(format!(
                    "movie key {key:?} collides with person node {existing}"
                )));
            }
            tracing::debug!(movie = %key, "skipping duplicate record");
            self.report.duplicate_records += 1;
            return Ok(None);
        }

        let mut cast: Vec<String> = Vec::new();
        for name in record.actors.iter().map(|n| n.trim()) {
            if cast.len() == self.max_credited_actors {
                break;
            }
            if !name.is_empty() && !cast.iter().any(|c| c == name) {
                cast.push(name.to_string());
            }
        }
        let director = record.director.trim().to_string();
        let credited = cast.iter().map(String::as_str).chain((!director.is_empty()).then_some(director.as_str()));
        for name in credited {
            self.check_person_key(name, &key)?;
        }

        let movie = MovieAttributes {
            title: title.clone(),
            release_year,
            gross: self.numeric(&title, "gross", &record.gross),
            budget: self.numeric(&title, "budget", &record.budget),
            director_name: director.clone(),
            actor_names: cast.clone(),
            extras: record.extras.clone(),
        };
        let movie_id = self.graph.add_node(NodeAttributes::Movie(movie));
        self.index.insert(key, movie_id)?;
        self.report.movies_added += 1;

        for name in &cast {
            let actor_id = self.person_node(name, Role::Actor)?;
            self.graph.add_edge(movie_id, actor_id, EdgeKind::Casts)?;
        }

        if director.is_empty() {
            tracing::warn!(movie = %title, year = release_year, "record credits no director");
            self.report.movies_without_director += 1;
        } else {
            let director_id = self.person_node(&director, Role::Director)?;
            self.graph.add_edge(director_id, movie_id, EdgeKind::Directs)?;
        }

        Ok(Some(movie_id))
    }

    /// A person name must not resolve to a movie, including the one about to
    /// be added under `movie_key`.
    fn check_person_key(&self, name: &str, movie_key: &str) -> Result<()> {
        let collides = name == movie_key
            || self.index.get(name).is_some_and(|id| self.graph.person(id).is_none());
        if collides {
            return Err(Error::InconsistentIndex(format!(
                "person {name:?} collides with a movie key"
            )));
        }
        Ok(())
    }

    /// Find or create the person node for `name`, promoting its role if it
    /// now holds both credits.
    fn person_node(&mut self, name: &str, credit: Role) -> Result<NodeId> {
        if let Some(id) = self.index.get(name) {
            let person = self.graph.person_mut(id).ok_or_else(|| {
                Error::InconsistentIndex(format!("person {name:?} collides with movie node {id}"))
            })?;
            let promoted = match credit {
                Role::Director => person.role.with_directing(),
                _ => person.role.with_acting(),
            };
            if promoted != person.role {
                tracing::debug!(person = %name, from = ?person.role, to = ?promoted, "role promoted");
                person.role = promoted;
                self.report.role_promotions += 1;
            }
            return Ok(id);
        }

        let attrs = PersonAttributes::new(name, credit, self.enrichment.demographics(name));
        let id = self.graph.add_node(NodeAttributes::Person(attrs));
        self.index.insert(name, id)?;
        self.report.people_added += 1;
        Ok(id)
    }

    /// Parse a numeric cell, coercing empty or malformed text to zero.
    fn numeric(&mut self, title: &str, field: &'static str, raw: &str) -> i64 {
        match parse_numeric(raw) {
            Some(v) => v,
            None => {
                self.coerced(title, field, raw);
                0
            }
        }
    }

    fn coerced(&mut self, title: &str, field: &'static str, raw: &str) {
        if raw.trim().is_empty() {
            tracing::debug!(movie = %title, field, "missing numeric field, using 0");
        } else {
            tracing::warn!(movie = %title, field, raw = %raw, "malformed numeric field, using 0");
        }
        self.report.coerced_fields.push(CoercedField {
            title: title.to_string(),
            field,
            raw: raw.to_string(),
        });
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn finish(self) -> (MovieGraph, NameIndex, BuildReport) {
        tracing::info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            movies = self.report.movies_added,
            duplicates = self.report.duplicate_records,
            coerced = self.report.coerced_fields.len(),
            "movie graph built"
        );
        (self.graph, self.index, self.report)
    }
}

/// Integer cell value. Accepts float text ("237000000.0") by truncation.
pub fn parse_numeric(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
    })
}

/// Build the graph and index for a batch of records with default settings.
pub fn build_graph<E: Enrichment + ?Sized>(
    records: impl IntoIterator<Item = MovieRecord>,
    enrichment: &E,
) -> Result<(MovieGraph, NameIndex)> {
    build_graph_with(records, enrichment, &AnalysisConfig::default())
        .map(|(graph, index, _)| (graph, index))
}

/// Build with explicit settings, returning the build report as well.
pub fn build_graph_with<E: Enrichment + ?Sized>(
    records: impl IntoIterator<Item = MovieRecord>,
    enrichment: &E,
    config: &AnalysisConfig,
) -> Result<(MovieGraph, NameIndex, BuildReport)> {
    let mut builder = GraphBuilder::with_config(enrichment, config);
    for record in records {
        builder.add_movie(&record)?;
    }
    Ok(builder.finish())
}
