//! # castgraph: Movie Diversity Network Analysis
//!
//! Builds a tripartite directed graph of movies, directors and actors from
//! tabular movie metadata, then measures demographic diversity on it and on
//! degree-preserving null models of it.
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: graphs and name indexes are values passed in and
//!    returned, never module globals
//! 2. **Typed nodes**: `NodeAttributes` is a tagged variant, ancillary
//!    metadata rides along in a `PropertyMap`
//! 3. **Undefined is a value**: empty samples surface as `None` or
//!    `Error::EmptySample`, never as a division by zero
//! 4. **Copy-on-write filters**: derived graphs never alter their input
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use castgraph::{build_graph, Demographics, Gender, MovieRecord, Race};
//! use castgraph::diversity::{movie_score, ScoreKind};
//!
//! # fn example() -> castgraph::Result<()> {
//! let mut people = HashMap::new();
//! people.insert("D1".to_string(), Demographics::new(Race::White, Gender::Male));
//! people.insert("A1".to_string(), Demographics::new(Race::White, Gender::Male));
//! people.insert("A2".to_string(), Demographics::new(Race::Black, Gender::Female));
//!
//! let records = vec![MovieRecord::new("Avatar", 2009, "D1").with_actors(["A1", "A2"])];
//! let (graph, index) = build_graph(records, &people)?;
//!
//! let avatar = index.require("Avatar2009")?;
//! assert_eq!(movie_score(&graph, ScoreKind::Race, avatar), Some(0.5));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | Build | `builder` | records + enrichment → graph + index |
//! | Filter | `filters` | unknown removal, race binarization, projections |
//! | Randomize | `null_model` | configuration-model baselines |
//! | Score | `diversity` | per-entity scores, population statistics |
//! | Analyze | `analysis` | modularity, assortativity, concordance, profit |
//! | Replay | `timeseries` | year-by-year cumulative metrics |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod builder;
pub mod filters;
pub mod null_model;
pub mod diversity;
pub mod analysis;
pub mod timeseries;
pub mod config;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Node, NodeId, NodeKind, NodeAttributes, MovieAttributes, PersonAttributes, Role,
    Edge, EdgeId, EdgeKind, Direction, Demographics, Gender, Race,
    Value, PropertyMap, MovieRecord,
};

// ============================================================================
// Re-exports: Graph
// ============================================================================

pub use graph::{MovieGraph, NameIndex, CoGraph, WeightedGraph, BipartiteGraph, Side};

// ============================================================================
// Re-exports: Pipeline entry points
// ============================================================================

pub use builder::{build_graph, BuildReport, Enrichment, GraphBuilder, NoEnrichment};
pub use null_model::{NullModelGenerator, generate_director_movie_null, generate_movie_actor_null};
pub use config::{AnalysisConfig, CastStrategy, NullModelConfig, Reattachment};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing attribute `{attribute}` on node {node}")]
    MissingAttribute { node: NodeId, attribute: &'static str },

    #[error("Empty sample: {0}")]
    EmptySample(String),

    #[error("Degenerate sample: {0}")]
    Degenerate(String),

    #[error("Inconsistent name index: {0}")]
    InconsistentIndex(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Invalid degree sequence: {0}")]
    InvalidDegreeSequence(String),

    #[error("Invalid bipartition: {0}")]
    InvalidBipartition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when a statistic is merely undefined for its input, as opposed to
    /// a broken graph or a bad argument.
    pub fn is_undefined(&self) -> bool {
        matches!(
            self,
            Error::MissingAttribute { .. } | Error::EmptySample(_) | Error::Degenerate(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
