//! Structural analyses over the actor co-appearance graph and the
//! director→movie→actor relation.

mod concordance;
mod profit;
mod report;

pub use concordance::{director_actor_concordance, Concordance};
pub use profit::{diversity_profit_correlation, pearson, ProfitCorrelation};
pub use report::{run_baseline_report, AnalysisReport, NullBaseline, PerAttribute};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use crate::graph::actor_co_graph;
use crate::graph::{CoGraph, MovieGraph, WeightedGraph};
use crate::model::PersonAttributes;
use crate::{Error, Result};

/// Person attribute a partition or mixing matrix is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// One community per race category.
    Race,
    /// White vs. every other known category.
    BinaryRace,
    Gender,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Race, Attribute::BinaryRace, Attribute::Gender];

    /// Community id of `person`, `None` when the attribute is unknown.
    pub fn community(self, person: &PersonAttributes) -> Option<u32> {
        match self {
            Attribute::Race => person.race.category_id(),
            Attribute::BinaryRace => person.race.is_white().map(|white| u32::from(!white)),
            Attribute::Gender => person.gender.category_id(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Attribute::Race => "race",
            Attribute::BinaryRace => "binary_race",
            Attribute::Gender => "gender",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Modularity
// ============================================================================

/// Weighted Newman modularity of the partition `attribute` induces.
///
/// `Q = Σ_c [ w_in(c) / m − (deg(c) / 2m)² ]` with `m` the total edge weight.
/// Nodes without the attribute are dropped first, together with their edges.
pub fn modularity(weighted: &WeightedGraph, attribute: Attribute) -> Result<f64> {
    let graph = weighted.retain_nodes(|p| attribute.community(p).is_some());
    let m = graph.total_weight();
    if m == 0.0 {
        return Err(Error::EmptySample(format!(
            "no co-appearance weight left for {attribute} modularity"
        )));
    }

    let community = |id| graph.node(id).and_then(|p| attribute.community(p));
    let mut internal: BTreeMap<u32, f64> = BTreeMap::new();
    let mut degree: BTreeMap<u32, f64> = BTreeMap::new();
    for (a, b, w) in graph.edges() {
        let (Some(ca), Some(cb)) = (community(a), community(b)) else { continue };
        *degree.entry(ca).or_default() += w;
        *degree.entry(cb).or_default() += w;
        if ca == cb {
            *internal.entry(ca).or_default() += w;
        }
    }

    Ok(degree.iter()
        .map(|(c, d)| internal.get(c).copied().unwrap_or(0.0) / m - (d / (2.0 * m)).powi(2))
        .sum())
}

pub fn actor_modularity(graph: &MovieGraph, attribute: Attribute) -> Result<f64> {
    modularity(&actor_co_graph(graph).collapse(), attribute)
}

// ============================================================================
// Assortativity
// ============================================================================

/// Attribute assortativity coefficient of the co-appearance multigraph.
///
/// Built from the symmetric mixing matrix `e` (each edge counted in both
/// directions, normalized to sum 1): `r = (tr e − Σ a_i b_i) / (1 − Σ a_i b_i)`.
/// Edges with an endpoint lacking the attribute are left out.
pub fn attribute_assortativity(co: &CoGraph, attribute: Attribute) -> Result<f64> {
    let mut mixing: BTreeMap<(u32, u32), f64> = BTreeMap::new();
    let mut total = 0.0;
    for &(a, b) in co.edges() {
        let ca = co.node(a).and_then(|p| attribute.community(p));
        let cb = co.node(b).and_then(|p| attribute.community(p));
        let (Some(ca), Some(cb)) = (ca, cb) else { continue };
        *mixing.entry((ca, cb)).or_default() += 1.0;
        *mixing.entry((cb, ca)).or_default() += 1.0;
        total += 2.0;
    }
    if total == 0.0 {
        return Err(Error::EmptySample(format!(
            "no co-appearance edges with known {attribute}"
        )));
    }

    let mut trace = 0.0;
    let mut rows: BTreeMap<u32, f64> = BTreeMap::new();
    let mut cols: BTreeMap<u32, f64> = BTreeMap::new();
    for (&(i, j), &count) in &mixing {
        let e = count / total;
        if i == j {
            trace += e;
        }
        *rows.entry(i).or_default() += e;
        *cols.entry(j).or_default() += e;
    }
    let expected: f64 = rows.iter()
        .map(|(i, a)| a * cols.get(i).copied().unwrap_or(0.0))
        .sum();

    let denominator = 1.0 - expected;
    if denominator.abs() < 1e-12 {
        return Err(Error::Degenerate(format!(
            "every counted co-appearance shares one {attribute} category"
        )));
    }
    Ok((trace - expected) / denominator)
}

pub fn actor_assortativity(graph: &MovieGraph, attribute: Attribute) -> Result<f64> {
    attribute_assortativity(&actor_co_graph(graph), attribute)
}
