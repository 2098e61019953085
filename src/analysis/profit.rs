use crate::diversity::{movie_score, ScoreKind};
use crate::graph::MovieGraph;
use crate::model::NodeId;
use crate::{Error, Result};

/// Pearson correlation of diversity score against gross/budget.
#[derive(Debug)]
pub struct ProfitCorrelation {
    pub race: Result<f64>,
    pub gender: Result<f64>,
    /// Movies that entered each correlation.
    pub race_sample: usize,
    pub gender_sample: usize,
    pub excluded_zero_budget: usize,
}

/// Correlate movie scores with profit ratio over `movies`.
///
/// Movies with a zero budget have no profit ratio and are left out of both
/// samples; so is a movie whose score of that kind is undefined.
pub fn diversity_profit_correlation(graph: &MovieGraph, movies: &[NodeId]) -> Result<ProfitCorrelation> {
    let mut race = Vec::new();
    let mut gender = Vec::new();
    let mut excluded_zero_budget = 0;

    for &id in movies {
        let movie = graph.movie(id).ok_or_else(|| Error::NotFound(format!("movie {id}")))?;
        let Some(profit) = movie.profit_ratio() else {
            excluded_zero_budget += 1;
            continue;
        };
        if let Some(score) = movie_score(graph, ScoreKind::Race, id) {
            race.push((score, profit));
        }
        if let Some(score) = movie_score(graph, ScoreKind::Gender, id) {
            gender.push((score, profit));
        }
    }

    Ok(ProfitCorrelation {
        race_sample: race.len(),
        gender_sample: gender.len(),
        race: pearson(&race),
        gender: pearson(&gender),
        excluded_zero_budget,
    })
}

/// Sample Pearson correlation coefficient.
pub fn pearson(pairs: &[(f64, f64)]) -> Result<f64> {
    if pairs.len() < 2 {
        return Err(Error::EmptySample(format!(
            "correlation needs two observations, got {}",
            pairs.len()
        )));
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(Error::Degenerate("correlation of a constant series".into()));
    }
    Ok(sxy / (sxx.sqrt() * syy.sqrt()))
}
