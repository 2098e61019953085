//! Bipartite configuration model.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::graph::{BipartiteGraph, Side};
use crate::{Error, Result};

/// Random bipartite multigraph with exactly the given degree sequences.
///
/// Side-zero node `i` sits at position `i`, side-one node `j` at
/// `deg0.len() + j`. Stubs of both sides are shuffled and paired in order, so
/// parallel edges are possible.
pub fn configuration_model<R: Rng + ?Sized>(
    deg0: &[usize],
    deg1: &[usize],
    rng: &mut R,
) -> Result<BipartiteGraph> {
    let sum0: usize = deg0.iter().sum();
    let sum1: usize = deg1.iter().sum();
    if sum0 != sum1 {
        return Err(Error::InvalidDegreeSequence(format!(
            "degree sums differ: {sum0} on side zero, {sum1} on side one"
        )));
    }

    let mut graph = BipartiteGraph::new();
    for _ in deg0 {
        graph.add_node(Side::Zero);
    }
    for _ in deg1 {
        graph.add_node(Side::One);
    }

    let offset = deg0.len();
    let mut stubs0: Vec<usize> = stubs(deg0, 0);
    let mut stubs1: Vec<usize> = stubs(deg1, offset);
    stubs0.shuffle(rng);
    stubs1.shuffle(rng);

    for (a, b) in stubs0.into_iter().zip(stubs1) {
        graph.add_edge(a, b)?;
    }
    Ok(graph)
}

fn stubs(degrees: &[usize], offset: usize) -> Vec<usize> {
    degrees.iter()
        .enumerate()
        .flat_map(|(i, &d)| std::iter::repeat_n(offset + i, d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_degrees_match_exactly() {
        let mut rng = StdRng::seed_from_u64(3);
        let deg0 = [3, 1, 0, 2];
        let deg1 = [2, 2, 2];
        let g = configuration_model(&deg0, &deg1, &mut rng).unwrap();
        assert_eq!(g.edge_count(), 6);
        for (i, &d) in deg0.iter().enumerate() {
            assert_eq!(g.degree(i), d);
        }
        for (j, &d) in deg1.iter().enumerate() {
            assert_eq!(g.degree(deg0.len() + j), d);
        }
    }

    #[test]
    fn test_mismatched_sums_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = configuration_model(&[2], &[1], &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidDegreeSequence(_)));
    }

    #[test]
    fn test_empty_sequences() {
        let mut rng = StdRng::seed_from_u64(3);
        let g = configuration_model(&[], &[0, 0], &mut rng).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 0);
    }
}
