//! Full analysis run: components, all-pairs distances, diameter, average path.
//!
//! Phase boundaries are logged here, around the kernels, so traversal and
//! metric code stays free of I/O.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::components::{connected_components, ComponentPartition, Ranking};
use crate::distance::{pairwise_dist_with, DistanceTable, PairwiseOptions};
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::metrics::{average_path, diameter};

/// Headline numbers for one analyzed network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub largest_component: usize,
    /// None when no pair of nodes is connected.
    pub diameter: Option<u32>,
    /// None when no pair of nodes is connected.
    pub average_path: Option<f64>,
}

/// Everything a run produces; the caller owns the derived artifacts.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub summary: NetworkSummary,
    pub partition: ComponentPartition,
    pub distances: DistanceTable,
}

pub fn analyze(graph: &Graph, ranking: &Ranking, options: &PairwiseOptions) -> Result<Analysis> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "starting network analysis"
    );

    let t = Instant::now();
    let partition = connected_components(graph, ranking)?;
    let sizes = partition.sizes();
    info!(
        components = partition.len(),
        elapsed_ms = elapsed_ms(t),
        "counted connected components"
    );
    debug!(?sizes, "component sizes");

    let t = Instant::now();
    info!(parallel = options.parallel, "calculating all pairwise distances");
    let distances = pairwise_dist_with(graph, options)?;
    info!(
        entries = distances.entry_count(),
        elapsed_ms = elapsed_ms(t),
        "finished pairwise distances"
    );

    let average = measured(average_path(&distances))?;
    let longest = measured(diameter(&distances))?;
    match (average, longest) {
        (Some(avg), Some(d)) => info!(average_path = avg, diameter = d, "path metrics"),
        _ => info!("no connected node pairs; path metrics undefined"),
    }

    let summary = NetworkSummary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        components: partition.len(),
        largest_component: sizes.iter().copied().max().unwrap_or(0),
        diameter: longest,
        average_path: average,
    };

    Ok(Analysis {
        summary,
        partition,
        distances,
    })
}

/// Treat "nothing measured" as an absent value rather than a failure.
fn measured<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(GraphError::NoMeasuredPairs) => Ok(None),
        Err(e) => Err(e),
    }
}

fn elapsed_ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::degree_centrality;
    use crate::components::largest_component;

    #[test]
    fn test_analyze_two_components() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("D", "E")]);
        let run = analyze(&g, &degree_centrality(&g), &PairwiseOptions::default()).unwrap();
        assert_eq!(run.summary.components, 2);
        assert_eq!(run.summary.largest_component, 3);
        assert_eq!(run.summary.diameter, Some(2));
        assert_eq!(run.summary.nodes, 5);
        assert_eq!(run.summary.edges, 3);
        assert_eq!(run.distances.distance("A", "C").unwrap(), Some(2));
    }

    #[test]
    fn test_analyze_largest_component() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("D", "E")]);
        let largest = largest_component(&g).unwrap();
        let run = analyze(&largest, &degree_centrality(&largest), &PairwiseOptions::default())
            .unwrap();
        assert_eq!(run.summary.components, 1);
        assert_eq!(run.summary.diameter, Some(2));
        let avg = run.summary.average_path.unwrap();
        assert!((avg - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_isolated_node() {
        let g = Graph::from_parts(["X"], Vec::<(&str, &str)>::new());
        let run = analyze(&g, &Ranking::new(), &PairwiseOptions::default()).unwrap();
        assert_eq!(run.summary.components, 1);
        assert_eq!(run.summary.diameter, None);
        assert_eq!(run.summary.average_path, None);
    }

    #[test]
    fn test_analyze_parallel() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
        let opts = PairwiseOptions {
            parallel: true,
            ..PairwiseOptions::default()
        };
        let run = analyze(&g, &Ranking::new(), &opts).unwrap();
        assert_eq!(run.summary.diameter, Some(2));
        assert!((run.summary.average_path.unwrap() - 8.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_guard_propagates() {
        let g = Graph::from_edges([("A", "B"), ("B", "C")]);
        let opts = PairwiseOptions {
            max_nodes: Some(2),
            ..PairwiseOptions::default()
        };
        assert!(matches!(
            analyze(&g, &Ranking::new(), &opts),
            Err(GraphError::TooManyNodes { nodes: 3, limit: 2 })
        ));
    }

    #[test]
    fn test_analyze_empty() {
        let g = Graph::from_edges(Vec::<(&str, &str)>::new());
        assert!(matches!(
            analyze(&g, &Ranking::new(), &PairwiseOptions::default()),
            Err(GraphError::EmptyGraph)
        ));
    }
}
