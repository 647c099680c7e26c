//! genenet-core: connectivity and shortest-path metrics for interaction networks.
//!
//! Builds an immutable undirected graph from an edge list, then derives
//! connected components, the all-pairs hop-distance table, diameter and
//! average path length from breadth-first traversals.
//! No I/O: this crate compiles and runs standalone.
//!
//! Designed as the engine behind the `genenet` command-line tool, but
//! usable independently for benchmarking and testing.

mod analysis;
mod centrality;
mod components;
mod distance;
mod error;
mod graph;
mod metrics;
mod traversal;

pub use analysis::{analyze, Analysis, NetworkSummary};
pub use centrality::{degree_centrality, top_degree, DegreeResult};
pub use components::{
    connected_components, largest_component, num_components, select_seed, ComponentPartition,
    Ranking,
};
pub use distance::{
    distance_row, pairwise_dist, pairwise_dist_parallel, pairwise_dist_with, DistanceRow,
    DistanceTable, PairwiseOptions,
};
pub use error::{GraphError, Result};
pub use graph::{Graph, GraphBuilder, NodeId};
pub use metrics::{average_path, diameter};
pub use traversal::{bfs_edges, BfsEdges};
