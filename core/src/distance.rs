use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId};
use crate::traversal::BfsEdges;

/// Hop counts from one source to every node reachable from it.
/// The source itself and unreachable nodes are absent.
pub type DistanceRow = HashMap<NodeId, u32>;

/// Resource guards for the all-pairs computation.
///
/// The table is O(V²) in size, so large subgraphs can be refused up front
/// (`max_nodes`) or abandoned between rows (`deadline`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseOptions {
    /// Compute rows on the rayon thread pool.
    pub parallel: bool,
    /// Refuse graphs with more nodes than this.
    pub max_nodes: Option<usize>,
    /// Wall-clock budget, checked before each row.
    pub deadline: Option<Duration>,
}

/// Shortest hop counts between every source and each node reachable from it.
///
/// One row per graph node, in node registration order. Rows for isolated
/// nodes are empty. Built by [`pairwise_dist`] or from external entries via
/// [`DistanceTable::from_entries`].
#[derive(Debug, Clone)]
pub struct DistanceTable {
    labels: Arc<[String]>,
    index: Arc<HashMap<String, NodeId>>,
    rows: Vec<DistanceRow>,
}

impl DistanceTable {
    /// Build a table from `(source, target, hops)` entries.
    ///
    /// `nodes` fixes the row order; identifiers that only appear in entries
    /// are appended after them. Self-entries are dropped. A later entry for
    /// the same ordered pair replaces an earlier one. Symmetry is not
    /// required: `(a, b)` may be present while `(b, a)` is not.
    pub fn from_entries<N, E, S>(nodes: N, entries: E) -> Self
    where
        N: IntoIterator<Item = S>,
        E: IntoIterator<Item = (S, S, u32)>,
        S: AsRef<str>,
    {
        let mut labels: Vec<String> = Vec::new();
        let mut index: HashMap<String, NodeId> = HashMap::new();
        let mut rows: Vec<DistanceRow> = Vec::new();

        let mut intern = |name: &str, rows: &mut Vec<DistanceRow>| -> NodeId {
            if let Some(&id) = index.get(name) {
                return id;
            }
            let id = labels.len() as NodeId;
            labels.push(name.to_string());
            index.insert(name.to_string(), id);
            rows.push(DistanceRow::new());
            id
        };

        for n in nodes {
            intern(n.as_ref(), &mut rows);
        }
        for (a, b, hops) in entries {
            let a = intern(a.as_ref(), &mut rows);
            let b = intern(b.as_ref(), &mut rows);
            if a != b {
                rows[a as usize].insert(b, hops);
            }
        }

        Self {
            labels: labels.into(),
            index: Arc::new(index),
            rows,
        }
    }

    /// Number of rows (one per node).
    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of recorded ordered pairs.
    pub fn entry_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.labels.get(id as usize).map(String::as_str)
    }

    /// Row for `id`, or None if `id` is not a row of this table.
    pub fn row_ids(&self, id: NodeId) -> Option<&DistanceRow> {
        self.rows.get(id as usize)
    }

    /// Row for the node named `source`, keyed by target identifier.
    pub fn row(&self, source: &str) -> Result<HashMap<&str, u32>> {
        let id = self.resolve(source)?;
        Ok(self.rows[id as usize]
            .iter()
            .map(|(&t, &d)| (self.labels[t as usize].as_str(), d))
            .collect())
    }

    /// Recorded hop count from `a` to `b`; None if `b` is unreachable from `a`.
    pub fn distance(&self, a: &str, b: &str) -> Result<Option<u32>> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(self.rows[a as usize].get(&b).copied())
    }

    /// Rows by index, in node registration order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = (NodeId, &DistanceRow)> + '_ {
        self.rows.iter().enumerate().map(|(i, r)| (i as NodeId, r))
    }

    /// Every recorded `(source, target, hops)` triple.
    ///
    /// Sources follow node registration order; within a row targets are
    /// ordered by hop count, then by registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, u32)> + '_ {
        self.rows().flat_map(move |(source, row)| {
            let mut targets: Vec<(u32, NodeId)> = row.iter().map(|(&t, &d)| (d, t)).collect();
            targets.sort_unstable();
            let source = self.labels[source as usize].as_str();
            targets
                .into_iter()
                .map(move |(d, t)| (source, self.labels[t as usize].as_str(), d))
        })
    }

    fn resolve(&self, name: &str) -> Result<NodeId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))
    }
}

/// Fold the BFS discovery edges from `source` into a distance row.
///
/// A child one step from the source gets 1; any other child gets its
/// parent's distance plus one. BFS emits a node as a child only after its
/// parent was emitted (or is the source), so the parent's entry is always
/// present when it is read.
pub fn distance_row(graph: &Graph, source: NodeId) -> Result<DistanceRow> {
    let mut row = DistanceRow::new();
    for (parent, child) in BfsEdges::from_id(graph, source)? {
        let hops = if parent == source {
            1
        } else {
            row[&parent] + 1
        };
        row.insert(child, hops);
    }
    Ok(row)
}

/// All-pairs hop distances, one BFS per node, computed sequentially.
pub fn pairwise_dist(graph: &Graph) -> Result<DistanceTable> {
    pairwise_dist_with(graph, &PairwiseOptions::default())
}

/// All-pairs hop distances with rows computed in parallel.
///
/// The graph is read-only, so each row is independent; rows are merged
/// into the table in node order once all of them complete.
pub fn pairwise_dist_parallel(graph: &Graph) -> Result<DistanceTable> {
    pairwise_dist_with(
        graph,
        &PairwiseOptions {
            parallel: true,
            ..PairwiseOptions::default()
        },
    )
}

/// All-pairs hop distances under the given options.
///
/// O(V + E) per source, O(V·(V + E)) overall.
pub fn pairwise_dist_with(graph: &Graph, options: &PairwiseOptions) -> Result<DistanceTable> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    if let Some(limit) = options.max_nodes {
        if graph.node_count() > limit {
            return Err(GraphError::TooManyNodes {
                nodes: graph.node_count(),
                limit,
            });
        }
    }

    let started = Instant::now();
    let compute = |source: NodeId| -> Result<DistanceRow> {
        if let Some(limit) = options.deadline {
            if started.elapsed() >= limit {
                return Err(GraphError::DeadlineExceeded(limit));
            }
        }
        distance_row(graph, source)
    };

    let rows = if options.parallel {
        graph
            .node_ids()
            .into_par_iter()
            .map(compute)
            .collect::<Result<Vec<_>>>()?
    } else {
        graph.node_ids().map(compute).collect::<Result<Vec<_>>>()?
    };

    Ok(DistanceTable {
        labels: Arc::clone(graph.labels()),
        index: Arc::clone(graph.index()),
        rows,
    })
}
