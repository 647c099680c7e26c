use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::slice;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId};

/// Breadth-first discovery edges from a single source.
///
/// Yields `(parent, child)` the moment `child` is first discovered, so every
/// node reachable from the source (other than the source itself) appears
/// exactly once as a child, and always after its parent has appeared as a
/// child (or is the source). An isolated source yields nothing.
///
/// The frontier holds `(node, cursor over its neighbors)`. The head cursor
/// is advanced one neighbor per step and the head is dropped once its cursor
/// is exhausted. Neighbors are visited in registration order.
///
/// Single pass: the traversal state is owned by the iterator and consumed
/// as it advances; there is no way to rewind it.
pub struct BfsEdges<'g> {
    graph: &'g Graph,
    visited: Vec<bool>,
    frontier: VecDeque<(NodeId, slice::Iter<'g, NodeId>)>,
}

impl<'g> BfsEdges<'g> {
    /// Start a traversal from a node index.
    pub fn from_id(graph: &'g Graph, source: NodeId) -> Result<Self> {
        if source as usize >= graph.node_count() {
            return Err(GraphError::NodeNotFound(format!("#{}", source)));
        }

        let mut visited = vec![false; graph.node_count()];
        visited[source as usize] = true;

        let mut frontier = VecDeque::new();
        frontier.push_back((source, graph.neighbor_ids(source).iter()));

        Ok(Self {
            graph,
            visited,
            frontier,
        })
    }

    /// Map emitted edges back to node identifiers.
    pub fn labeled(self) -> impl Iterator<Item = (&'g str, &'g str)> {
        let labels = self.graph.labels();
        self.map(move |(p, c)| (labels[p as usize].as_str(), labels[c as usize].as_str()))
    }
}

impl Iterator for BfsEdges<'_> {
    type Item = (NodeId, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (parent, next_child) = {
                let (parent, children) = self.frontier.front_mut()?;
                (*parent, children.next().copied())
            };

            match next_child {
                Some(child) => {
                    if self.visited[child as usize] {
                        continue;
                    }
                    self.visited[child as usize] = true;
                    self.frontier
                        .push_back((child, self.graph.neighbor_ids(child).iter()));
                    return Some((parent, child));
                }
                None => {
                    self.frontier.pop_front();
                }
            }
        }
    }
}

impl FusedIterator for BfsEdges<'_> {}

/// Breadth-first discovery edges from the node named `source`.
///
/// Fails with [`GraphError::NodeNotFound`] if `source` was never registered.
pub fn bfs_edges<'g>(graph: &'g Graph, source: &str) -> Result<BfsEdges<'g>> {
    let id = graph.resolve(source)?;
    BfsEdges::from_id(graph, id)
}
