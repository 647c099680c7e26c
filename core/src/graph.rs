use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{GraphError, Result};

/// Dense node index, assigned in registration order when the graph is built.
pub type NodeId = u32;

/// Mutable staging area for a [`Graph`].
///
/// Identifiers are interned on first sight. Duplicate edges (in either
/// orientation) are dropped, and self-loops register their node but store
/// no edge, so the frozen graph is always simple.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<Vec<NodeId>>,
    edges: HashSet<(NodeId, NodeId)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            labels: Vec::with_capacity(node_count),
            index: HashMap::with_capacity(node_count),
            adjacency: Vec::with_capacity(node_count),
            edges: HashSet::with_capacity(edge_count),
        }
    }

    /// Intern a node identifier, returning its dense index.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = NodeId::try_from(self.labels.len())
            .unwrap_or_else(|_| panic!("graph exceeded maximum of {} nodes", NodeId::MAX));
        self.labels.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    /// Add an undirected edge. Returns false if it was a duplicate or a self-loop.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        let u = self.add_node(a);
        let v = self.add_node(b);
        if u == v {
            return false;
        }
        if !self.edges.insert((u.min(v), u.max(v))) {
            return false;
        }
        self.adjacency[u as usize].push(v);
        self.adjacency[v as usize].push(u);
        true
    }

    /// Freeze into an immutable graph.
    pub fn build(self) -> Graph {
        Graph {
            labels: self.labels.into(),
            index: Arc::new(self.index),
            adjacency: self.adjacency.into_iter().map(Vec::into_boxed_slice).collect(),
            edge_count: self.edges.len(),
        }
    }
}

/// Immutable undirected interaction graph.
///
/// Adjacency is symmetric: `v` is a neighbor of `u` iff `u` is a neighbor
/// of `v`. Neighbor order is the order edges were registered, and that
/// order is the tie-break every traversal follows.
#[derive(Debug, Clone)]
pub struct Graph {
    labels: Arc<[String]>,
    index: Arc<HashMap<String, NodeId>>,
    adjacency: Vec<Box<[NodeId]>>,
    edge_count: usize,
}

impl Graph {
    /// Build from an edge list. Both endpoints are registered if absent.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for (a, b) in edges {
            builder.add_edge(a.as_ref(), b.as_ref());
        }
        builder.build()
    }

    /// Build from explicit nodes (registered first, so isolated nodes survive)
    /// followed by an edge list.
    pub fn from_parts<N, E, S>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = S>,
        E: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for n in nodes {
            builder.add_node(n.as_ref());
        }
        for (a, b) in edges {
            builder.add_edge(a.as_ref(), b.as_ref());
        }
        builder.build()
    }

    /// Look up the dense index of a node identifier.
    pub fn resolve(&self, name: &str) -> Result<NodeId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Resolve a dense index back to its identifier.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.labels.get(id as usize).map(String::as_str)
    }

    pub(crate) fn labels(&self) -> &Arc<[String]> {
        &self.labels
    }

    pub(crate) fn index(&self) -> &Arc<HashMap<String, NodeId>> {
        &self.index
    }

    /// Ordered neighbors of a node, by identifier.
    pub fn neighbors(&self, name: &str) -> Result<impl Iterator<Item = &str> + '_> {
        let id = self.resolve(name)?;
        Ok(self
            .neighbor_ids(id)
            .iter()
            .map(move |&n| self.labels[n as usize].as_str()))
    }

    /// Ordered neighbors of a node, by index. Unknown indices have no neighbors.
    pub fn neighbor_ids(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id as usize).map(|v| &v[..]).unwrap_or(&[])
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbor_ids(id).len()
    }

    /// All node identifiers in registration order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// All node indices in registration order.
    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        0..self.labels.len() as NodeId
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Subgraph induced by `keep`: the kept nodes and every edge between them.
    ///
    /// Identifiers not present in this graph are ignored. Node order and
    /// per-node neighbor order follow this graph, not the order of `keep`.
    pub fn induced_subgraph<I, S>(&self, keep: I) -> Graph
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = vec![false; self.node_count()];
        for name in keep {
            if let Some(&id) = self.index.get(name.as_ref()) {
                kept[id as usize] = true;
            }
        }
        self.retain(&kept)
    }

    /// Subgraph induced by a node mask indexed by [`NodeId`].
    pub(crate) fn retain(&self, kept: &[bool]) -> Graph {
        let mut remap: Vec<Option<NodeId>> = vec![None; self.node_count()];
        let mut labels = Vec::new();
        let mut index = HashMap::new();
        for id in self.node_ids() {
            if kept.get(id as usize).copied().unwrap_or(false) {
                let new_id = labels.len() as NodeId;
                remap[id as usize] = Some(new_id);
                let label = self.labels[id as usize].clone();
                index.insert(label.clone(), new_id);
                labels.push(label);
            }
        }

        let mut adjacency = Vec::with_capacity(labels.len());
        let mut endpoints = 0usize;
        for id in self.node_ids() {
            if remap[id as usize].is_none() {
                continue;
            }
            let row: Box<[NodeId]> = self
                .neighbor_ids(id)
                .iter()
                .filter_map(|&n| remap[n as usize])
                .collect();
            endpoints += row.len();
            adjacency.push(row);
        }

        Graph {
            labels: labels.into(),
            index: Arc::new(index),
            adjacency,
            edge_count: endpoints / 2,
        }
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let label_mem: usize = self.labels.iter().map(|l| l.len() + size_of::<String>()).sum();
        let index_mem = self.index.len() * (size_of::<String>() + size_of::<NodeId>() + 16);
        let adj_mem: usize = self
            .adjacency
            .iter()
            .map(|row| row.len() * size_of::<NodeId>() + size_of::<Box<[NodeId]>>())
            .sum();

        label_mem + index_mem + adj_mem
    }
}
