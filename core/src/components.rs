use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId};
use crate::traversal::BfsEdges;

/// Externally supplied per-node score (e.g. degree centrality), keyed by identifier.
pub type Ranking = HashMap<String, f64>;

/// Disjoint node sets covering the whole graph; two nodes share a set iff
/// a path connects them.
#[derive(Debug, Clone)]
pub struct ComponentPartition {
    labels: Arc<[String]>,
    index: Arc<HashMap<String, NodeId>>,
    /// Component number of each node, indexed by NodeId.
    assignment: Vec<usize>,
    /// Members of each component in discovery order; the first is its seed.
    members: Vec<Vec<NodeId>>,
}

impl ComponentPartition {
    /// Number of components.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members of every component by identifier, in discovery order.
    pub fn components(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.members.iter().map(move |m| {
            m.iter()
                .map(|&id| self.labels[id as usize].as_str())
                .collect()
        })
    }

    /// Members of one component by index.
    pub fn member_ids(&self, component: usize) -> &[NodeId] {
        self.members.get(component).map(|m| &m[..]).unwrap_or(&[])
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.members.iter().map(Vec::len).collect()
    }

    /// Component number of the node named `name`.
    pub fn component_of(&self, name: &str) -> Result<usize> {
        let id = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))?;
        Ok(self.assignment[id as usize])
    }

    pub fn same_component(&self, a: &str, b: &str) -> Result<bool> {
        Ok(self.component_of(a)? == self.component_of(b)?)
    }

    /// Index of the component with the most nodes; ties go to the one discovered first.
    pub fn largest(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (i, m) in self.members.iter().enumerate() {
            if best.map_or(true, |(_, size)| m.len() > size) {
                best = Some((i, m.len()));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Pick the node with the highest score as the first component seed.
///
/// Ties are broken by identifier, smallest first. Ranking entries naming
/// nodes outside the graph, and NaN scores, are ignored. If no graph node
/// is ranked the first registered node is used.
pub fn select_seed(graph: &Graph, ranking: &Ranking) -> Result<NodeId> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    let mut best: Option<(&str, f64, NodeId)> = None;
    for (name, &score) in ranking {
        if score.is_nan() {
            continue;
        }
        let Ok(id) = graph.resolve(name) else { continue };
        let better = match best {
            None => true,
            Some((best_name, best_score, _)) => match score.total_cmp(&best_score) {
                Ordering::Greater => true,
                Ordering::Equal => name.as_str() < best_name,
                Ordering::Less => false,
            },
        };
        if better {
            best = Some((name.as_str(), score, id));
        }
    }

    Ok(best.map_or(0, |(_, _, id)| id))
}

/// Partition the graph into connected components.
///
/// The first component is grown from the top-ranked node (see
/// [`select_seed`]). Every further component is grown from the
/// lowest-indexed node not yet reached. Each component includes its seed,
/// so a seed with no edges still counts as a component of one.
pub fn connected_components(graph: &Graph, ranking: &Ranking) -> Result<ComponentPartition> {
    let seed = select_seed(graph, ranking)?;

    let mut unvisited = vec![true; graph.node_count()];
    let mut remaining = graph.node_count();
    let mut assignment = vec![0usize; graph.node_count()];
    let mut members: Vec<Vec<NodeId>> = Vec::new();
    let mut cursor = 0usize;
    let mut next = seed;

    loop {
        let component = members.len();
        let mut reached = vec![next];
        reached.extend(BfsEdges::from_id(graph, next)?.map(|(_, child)| child));

        for &id in &reached {
            unvisited[id as usize] = false;
            assignment[id as usize] = component;
        }
        remaining -= reached.len();
        members.push(reached);

        if remaining == 0 {
            break;
        }
        while !unvisited[cursor] {
            cursor += 1;
        }
        next = cursor as NodeId;
    }

    Ok(ComponentPartition {
        labels: Arc::clone(graph.labels()),
        index: Arc::clone(graph.index()),
        assignment,
        members,
    })
}

/// Number of connected components.
pub fn num_components(graph: &Graph, ranking: &Ranking) -> Result<usize> {
    Ok(connected_components(graph, ranking)?.len())
}

/// Subgraph induced by the component with the most nodes.
///
/// Components are discovered from the lowest-indexed node, so among equally
/// large components the one holding the earliest-registered node wins.
pub fn largest_component(graph: &Graph) -> Result<Graph> {
    let partition = connected_components(graph, &Ranking::new())?;
    let mut kept = vec![false; graph.node_count()];
    if let Some(largest) = partition.largest() {
        for &id in partition.member_ids(largest) {
            kept[id as usize] = true;
        }
    }
    Ok(graph.retain(&kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::pairwise_dist;

    /// `k` disjoint cliques of `size` nodes each (size 1 = isolated node).
    fn make_cliques(k: usize, size: usize) -> Graph {
        let nodes: Vec<String> = (0..k)
            .flat_map(|c| (0..size).map(move |i| format!("c{}_{}", c, i)))
            .collect();
        let mut edges = Vec::new();
        for c in 0..k {
            for i in 0..size {
                for j in (i + 1)..size {
                    edges.push((format!("c{}_{}", c, i), format!("c{}_{}", c, j)));
                }
            }
        }
        Graph::from_parts(
            nodes.iter().map(String::as_str),
            edges.iter().map(|(a, b)| (a.as_str(), b.as_str())),
        )
    }

    fn rank(pairs: &[(&str, f64)]) -> Ranking {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_two_components() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("D", "E")]);
        assert_eq!(num_components(&g, &Ranking::new()).unwrap(), 2);
        assert_eq!(num_components(&g, &rank(&[("E", 5.0)])).unwrap(), 2);
    }

    #[test]
    fn test_k_cliques() {
        for size in 1..=4 {
            for k in 1..=6 {
                let g = make_cliques(k, size);
                assert_eq!(
                    num_components(&g, &Ranking::new()).unwrap(),
                    k,
                    "k={} size={}",
                    k,
                    size
                );
            }
        }
    }

    #[test]
    fn test_single_isolated_node() {
        let g = Graph::from_parts(["X"], Vec::<(&str, &str)>::new());
        assert_eq!(num_components(&g, &rank(&[("X", 0.0)])).unwrap(), 1);
    }

    #[test]
    fn test_isolated_seed_counted_once() {
        // The top-ranked seed has no edges, so its BFS emits nothing.
        let g = Graph::from_parts(["lonely", "A", "B"], [("A", "B")]);
        let p = connected_components(&g, &rank(&[("lonely", 10.0), ("A", 1.0)])).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.components().next().unwrap(), vec!["lonely"]);
    }

    #[test]
    fn test_count_independent_of_seed() {
        let g = make_cliques(4, 3);
        let names: Vec<String> = g.nodes().map(str::to_string).collect();
        for name in &names {
            let r = rank(&[(name.as_str(), 1.0)]);
            assert_eq!(num_components(&g, &r).unwrap(), 4);
        }
    }

    #[test]
    fn test_partition_covers_every_node_once() {
        let g = Graph::from_parts(["Z"], [("A", "B"), ("C", "D"), ("D", "E"), ("B", "F")]);
        let p = connected_components(&g, &Ranking::new()).unwrap();
        let mut seen: Vec<&str> = p.components().flatten().collect();
        seen.sort_unstable();
        let mut all: Vec<&str> = g.nodes().collect();
        all.sort_unstable();
        assert_eq!(seen, all);
        assert_eq!(p.sizes().iter().sum::<usize>(), g.node_count());
    }

    #[test]
    fn test_same_component_iff_path() {
        let g = Graph::from_parts(["Z"], [("A", "B"), ("C", "D"), ("D", "E"), ("B", "F")]);
        let p = connected_components(&g, &Ranking::new()).unwrap();
        let table = pairwise_dist(&g).unwrap();
        for a in g.nodes() {
            for b in g.nodes() {
                if a == b {
                    continue;
                }
                let connected = table.distance(a, b).unwrap().is_some();
                assert_eq!(p.same_component(a, b).unwrap(), connected, "{} {}", a, b);
            }
        }
    }

    #[test]
    fn test_select_seed_highest_score() {
        let g = Graph::from_edges([("A", "B"), ("B", "C")]);
        let seed = select_seed(&g, &rank(&[("A", 0.5), ("B", 1.0), ("C", 0.5)])).unwrap();
        assert_eq!(g.label(seed), Some("B"));
    }

    #[test]
    fn test_select_seed_tie_breaks_by_identifier() {
        let g = Graph::from_edges([("C", "B"), ("B", "A")]);
        let seed = select_seed(&g, &rank(&[("C", 1.0), ("A", 1.0), ("B", 1.0)])).unwrap();
        assert_eq!(g.label(seed), Some("A"));
    }

    #[test]
    fn test_select_seed_ignores_unknown_and_nan() {
        let g = Graph::from_edges([("A", "B")]);
        let r = rank(&[("GHOST", 99.0), ("A", f64::NAN), ("B", 0.1)]);
        assert_eq!(g.label(select_seed(&g, &r).unwrap()), Some("B"));
    }

    #[test]
    fn test_select_seed_unranked_falls_back_to_first() {
        let g = Graph::from_edges([("Q", "R")]);
        assert_eq!(select_seed(&g, &Ranking::new()).unwrap(), 0);
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::from_edges(Vec::<(&str, &str)>::new());
        assert_eq!(num_components(&g, &Ranking::new()).err(), Some(GraphError::EmptyGraph));
        assert_eq!(largest_component(&g).err(), Some(GraphError::EmptyGraph));
    }

    #[test]
    fn test_largest_component() {
        let g = Graph::from_edges([("A", "B"), ("C", "D"), ("D", "E"), ("E", "C")]);
        let largest = largest_component(&g).unwrap();
        assert_eq!(largest.nodes().collect::<Vec<_>>(), vec!["C", "D", "E"]);
        assert_eq!(largest.edge_count(), 3);
    }

    #[test]
    fn test_largest_component_tie_prefers_first() {
        let g = Graph::from_edges([("A", "B"), ("C", "D")]);
        let largest = largest_component(&g).unwrap();
        assert_eq!(largest.nodes().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_component_of_unknown() {
        let g = Graph::from_edges([("A", "B")]);
        let p = connected_components(&g, &Ranking::new()).unwrap();
        assert!(p.component_of("nope").is_err());
    }
}
