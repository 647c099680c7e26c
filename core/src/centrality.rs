use crate::components::Ranking;
use crate::graph::Graph;

/// Degree information for a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeResult {
    pub node: String,
    pub degree: u32,
    /// Degree normalized by the largest possible degree, `n - 1`.
    pub centrality: f64,
}

/// Normalized degree centrality of every node: `degree / (n - 1)`.
///
/// A single-node graph scores 0. This is the default seed ranking for
/// component counting; other centralities are supplied externally.
pub fn degree_centrality(graph: &Graph) -> Ranking {
    let scale = normalizer(graph);
    graph
        .node_ids()
        .map(|id| {
            let name = graph.label(id).unwrap_or_default().to_string();
            (name, graph.degree(id) as f64 * scale)
        })
        .collect()
}

/// Return nodes ranked by degree.
///
/// If `top_n` is 0, returns all nodes. Otherwise returns the top N by
/// degree (descending). Ties are broken by identifier (ascending).
pub fn top_degree(graph: &Graph, top_n: usize) -> Vec<DegreeResult> {
    let scale = normalizer(graph);
    let mut results: Vec<DegreeResult> = graph
        .node_ids()
        .map(|id| {
            let degree = graph.degree(id) as u32;
            DegreeResult {
                node: graph.label(id).unwrap_or_default().to_string(),
                degree,
                centrality: f64::from(degree) * scale,
            }
        })
        .collect();

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.node.cmp(&b.node)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}

fn normalizer(graph: &Graph) -> f64 {
    if graph.node_count() > 1 {
        1.0 / (graph.node_count() - 1) as f64
    } else {
        0.0
    }
}
