use genenet_core::{Graph, GraphBuilder, PairwiseOptions, Ranking};
use std::collections::VecDeque;
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: genenet-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!("  islands     Many small disjoint modules plus isolated genes");
        println!();
        println!("Default node_count: 2000 (all-pairs output grows with node_count²)");
        return;
    }

    println!("genenet-bench");
    println!("=============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "islands" => vec![("Islands (disjoint modules)", gen_islands)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> Graph),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("Islands (disjoint modules)", gen_islands),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} nodes, {} edges, ~{:.1}MB",
        gen_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // Single full BFS from the first registered node
    let t = Instant::now();
    let reached = genenet_core::BfsEdges::from_id(&graph, 0).map(|bfs| bfs.count()).unwrap_or(0);
    println!(
        "BFS from node 0: {} nodes reached in {:.2}ms",
        reached,
        t.elapsed().as_secs_f64() * 1000.0
    );

    let ranking: Ranking = genenet_core::degree_centrality(&graph);
    let t = Instant::now();
    match genenet_core::num_components(&graph, &ranking) {
        Ok(c) => println!(
            "Components: {} in {:.2}ms",
            c,
            t.elapsed().as_secs_f64() * 1000.0
        ),
        Err(e) => println!("Components: {}", e),
    }

    println!();
    println!("{:>10} {:>14} {:>10} {:>10} {:>10}", "mode", "entries", "diameter", "avg path", "time");
    println!("{:->10} {:->14} {:->10} {:->10} {:->10}", "", "", "", "", "");

    for parallel in [false, true] {
        let opts = PairwiseOptions {
            parallel,
            ..PairwiseOptions::default()
        };
        let t = Instant::now();
        let table = match genenet_core::pairwise_dist_with(&graph, &opts) {
            Ok(table) => table,
            Err(e) => {
                println!("{:>10} {}", if parallel { "parallel" } else { "serial" }, e);
                continue;
            }
        };
        let elapsed = t.elapsed();
        let diameter = genenet_core::diameter(&table)
            .map(|d| d.to_string())
            .unwrap_or_else(|_| "-".into());
        let avg = genenet_core::average_path(&table)
            .map(|a| format!("{:.3}", a))
            .unwrap_or_else(|_| "-".into());
        println!(
            "{:>10} {:>14} {:>10} {:>10} {:>8.1}ms",
            if parallel { "parallel" } else { "serial" },
            table.entry_count(),
            diameter,
            avg,
            elapsed.as_secs_f64() * 1000.0
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Gene-symbol-like identifier for synthetic node `i`.
fn gene(i: u64) -> String {
    format!("G{:06}", i)
}

fn link(b: &mut GraphBuilder, u: u64, v: u64) {
    b.add_edge(&gene(u), &gene(v));
}

/// L-system fractal tree: deep branching with self-similar structure.
///
/// Each node spawns `branching` children. Produces deep paths (log depth)
/// with exponential width. Large diameter relative to node count.
fn gen_lsystem(node_count: u64) -> Graph {
    let mut b = GraphBuilder::with_capacity(node_count as usize, node_count as usize);
    let branching = 3u64;
    b.add_node(&gene(0));

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                link(&mut b, parent, child);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    b.build()
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint.
/// Nodes with more edges are more likely to be picked, giving the
/// hub-dominated degree distribution typical of interaction networks.
fn gen_scale_free(node_count: u64) -> Graph {
    let edges_per_node = 4u64;
    let mut b = GraphBuilder::with_capacity(node_count as usize, (node_count * edges_per_node) as usize);
    let mut rng = FastRng::new(12345);

    let mut edge_endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(node_count);
    for i in 0..seed {
        b.add_node(&gene(i));
    }
    for i in 0..seed {
        for j in (i + 1)..seed {
            link(&mut b, i, j);
            edge_endpoints.push(i);
            edge_endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        b.add_node(&gene(new_node));
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            let idx = rng.next(edge_endpoints.len() as u64) as usize;
            let target = edge_endpoints[idx];
            if target != new_node {
                link(&mut b, new_node, target);
                edge_endpoints.push(new_node);
                edge_endpoints.push(target);
            }
        }
    }

    b.build()
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
fn gen_small_world(node_count: u64) -> Graph {
    let k = 4u64; // neighbors on each side
    let p = 0.05f64; // rewire probability
    let mut b = GraphBuilder::with_capacity(node_count as usize, (node_count * k) as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        b.add_node(&gene(i));
    }

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                link(&mut b, i, if rewired != i { rewired } else { neighbor });
            } else {
                link(&mut b, i, neighbor);
            }
        }
    }

    b.build()
}

/// Erdos-Renyi: uniform random edges, ~3 per node.
///
/// Sparse enough to leave a few small components and isolated nodes.
fn gen_random(node_count: u64) -> Graph {
    let target_edges = node_count * 3 / 2;
    let mut b = GraphBuilder::with_capacity(node_count as usize, target_edges as usize);
    let mut rng = FastRng::new(54321);

    for i in 0..node_count {
        b.add_node(&gene(i));
    }
    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        link(&mut b, from, to);
    }

    b.build()
}

/// Barbell: two dense clusters connected by a thin bridge.
///
/// The bridge stretches the diameter far beyond the average path.
fn gen_barbell(node_count: u64) -> Graph {
    let bridge_len = 10u64.min(node_count / 2);
    let clique_size = (node_count - bridge_len) / 2;
    let mut b = GraphBuilder::with_capacity(node_count as usize, (clique_size * 20) as usize);
    let mut rng = FastRng::new(99999);

    let mut cluster = |b: &mut GraphBuilder, start: u64| {
        for i in 0..clique_size {
            b.add_node(&gene(start + i));
        }
        for i in 0..clique_size {
            for _ in 0..10u64.min(clique_size.saturating_sub(1)) {
                let target = rng.next(clique_size);
                link(b, start + i, start + target);
            }
        }
    };

    cluster(&mut b, 0);

    // Bridge chain from the last node of A to the first node of B
    let bridge_start = clique_size;
    let mut prev = clique_size.saturating_sub(1);
    for i in 0..bridge_len {
        let id = bridge_start + i;
        link(&mut b, prev, id);
        prev = id;
    }

    let b_start = bridge_start + bridge_len;
    cluster(&mut b, b_start);
    if clique_size > 0 {
        link(&mut b, prev, b_start);
    }

    b.build()
}

/// Islands: many small modules with no links between them, plus isolated genes.
///
/// Stresses component counting; most distance rows are short.
fn gen_islands(node_count: u64) -> Graph {
    let mut b = GraphBuilder::with_capacity(node_count as usize, node_count as usize);
    let mut rng = FastRng::new(77777);

    // Recent module members, so each new node attaches inside its module
    let mut module: VecDeque<u64> = VecDeque::with_capacity(16);

    for new_node in 0..node_count {
        b.add_node(&gene(new_node));
        match rng.next(20) {
            // 5%: isolated gene, ends the current module
            0 => module.clear(),
            // 5%: start a new module
            1 => {
                module.clear();
                module.push_back(new_node);
            }
            _ => {
                if !module.is_empty() {
                    let attach_to = module[rng.next(module.len() as u64) as usize];
                    link(&mut b, new_node, attach_to);
                }
                module.push_back(new_node);
                if module.len() > 12 {
                    module.pop_front();
                }
            }
        }
    }

    b.build()
}
