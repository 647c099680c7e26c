//! genenet - network analysis of a gene-of-interest subgraph.
//!
//! Reads a protein interaction edge list and a list of genes of interest,
//! restricts the network to those genes (and by default to the largest
//! connected component of that subgraph), then reports connectivity,
//! diameter and average shortest path length.
//!
//! # Examples
//!
//! ```bash
//! genenet analyze --edges data/prot_interaction.tsv --genes data/tcga_genes.txt
//! genenet analyze --config genenet.toml --parallel --max-nodes 5000
//! genenet degree --edges data/prot_interaction.tsv --top 20
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use genenet_core::{Graph, NetworkSummary};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod load;
mod report;

use config::Settings;

#[derive(Parser)]
#[command(name = "genenet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML settings file; flags override its values
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Components, pairwise distances, diameter and average path length
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Analyze every component instead of only the largest
        #[arg(long)]
        all_components: bool,

        /// Compute distance rows on all cores
        #[arg(long)]
        parallel: bool,

        /// Refuse pairwise distances above this many nodes
        #[arg(long, value_name = "N")]
        max_nodes: Option<usize>,

        /// Abandon pairwise distances after this many seconds
        #[arg(long, value_name = "SECS")]
        deadline_secs: Option<u64>,

        /// Directory for distances.tsv, degreeRounded.tsv and summary.json
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Rank nodes of the (sub)network by degree centrality
    Degree {
        #[command(flatten)]
        input: InputArgs,

        /// Number of nodes to list (0 = all)
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Interaction edge list, one edge per line
    #[arg(short, long, value_name = "FILE")]
    edges: Option<PathBuf>,

    /// Genes of interest, one per line
    #[arg(short, long, value_name = "FILE")]
    genes: Option<PathBuf>,

    /// Column delimiter of the edge list
    #[arg(short, long)]
    delimiter: Option<char>,
}

impl InputArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(edges) = &self.edges {
            settings.edges = Some(edges.clone());
        }
        if let Some(genes) = &self.genes {
            settings.genes = Some(genes.clone());
        }
        if let Some(d) = self.delimiter {
            settings.delimiter = d;
        }
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the edge list and narrow it to the genes of interest.
fn load_network(settings: &Settings) -> anyhow::Result<Graph> {
    let Some(edges_path) = &settings.edges else {
        bail!("no edge list given; pass --edges or set `edges` in the settings file");
    };

    let edges = load::read_edges(edges_path, settings.delimiter)
        .with_context(|| format!("failed to import interactions from {}", edges_path.display()))?;
    info!(edges = edges.len(), path = %edges_path.display(), "imported protein interaction pairs");

    let network = Graph::from_edges(edges);
    info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "built interaction network"
    );

    let Some(genes_path) = &settings.genes else {
        return Ok(network);
    };
    let genes = load::read_genes(genes_path)
        .with_context(|| format!("failed to import genes from {}", genes_path.display()))?;
    let subgraph = network.induced_subgraph(&genes);
    info!(
        requested = genes.len(),
        matched = subgraph.node_count(),
        edges = subgraph.edge_count(),
        "built gene subgraph"
    );
    if subgraph.node_count() < genes.len() {
        warn!(
            missing = genes.len() - subgraph.node_count(),
            "some genes of interest are absent from the interaction network"
        );
    }
    Ok(subgraph)
}

fn run_analyze(settings: Settings) -> anyhow::Result<()> {
    let mut graph = load_network(&settings)?;
    if settings.largest_component {
        graph = genenet_core::largest_component(&graph)
            .context("cannot take the largest component of an empty subgraph")?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "restricted to largest component"
        );
    }

    let ranking = genenet_core::degree_centrality(&graph);
    let run = genenet_core::analyze(&graph, &ranking, &settings.pairwise_options())
        .context("network analysis failed")?;

    let dir = &settings.output_dir;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let distances_path = dir.join("distances.tsv");
    report::write_distances(&distances_path, &run.distances)
        .with_context(|| format!("failed to write {}", distances_path.display()))?;
    let scores_path = report::write_scores(dir, "degree", &ranking)
        .with_context(|| format!("failed to write degree scores in {}", dir.display()))?;
    let summary_path = dir.join("summary.json");
    report::write_summary(&summary_path, &run.summary)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;
    info!(
        distances = %distances_path.display(),
        scores = %scores_path.display(),
        summary = %summary_path.display(),
        "wrote results"
    );

    print_summary(&run.summary);
    Ok(())
}

fn run_degree(settings: Settings, top: usize) -> anyhow::Result<()> {
    let graph = load_network(&settings)?;
    let ranked = genenet_core::top_degree(&graph, top);

    println!("{:<20} {:>8} {:>10}", "node", "degree", "centrality");
    println!("{:-<20} {:->8} {:->10}", "", "", "");
    for r in ranked {
        println!("{:<20} {:>8} {:>10.4}", r.node, r.degree, r.centrality);
    }
    Ok(())
}

fn print_summary(summary: &NetworkSummary) {
    println!("There are {} nodes and {} edges in the analyzed network.", summary.nodes, summary.edges);
    println!("There are {} components in the subgraph.", summary.components);
    match (summary.average_path, summary.diameter) {
        (Some(avg), Some(d)) => {
            println!("The average shortest path of the subgraph is {:.3}", avg);
            println!("The diameter of the subgraph is {}", d);
        }
        _ => println!("No two nodes are connected; diameter and average path are undefined."),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let settings = match &cli.config {
        Some(path) => match Settings::load(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let result = match cli.command {
        Commands::Analyze {
            input,
            all_components,
            parallel,
            max_nodes,
            deadline_secs,
            output_dir,
        } => {
            let mut settings = settings;
            input.apply(&mut settings);
            if all_components {
                settings.largest_component = false;
            }
            settings.parallel |= parallel;
            settings.max_nodes = max_nodes.or(settings.max_nodes);
            settings.deadline_secs = deadline_secs.or(settings.deadline_secs);
            if let Some(dir) = output_dir {
                settings.output_dir = dir;
            }
            run_analyze(settings)
        }

        Commands::Degree { input, top } => {
            let mut settings = settings;
            input.apply(&mut settings);
            run_degree(settings, top)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_flags_parse() {
        let cli = Cli::try_parse_from([
            "genenet",
            "analyze",
            "--edges",
            "e.tsv",
            "--genes",
            "g.txt",
            "--parallel",
            "--max-nodes",
            "100",
            "--all-components",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                input,
                all_components,
                parallel,
                max_nodes,
                ..
            } => {
                assert_eq!(input.edges, Some(PathBuf::from("e.tsv")));
                assert!(all_components);
                assert!(parallel);
                assert_eq!(max_nodes, Some(100));
            }
            Commands::Degree { .. } => panic!("parsed wrong subcommand"),
        }
    }

    #[test]
    fn test_input_overrides_settings() {
        let mut settings = Settings {
            edges: Some(PathBuf::from("from_file.tsv")),
            ..Settings::default()
        };
        let input = InputArgs {
            edges: None,
            genes: Some(PathBuf::from("genes.txt")),
            delimiter: Some(','),
        };
        input.apply(&mut settings);
        assert_eq!(settings.edges, Some(PathBuf::from("from_file.tsv")));
        assert_eq!(settings.genes, Some(PathBuf::from("genes.txt")));
        assert_eq!(settings.delimiter, ',');
    }

    #[test]
    fn test_load_network_subgraph() {
        let dir = tempfile::tempdir().unwrap();
        let edges = dir.path().join("edges.tsv");
        let genes = dir.path().join("genes.txt");
        fs::write(&edges, "A\tB\nB\tC\nC\tD\nD\tE\n").unwrap();
        fs::write(&genes, "A\nB\nD\nE\nNOT_IN_NETWORK\n").unwrap();

        let settings = Settings {
            edges: Some(edges),
            genes: Some(genes),
            ..Settings::default()
        };
        let g = load_network(&settings).unwrap();
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["A", "B", "D", "E"]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_load_network_requires_edges() {
        assert!(load_network(&Settings::default()).is_err());
    }

    #[test]
    fn test_run_analyze_writes_results() {
        let dir = tempfile::tempdir().unwrap();
        let edges = dir.path().join("edges.tsv");
        fs::write(&edges, "A\tB\nB\tC\nD\tE\n").unwrap();
        let out = dir.path().join("out");

        let settings = Settings {
            edges: Some(edges),
            output_dir: out.clone(),
            ..Settings::default()
        };
        run_analyze(settings).unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["nodes"], 3);
        assert_eq!(summary["components"], 1);
        assert_eq!(summary["diameter"], 2);
        assert!(out.join("distances.tsv").exists());
        assert!(out.join("degreeRounded.tsv").exists());
    }
}
