use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use genenet_core::PairwiseOptions;
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, Result};

/// Run settings, read from a TOML file. Command-line flags override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Interaction edge list, one edge per line.
    #[serde(default)]
    pub edges: Option<PathBuf>,
    /// Genes of interest, one identifier per line. Unset = whole network.
    #[serde(default)]
    pub genes: Option<PathBuf>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Restrict analysis to the largest connected component of the gene subgraph.
    #[serde(default = "default_largest_component")]
    pub largest_component: bool,
    #[serde(default)]
    pub parallel: bool,
    /// Refuse all-pairs distances on graphs larger than this.
    #[serde(default)]
    pub max_nodes: Option<usize>,
    #[serde(default)]
    pub deadline_secs: Option<u64>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            edges: None,
            genes: None,
            delimiter: default_delimiter(),
            largest_component: default_largest_component(),
            parallel: false,
            max_nodes: None,
            deadline_secs: None,
            output_dir: default_output_dir(),
        }
    }
}

fn default_delimiter() -> char { '\t' }
fn default_largest_component() -> bool { true }
fn default_output_dir() -> PathBuf { PathBuf::from("results") }

impl Settings {
    /// Read settings from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        toml::from_str(&text).map_err(|source| LoadError::Config {
            source,
            path: path.to_path_buf(),
        })
    }

    pub fn pairwise_options(&self) -> PairwiseOptions {
        PairwiseOptions {
            parallel: self.parallel,
            max_nodes: self.max_nodes,
            deadline: self.deadline_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.delimiter, '\t');
        assert!(s.largest_component);
        assert!(!s.parallel);
        assert_eq!(s.output_dir, PathBuf::from("results"));
        assert_eq!(s.pairwise_options(), PairwiseOptions::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let s: Settings = toml::from_str("").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_load_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "edges = \"data/prot_interaction.tsv\"\n\
             delimiter = \",\"\n\
             largest_component = false\n\
             parallel = true\n\
             max_nodes = 5000\n\
             deadline_secs = 30"
        )
        .unwrap();

        let s = Settings::load(file.path()).unwrap();
        assert_eq!(s.edges, Some(PathBuf::from("data/prot_interaction.tsv")));
        assert_eq!(s.delimiter, ',');
        assert!(!s.largest_component);
        let opts = s.pairwise_options();
        assert!(opts.parallel);
        assert_eq!(opts.max_nodes, Some(5000));
        assert_eq!(opts.deadline, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_load_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_nodes = \"lots\"").unwrap();
        assert!(matches!(
            Settings::load(file.path()),
            Err(LoadError::Config { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Settings::load(&dir.path().join("nope.toml")),
            Err(LoadError::Io { .. })
        ));
    }
}
