use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{LoadError, Result};

/// Read an interaction edge list: one edge per line, the first two
/// delimited columns are the endpoints. Blank lines are skipped.
pub fn read_edges(path: &Path, delimiter: char) -> Result<Vec<(String, String)>> {
    parse_edges(&read(path)?, delimiter)
}

pub fn parse_edges(text: &str, delimiter: char) -> Result<Vec<(String, String)>> {
    let mut edges = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split(delimiter).map(str::trim);
        match (fields.next(), fields.next()) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
                edges.push((a.to_string(), b.to_string()));
            }
            _ => {
                return Err(LoadError::MalformedEdge {
                    line: i + 1,
                    content: line.to_string(),
                })
            }
        }
    }
    Ok(edges)
}

/// Read a gene list: one identifier per line. Blank lines and repeats are dropped.
pub fn read_genes(path: &Path) -> Result<Vec<String>> {
    Ok(parse_genes(&read(path)?))
}

pub fn parse_genes(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .filter(|g| seen.insert(*g))
        .map(str::to_string)
        .collect()
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        source,
        path: path.to_path_buf(),
    })
}
