use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use genenet_core::{DistanceTable, NetworkSummary, Ranking};

/// Write a score table to `<dir>/<name>Rounded.tsv`: `node<TAB>score`,
/// highest score first (ties by identifier), scores rounded to 4 places.
pub fn write_scores(dir: &Path, name: &str, scores: &Ranking) -> io::Result<PathBuf> {
    let path = dir.join(format!("{}Rounded.tsv", name));
    let mut sorted: Vec<(&str, f64)> = scores.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut out = BufWriter::new(File::create(&path)?);
    for (node, score) in sorted {
        writeln!(out, "{}\t{}", node, round4(score))?;
    }
    out.flush()?;
    Ok(path)
}

/// Write every recorded distance as `source<TAB>target<TAB>hops`.
pub fn write_distances(path: &Path, table: &DistanceTable) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (source, target, hops) in table.entries() {
        writeln!(out, "{}\t{}\t{}", source, target, hops)?;
    }
    out.flush()
}

pub fn write_summary(path: &Path, summary: &NetworkSummary) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, summary)?;
    writeln!(out)?;
    out.flush()
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
