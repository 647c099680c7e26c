use crate::distance::DistanceTable;
use crate::error::{GraphError, Result};

/// Mean shortest-path length over every measured unordered pair.
///
/// Each pair `{a, b}` counts once. When both directions are recorded the
/// smaller hop count is used; when only one is, that one is used. Pairs
/// with no recorded distance in either direction are skipped.
pub fn average_path(table: &DistanceTable) -> Result<f64> {
    if table.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    let mut total: u64 = 0;
    let mut pairs: u64 = 0;

    for (a, row) in table.rows() {
        for (&b, &hops) in row {
            let reverse = table.row_ids(b).and_then(|r| r.get(&a)).copied();
            let canonical = match reverse {
                // Both directions recorded: count the pair from its lower end only.
                Some(back) if a < b => hops.min(back),
                Some(_) => continue,
                None => hops,
            };
            total += u64::from(canonical);
            pairs += 1;
        }
    }

    if pairs == 0 {
        return Err(GraphError::NoMeasuredPairs);
    }
    Ok(total as f64 / pairs as f64)
}

/// Longest recorded shortest path. Empty rows (isolated nodes) are skipped.
pub fn diameter(table: &DistanceTable) -> Result<u32> {
    if table.is_empty() {
        return Err(GraphError::EmptyGraph);
    }

    table
        .rows()
        .filter_map(|(_, row)| row.values().copied().max())
        .max()
        .ok_or(GraphError::NoMeasuredPairs)
}
