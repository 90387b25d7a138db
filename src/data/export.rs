use std::path::Path;

use anyhow::{Context, Result};

use super::model::Dataset;

/// Write the filtered rows back out as CSV with the source column names,
/// so the subset can feed the analysis notebook or another tool.
pub fn write_filtered_csv(dataset: &Dataset, indices: &[usize], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for &i in indices {
        writer
            .serialize(&dataset.orders[i])
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}
