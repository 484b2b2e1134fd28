use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use taskgraph::dataset::{generate, standard_specs};
use taskgraph::parser::save_dataset;

/// Writes the nine standard datasets into `dir` as JSON files.
pub fn run(dir: &Path, seed: u64) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating dataset directory {}", dir.display()))?;

    for spec in standard_specs() {
        let dataset = generate(&spec, seed);
        let path = dir.join(format!("{}.json", spec.name));
        save_dataset(&dataset, &path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!(
            "generated {}: {} nodes, {} edges",
            spec.name,
            dataset.graph.len(),
            dataset.graph.edge_count()
        );
    }

    Ok(())
}
