use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use super::graph::LineageGraph;
use super::parse::parse_dataset;

const BUNDLED_DATASET: &str = include_str!("../../assets/lineage.json");

#[derive(Clone, Debug)]
pub enum DatasetSource {
    Bundled,
    File(PathBuf),
}

impl DatasetSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Bundled => "bundled dataset".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

pub fn load_dataset(source: &DatasetSource) -> Result<LineageGraph> {
    let graph = match source {
        DatasetSource::Bundled => {
            parse_dataset(BUNDLED_DATASET).context("failed to parse bundled dataset")?
        }
        DatasetSource::File(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read dataset {}", path.display()))?;
            parse_dataset(&raw)
                .with_context(|| format!("failed to parse dataset {}", path.display()))?
        }
    };

    info!(
        "loaded {} nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        source.describe()
    );

    let dangling = graph.dangling_edge_count();
    if dangling > 0 {
        warn!("{dangling} edges reference unknown node ids and will not be drawn");
    }

    Ok(graph)
}
