use anyhow::{Context, Result};
use serde::Deserialize;

use super::graph::{EdgeKind, LineageEdge, LineageGraph, LineageNode, NodeKind, Section};

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    generation: u32,
    #[serde(default, rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    date: String,
    #[serde(default)]
    wiki: Option<String>,
    #[serde(default)]
    sections: Option<Vec<RawSection>>,
    #[serde(default)]
    desc: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    #[serde(default)]
    title: String,
    #[serde(default, alias = "text")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    source: String,
    target: String,
    #[serde(default, rename = "type")]
    kind: EdgeKind,
    #[serde(default)]
    label: Option<String>,
}

pub(super) fn parse_dataset(raw: &str) -> Result<LineageGraph> {
    let dataset: RawDataset = serde_json::from_str(raw).context("invalid dataset JSON")?;

    let nodes = dataset
        .nodes
        .into_iter()
        .map(|raw_node| {
            let label = raw_node
                .label
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| raw_node.id.clone());
            let sections = raw_node
                .sections
                .unwrap_or_default()
                .into_iter()
                .map(|section| Section {
                    title: section.title,
                    content: section.content,
                })
                .collect();

            LineageNode {
                id: raw_node.id,
                label,
                generation: raw_node.generation,
                kind: raw_node.kind,
                date: raw_node.date,
                wiki: raw_node.wiki.filter(|wiki| !wiki.trim().is_empty()),
                sections,
                description: raw_node.desc.filter(|desc| !desc.trim().is_empty()),
            }
        })
        .collect();

    let edges = dataset
        .edges
        .into_iter()
        .map(|raw_edge| LineageEdge {
            source: raw_edge.source,
            target: raw_edge.target,
            kind: raw_edge.kind,
            label: raw_edge.label.filter(|label| !label.trim().is_empty()),
        })
        .collect();

    LineageGraph::new(nodes, edges).context("dataset failed validation")
}
