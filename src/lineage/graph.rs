use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Cynic,
    Academy,
    Stoic,
    Rival,
    Roman,
    Modern,
    Renegade,
    #[default]
    #[serde(other)]
    Other,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Cynic => "cynic",
            Self::Academy => "academy",
            Self::Stoic => "stoic",
            Self::Rival => "rival",
            Self::Roman => "roman",
            Self::Modern => "modern",
            Self::Renegade => "renegade",
            Self::Other => "other",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Rival,
    Influence,
    Dotted,
    #[default]
    #[serde(other)]
    Student,
}

impl EdgeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Rival => "rival",
            Self::Influence => "influence",
            Self::Dotted => "dotted",
        }
    }

    pub fn is_dashed(self) -> bool {
        matches!(self, Self::Rival | Self::Influence | Self::Dotted)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: String,
}

#[derive(Clone, Debug)]
pub struct LineageNode {
    pub id: String,
    pub label: String,
    pub generation: u32,
    pub kind: NodeKind,
    pub date: String,
    pub wiki: Option<String>,
    pub sections: Vec<Section>,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LineageEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub label: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedEdge {
    pub edge: usize,
    pub source: usize,
    pub target: usize,
}

impl ResolvedEdge {
    pub fn touches(&self, node: usize) -> bool {
        self.source == node || self.target == node
    }

    pub fn other_end(&self, node: usize) -> Option<usize> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct LineageGraph {
    pub nodes: Vec<LineageNode>,
    pub edges: Vec<LineageEdge>,
    index_by_id: HashMap<String, usize>,
}

impl LineageGraph {
    pub fn new(nodes: Vec<LineageNode>, edges: Vec<LineageEdge>) -> Result<Self> {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if index_by_id.insert(node.id.clone(), index).is_some() {
                bail!("duplicate node id `{}` in dataset", node.id);
            }
        }

        Ok(Self {
            nodes,
            edges,
            index_by_id,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn resolved_edges(&self) -> Vec<ResolvedEdge> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(edge, record)| {
                Some(ResolvedEdge {
                    edge,
                    source: self.index_of(&record.source)?,
                    target: self.index_of(&record.target)?,
                })
            })
            .collect()
    }

    pub fn dangling_edge_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|edge| self.index_of(&edge.source).is_none() || self.index_of(&edge.target).is_none())
            .count()
    }

    pub fn find_by_label(&self, query: &str) -> Option<usize> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.nodes
            .iter()
            .position(|node| node.label.to_lowercase().contains(&query))
    }
}
