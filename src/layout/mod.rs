mod collision;
mod generations;
mod grid;
mod relax;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::Pos2;
use log::debug;
use serde::Deserialize;

use crate::lineage::LineageGraph;

pub use generations::GenerationIndex;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub iterations: usize,
    pub repulsion: f32,
    pub repulsion_softening: f32,
    pub repulsion_range: f32,
    pub band_tolerance: f32,
    pub spring: f32,
    pub damping: f32,
    pub collision_passes: usize,
    pub min_gap: f32,
    pub settle: bool,
    pub y_spacing: f32,
    pub y_offset: f32,
    pub spread_factor: f32,
    pub start_factor: f32,
    pub fallback_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 120,
            repulsion: 2000.0,
            repulsion_softening: 50.0,
            repulsion_range: 500.0,
            band_tolerance: 100.0,
            spring: 0.015,
            damping: 0.5,
            collision_passes: 3,
            min_gap: 450.0,
            settle: true,
            y_spacing: 180.0,
            y_offset: 100.0,
            spread_factor: 3.0,
            start_factor: -1.0,
            fallback_width: 1200.0,
        }
    }
}

impl LayoutConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid layout config {}", path.display()))
    }

    pub fn pinned_y(&self, generation: u32) -> f32 {
        generation as f32 * self.y_spacing + self.y_offset
    }

    pub fn effective_width(&self, width: f32) -> f32 {
        if width.is_finite() && width > 0.0 {
            width
        } else {
            self.fallback_width
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Body {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    generation: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    pub positions: Vec<Pos2>,
    pub width: f32,
}

impl LayoutResult {
    pub fn min_sibling_gap(&self, index: &GenerationIndex) -> Option<f32> {
        index
            .iter()
            .filter_map(|(_generation, members)| {
                let mut xs = members
                    .iter()
                    .map(|&member| self.positions[member].x)
                    .collect::<Vec<_>>();
                xs.sort_by(f32::total_cmp);
                xs.windows(2).map(|pair| pair[1] - pair[0]).reduce(f32::min)
            })
            .reduce(f32::min)
    }
}

pub fn run_layout(graph: &LineageGraph, width: f32, config: &LayoutConfig) -> LayoutResult {
    let index = GenerationIndex::build(&graph.nodes);
    let width = config.effective_width(width);

    let mut bodies = grid::initial_bodies(&graph.nodes, &index, width, config);
    let springs = graph
        .resolved_edges()
        .into_iter()
        .map(|edge| (edge.source, edge.target))
        .collect::<Vec<_>>();

    relax::relax(&mut bodies, &springs, config);
    let residual = collision::resolve_collisions(&mut bodies, &index, config);
    if residual > 0 {
        debug!(
            "{residual} sibling gaps still under {} after {} collision passes",
            config.min_gap, config.collision_passes
        );
    }

    let result = LayoutResult {
        positions: bodies.iter().map(|body| Pos2::new(body.x, body.y)).collect(),
        width,
    };

    debug!(
        "laid out {} nodes across {} generations at width {width:.0}",
        graph.node_count(),
        index.generation_count()
    );
    if let Some(gap) = result.min_sibling_gap(&index) {
        debug!("smallest sibling gap {gap:.1}");
    }

    result
}
