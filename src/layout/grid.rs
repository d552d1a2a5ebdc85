use crate::lineage::LineageNode;

use super::{Body, GenerationIndex, LayoutConfig};

pub(super) fn slot_x(count: usize, slot: usize, width: f32, config: &LayoutConfig) -> f32 {
    if count == 1 {
        return width / 2.0;
    }

    let available = width * config.spread_factor;
    let start = width * config.start_factor;
    let step = available / (count + 1) as f32;
    start + step * (slot + 1) as f32
}

pub(super) fn initial_bodies(
    nodes: &[LineageNode],
    index: &GenerationIndex,
    width: f32,
    config: &LayoutConfig,
) -> Vec<Body> {
    let mut bodies = vec![Body::default(); nodes.len()];

    for (generation, members) in index.iter() {
        let y = config.pinned_y(generation);
        for (slot, &member) in members.iter().enumerate() {
            bodies[member] = Body {
                x: slot_x(members.len(), slot, width, config),
                y,
                vx: 0.0,
                vy: 0.0,
                generation,
            };
        }
    }

    bodies
}
