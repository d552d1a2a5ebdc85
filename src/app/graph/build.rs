use log::{Level, log};

use crate::layout::run_layout;

use super::super::{RenderGraph, ViewModel};

const RELAYOUT_WIDTH_EPSILON: f32 = 0.5;

impl ViewModel {
    pub(in crate::app) fn needs_layout(&self, width: f32) -> bool {
        self.graph_cache
            .as_ref()
            .is_none_or(|cache| (cache.layout_width - width).abs() > RELAYOUT_WIDTH_EPSILON)
    }

    fn layout_log_level(&self) -> Level {
        if self.graph_cache.is_none() {
            Level::Info
        } else {
            Level::Debug
        }
    }

    pub(in crate::app) fn rebuild_layout(&mut self, width: f32) {
        let result = run_layout(&self.graph, width, &self.layout_config);
        log!(
            self.layout_log_level(),
            "laid out {} nodes at width {:.0}",
            self.graph.node_count(),
            result.width
        );

        self.graph_cache = Some(RenderGraph {
            positions: result.positions,
            edges: self.graph.resolved_edges(),
            layout_width: width,
        });
    }
}
