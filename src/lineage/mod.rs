mod graph;
mod load;
mod parse;

pub use graph::{EdgeKind, LineageGraph, LineageNode, NodeKind, ResolvedEdge};
pub use load::{DatasetSource, load_dataset};

#[cfg(test)]
pub(crate) use graph::tests::{edge as test_edge, node as test_node};
