use std::collections::BTreeMap;

use crate::lineage::LineageNode;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationIndex {
    members: BTreeMap<u32, Vec<usize>>,
}

impl GenerationIndex {
    pub fn build(nodes: &[LineageNode]) -> Self {
        let mut members: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (index, node) in nodes.iter().enumerate() {
            members.entry(node.generation).or_default().push(index);
        }
        Self { members }
    }

    #[cfg(test)]
    pub fn members(&self, generation: u32) -> &[usize] {
        self.members
            .get(&generation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[usize])> {
        self.members
            .iter()
            .map(|(&generation, members)| (generation, members.as_slice()))
    }

    pub fn generation_count(&self) -> usize {
        self.members.len()
    }
}
