//! Registry of singleton constants rendered as stable tags.

use std::hash::BuildHasherDefault;

use hashbrown::HashMap;
use zwohash::ZwoHasher;

use graphdump_reflect::{Node, NodeAddr, NodeRef};

type ZwoBuild = BuildHasherDefault<ZwoHasher>;

/// Maps designated singleton nodes to stable integer tags.
///
/// Registered nodes render as `TypeName[SERIALIZATION_CONSTANT:<tag>]` instead of
/// being expanded or assigned reference ids. Absence of a registry is valid; no
/// constants are special-cased then.
#[derive(Default)]
pub struct ConstantRegistry {
    tags: HashMap<NodeAddr, u32, ZwoBuild>,
    // Keeps registered nodes alive so their addresses stay stable for the
    // registry's lifetime.
    constants: Vec<NodeRef>,
}

impl ConstantRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node` as a constant and returns its tag.
    ///
    /// Tags are dense and assigned in registration order starting at 1.
    /// Registering the same node again returns the existing tag.
    pub fn add_constant(&mut self, node: &NodeRef) -> u32 {
        let next_tag = self.tags.len() as u32 + 1;
        *self.tags.entry(node.addr()).or_insert_with(|| {
            self.constants.push(node.clone());
            next_tag
        })
    }

    /// Returns the tag for `node` when it is a registered constant.
    pub fn constant_tag(&self, node: &Node) -> Option<u32> {
        self.tags.get(&node.addr()).copied()
    }
}

#[cfg(test)]
mod tests {
    use graphdump_reflect::Node;

    use super::*;

    #[test]
    fn tags_are_dense_and_idempotent() {
        let mut registry = ConstantRegistry::new();
        let a = Node::bytes(vec![1]);
        let b = Node::bytes(vec![2]);

        assert_eq!(registry.add_constant(&a), 1);
        assert_eq!(registry.add_constant(&b), 2);
        assert_eq!(registry.add_constant(&a), 1);

        assert_eq!(registry.constant_tag(&a), Some(1));
        assert_eq!(registry.constant_tag(&b), Some(2));
        assert_eq!(registry.constant_tag(&Node::bytes(vec![3])), None);
    }
}
