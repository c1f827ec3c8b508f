//! Content fingerprints for cross-instance deduplication.
//!
//! A fingerprint is a content-based key: two nodes with identical serialized
//! structure receive the same fingerprint even when they are distinct instances.
//! Fingerprints are computed once, before a content-equivalence dump begins, and
//! are read-only afterward.

use std::hash::{BuildHasher, BuildHasherDefault};

use hashbrown::{HashMap, HashSet};
use log::debug;
use zwohash::ZwoHasher;

use graphdump_reflect::{ClassInfoProvider, FieldValue, Node, NodeAddr, NodeData, NodeRef};

use crate::{compute_visit_order, dumper::DedupKey, registry::ConstantRegistry};

type ZwoBuild = BuildHasherDefault<ZwoHasher>;

/// Fingerprints keyed by node identity.
///
/// The mapping is partial: inlined values, weak references, registry constants and
/// members of unresolvable reference cycles have no fingerprint and fall back to
/// identity-based dedup during the dump.
pub type FingerprintMap = HashMap<NodeAddr, Box<str>, ZwoBuild>;

/// Computes a content fingerprint for every resolvable structured node reachable
/// from `root`.
///
/// Nodes are processed children before parents, so a node's fingerprint covers its
/// whole subtree: the fingerprint hashes the node's fingerprint-emission dump, in
/// which already fingerprinted children collapse into their fingerprint tokens.
/// Members of reference cycles cannot be resolved bottom-up and are skipped; they
/// contribute their full deterministic expansion to their ancestors' fingerprints
/// instead.
pub fn compute_fingerprints(
    provider: &dyn ClassInfoProvider,
    registry: Option<&ConstantRegistry>,
    root: &NodeRef,
) -> FingerprintMap {
    // Enumerate the structured nodes the dumper would visit, reusing its own
    // classification instead of re-deriving it here.
    let mut scratch = String::new();
    let order = compute_visit_order(provider, registry, None, Some(root), &mut scratch);
    let members: HashSet<NodeAddr, ZwoBuild> = order
        .keys()
        .filter_map(|key| match key {
            DedupKey::Identity(addr) => Some(*addr),
            DedupKey::Fingerprint(_) => None,
        })
        .collect();

    let mut fingerprints = FingerprintMap::default();
    let mut cycle_members = 0usize;
    topo_sorted_sccs(root, &members, |component| {
        if component.len() > 1 {
            cycle_members += component.len();
            return;
        }
        let node = &component[0];
        if structured_children(node, &members)
            .iter()
            .any(|child| child.addr() == node.addr())
        {
            // Self cycle.
            cycle_members += 1;
            return;
        }
        let fingerprint = fingerprint_of(provider, registry, &fingerprints, node);
        fingerprints.insert(node.addr(), fingerprint);
    });

    debug!(
        "fingerprinted {} of {} structured nodes ({} cycle members skipped)",
        fingerprints.len(),
        members.len(),
        cycle_members,
    );
    fingerprints
}

fn fingerprint_of(
    provider: &dyn ClassInfoProvider,
    registry: Option<&ConstantRegistry>,
    fingerprints: &FingerprintMap,
    node: &NodeRef,
) -> Box<str> {
    let mut text = String::new();
    compute_visit_order(provider, registry, Some(fingerprints), Some(node), &mut text);
    let hash = <ZwoBuild>::default().hash_one(&text);
    format!("{hash:016x}").into()
}

/// Returns the structured references of `node`, in traversal order.
///
/// `members` is the set of nodes the dumper treats as structured; anything else
/// (inlined values, weak references, constants, nulls) is not an edge.
fn structured_children(node: &Node, members: &HashSet<NodeAddr, ZwoBuild>) -> Vec<NodeRef> {
    let mut children = Vec::new();
    let mut push = |child: Option<&NodeRef>| {
        if let Some(child) = child {
            if members.contains(&child.addr()) {
                children.push(child.clone());
            }
        }
    };
    match &*node.data() {
        NodeData::Refs(elems) | NodeData::Seq(elems) => {
            for elem in elems {
                push(elem.as_ref());
            }
        }
        NodeData::Map(entries) => {
            for (key, value) in entries {
                push(key.as_ref());
                push(value.as_ref());
            }
        }
        NodeData::Struct(values) => {
            for value in values {
                if let FieldValue::Ref(child) = value {
                    push(child.as_ref());
                }
            }
        }
        _ => {}
    }
    children
}

struct DfsFrame {
    node: NodeRef,
    children: Vec<NodeRef>,
    next_child: usize,
    index: u32,
    lowlink: u32,
}

/// Tarjan's strongly connected components over the structured-reference graph,
/// emitting components children-first (topological order).
///
/// Non-recursive so arbitrarily deep user graphs cannot overflow the call stack.
/// Once a component is emitted, the DFS index of its nodes is set to `u32::MAX`;
/// this stands in for the textbook on-stack check, since any later edge into an
/// emitted component can no longer lower a lowlink.
fn topo_sorted_sccs(
    root: &NodeRef,
    members: &HashSet<NodeAddr, ZwoBuild>,
    mut component_callback: impl FnMut(&[NodeRef]),
) {
    if !members.contains(&root.addr()) {
        return;
    }

    let mut dfs_index: HashMap<NodeAddr, u32, ZwoBuild> = HashMap::default();
    let mut next_index = 0u32;
    let mut component_stack: Vec<NodeRef> = Vec::new();
    let mut frames: Vec<DfsFrame> = Vec::new();

    dfs_index.insert(root.addr(), next_index);
    component_stack.push(root.clone());
    frames.push(DfsFrame {
        node: root.clone(),
        children: structured_children(root, members),
        next_child: 0,
        index: next_index,
        lowlink: next_index,
    });
    next_index += 1;

    loop {
        let Some(top) = frames.last_mut() else {
            break;
        };
        // Advance past children that are already indexed, folding their DFS index
        // into the lowlink, until an unvisited child is found.
        let unvisited = loop {
            if top.next_child >= top.children.len() {
                break None;
            }
            let child = top.children[top.next_child].clone();
            top.next_child += 1;
            if let Some(&child_index) = dfs_index.get(&child.addr()) {
                top.lowlink = top.lowlink.min(child_index);
            } else {
                break Some(child);
            }
        };

        match unvisited {
            Some(child) => {
                dfs_index.insert(child.addr(), next_index);
                component_stack.push(child.clone());
                frames.push(DfsFrame {
                    children: structured_children(&child, members),
                    node: child,
                    next_child: 0,
                    index: next_index,
                    lowlink: next_index,
                });
                next_index += 1;
            }
            None => {
                let finished = frames.pop().unwrap();
                if finished.lowlink == finished.index {
                    // `finished.node` is a component root; everything above it on
                    // the component stack belongs to its component.
                    let mut start = component_stack.len();
                    loop {
                        start -= 1;
                        if component_stack[start].addr() == finished.node.addr() {
                            break;
                        }
                    }
                    for node in &component_stack[start..] {
                        dfs_index.insert(node.addr(), u32::MAX);
                    }
                    component_callback(&component_stack[start..]);
                    component_stack.truncate(start);
                }
                if let Some(parent) = frames.last_mut() {
                    parent.lowlink = parent.lowlink.min(finished.lowlink);
                }
            }
        }
    }
}
