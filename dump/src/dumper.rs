//! The dedup engine: reference ids, backreferences and fingerprint substitution.

use std::{fmt::Write, hash::BuildHasherDefault};

use hashbrown::{hash_map::Entry, HashMap};
use zwohash::ZwoHasher;

use graphdump_reflect::{Node, NodeAddr, Scalar, TypeDesc, WEAK_TYPE_NAME};

use crate::{
    collector::GraphCollector,
    descriptor::{hex_upper, Descriptor},
    fingerprint::FingerprintMap,
    sink::TextSink,
};

type ZwoBuild = BuildHasherDefault<ZwoHasher>;

/// Key of the shared dedup mapping: node identity or a content fingerprint.
///
/// Both key kinds draw ids from the same dense counter, so the ids printed in a
/// dump are globally unique and strictly increasing in first-visit order no matter
/// which keying strategy resolved a given node.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum DedupKey {
    /// The node cell itself; two keys are equal only for the same instance.
    Identity(NodeAddr),
    /// An externally computed content fingerprint; equal for structurally
    /// identical content regardless of instance.
    Fingerprint(Box<str>),
}

/// Mapping from dedup key to reference id, in first-visit order.
pub type VisitOrder = HashMap<DedupKey, u32, ZwoBuild>;

/// The stateful dedup core driving a [`TextSink`] through one dump.
///
/// Assigns dense reference ids starting at zero, decides first-visit versus
/// backreference versus fingerprint substitution, and renders every node kind the
/// walker reports. All state is per dump call; nothing is retained across calls.
pub struct Dumper<'a> {
    /// Fingerprints for nodes, when running in content-equivalence mode.
    ///
    /// Even when present, not all nodes have fingerprints: inlined values and
    /// members of unresolvable reference cycles are absent and fall back to
    /// identity dedup.
    fingerprints: Option<&'a FingerprintMap>,
    /// One id per distinct dedup key, assigned in first-visit order.
    reference_ids: VisitOrder,
    /// When true, nodes found in the fingerprint map emit their fingerprint
    /// directly instead of being assigned an id and expanded. Used only to harvest
    /// visit order, not to produce final dump text.
    emit_fingerprints: bool,
}

impl<'a> Dumper<'a> {
    /// Creates a dumper for one dump call.
    pub fn new(fingerprints: Option<&'a FingerprintMap>, emit_fingerprints: bool) -> Self {
        Self {
            fingerprints,
            reference_ids: VisitOrder::default(),
            emit_fingerprints,
        }
    }

    /// Consumes the dumper, returning the observed dedup-key to id mapping.
    pub fn into_reference_ids(self) -> VisitOrder {
        self.reference_ids
    }
}

impl GraphCollector for Dumper<'_> {
    fn output_null(&mut self, label: Option<&str>, sink: &mut TextSink) {
        sink.output(label, "null");
    }

    fn output_serialization_constant(
        &mut self,
        label: Option<&str>,
        ty: &TypeDesc,
        tag: u32,
        sink: &mut TextSink,
    ) {
        sink.output(label, &format!("{}[SERIALIZATION_CONSTANT:{tag}]", ty.name()));
    }

    fn output_weak_reference(&mut self, label: Option<&str>, sink: &mut TextSink) {
        sink.output(label, WEAK_TYPE_NAME);
    }

    fn output_inline_value(&mut self, label: Option<&str>, node: &Node, sink: &mut TextSink) {
        sink.output(label, &node.inline_text());
    }

    fn output_primitive(&mut self, name: &str, value: Scalar, sink: &mut TextSink) {
        sink.output(Some(&format!("{name}=")), &value.to_string());
    }

    fn check_cache(
        &mut self,
        label: Option<&str>,
        ty: &TypeDesc,
        node: &Node,
        sink: &mut TextSink,
    ) -> Option<Descriptor> {
        let next_id = self.reference_ids.len() as u32;
        if let Some(fingerprint) = self.fingerprints.and_then(|map| map.get(&node.addr())) {
            if self.emit_fingerprints {
                sink.output(label, &format!("{}[{fingerprint}]", ty.name()));
                return None;
            }
            // There's a fingerprint for this node. Uses it to look up a reference
            // id, collapsing structurally identical content across instances.
            match self
                .reference_ids
                .entry(DedupKey::Fingerprint(fingerprint.clone()))
            {
                Entry::Occupied(entry) => {
                    // Content with this fingerprint has been expanded previously.
                    // Outputs only a backreference.
                    sink.output(label, &Descriptor::new(ty, *entry.get()).to_string());
                    return None;
                }
                Entry::Vacant(entry) => {
                    entry.insert(next_id);
                }
            }
        } else {
            // No fingerprint is available. Deduplicates by node identity.
            match self.reference_ids.entry(DedupKey::Identity(node.addr())) {
                Entry::Occupied(entry) => {
                    // This instance has been observed previously. Outputs only a
                    // backreference.
                    sink.output(label, &Descriptor::new(ty, *entry.get()).to_string());
                    return None;
                }
                Entry::Vacant(entry) => {
                    entry.insert(next_id);
                }
            }
        }
        Some(Descriptor::new(ty, next_id))
    }

    fn output_byte_array(
        &mut self,
        label: Option<&str>,
        descriptor: &Descriptor,
        bytes: &[u8],
        sink: &mut TextSink,
    ) {
        sink.output(label, &format!("{descriptor} [{}]", hex_upper(bytes)));
    }

    fn output_inline_array(
        &mut self,
        label: Option<&str>,
        descriptor: &Descriptor,
        elems: &[Scalar],
        sink: &mut TextSink,
    ) {
        let mut text = format!("{descriptor} [");
        for (index, elem) in elems.iter().enumerate() {
            if index > 0 {
                text.push_str(", ");
            }
            write!(text, "{elem}").unwrap();
        }
        text.push(']');
        sink.output(label, &text);
    }

    fn output_empty_aggregate(
        &mut self,
        label: Option<&str>,
        descriptor: &Descriptor,
        sink: &mut TextSink,
    ) {
        sink.output(label, &format!("{descriptor} []"));
    }

    fn open_aggregate(
        &mut self,
        label: Option<&str>,
        descriptor: &Descriptor,
        sink: &mut TextSink,
    ) {
        sink.open_aggregate(label, &descriptor.to_string());
    }

    fn close_aggregate(&mut self, sink: &mut TextSink) {
        sink.close_aggregate();
    }
}

#[cfg(test)]
mod tests {
    use graphdump_reflect::TypeKind;

    use super::*;

    fn bytes_node() -> graphdump_reflect::NodeRef {
        Node::bytes(vec![1, 2])
    }

    #[test]
    fn identity_ids_are_dense_and_stable() {
        let mut dumper = Dumper::new(None, false);
        let mut sink = TextSink::new();

        let a = bytes_node();
        let b = bytes_node();

        let first = dumper.check_cache(None, a.ty(), &a, &mut sink).unwrap();
        assert_eq!(first.id(), 0);
        assert_eq!(first.type_name(), "[u8]");
        let second = dumper.check_cache(None, b.ty(), &b, &mut sink).unwrap();
        assert_eq!(second.id(), 1);

        // Revisiting `a` writes a backreference and yields no descriptor.
        assert!(dumper.check_cache(None, a.ty(), &a, &mut sink).is_none());
        assert_eq!(sink.into_string(), "[u8]#0");
    }

    #[test]
    fn identity_and_fingerprint_keys_share_one_id_space() {
        let ty = TypeDesc::named(TypeKind::Sequence, "com.example.List");
        let plain = Node::seq(ty.clone(), vec![]);
        let printed_a = Node::seq(ty.clone(), vec![]);
        let printed_b = Node::seq(ty, vec![]);

        let mut fingerprints = FingerprintMap::default();
        fingerprints.insert(printed_a.addr(), "00ff".into());
        fingerprints.insert(printed_b.addr(), "00ff".into());

        let mut dumper = Dumper::new(Some(&fingerprints), false);
        let mut sink = TextSink::new();

        // Identity-keyed node takes id 0, fingerprint-keyed content takes id 1.
        assert_eq!(
            dumper
                .check_cache(None, plain.ty(), &plain, &mut sink)
                .unwrap()
                .id(),
            0
        );
        assert_eq!(
            dumper
                .check_cache(None, printed_a.ty(), &printed_a, &mut sink)
                .unwrap()
                .id(),
            1
        );
        // A distinct instance with the same fingerprint collapses to id 1.
        assert!(dumper
            .check_cache(None, printed_b.ty(), &printed_b, &mut sink)
            .is_none());
        assert_eq!(sink.into_string(), "com.example.List#1");
    }

    #[test]
    fn emission_mode_assigns_no_id() {
        let node = bytes_node();
        let mut fingerprints = FingerprintMap::default();
        fingerprints.insert(node.addr(), "abcd".into());

        let mut dumper = Dumper::new(Some(&fingerprints), true);
        let mut sink = TextSink::new();
        assert!(dumper.check_cache(None, node.ty(), &node, &mut sink).is_none());
        assert!(dumper.into_reference_ids().is_empty());
        assert_eq!(sink.into_string(), "[u8][abcd]");
    }
}
