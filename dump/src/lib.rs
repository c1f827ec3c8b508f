//! Deterministic, deduplicating text dumps of arbitrary object graphs.
//!
//! Performs a depth-first traversal of a [`graphdump_reflect`] object graph and
//! formats it as an indented, multiline string. The format is verbose and suitable
//! for tests and for debugging a serialization layer.
//!
//! Repeated sub-structure is deduplicated: every structured node is assigned a
//! dense reference id on first visit and fully expanded exactly once; any other
//! occurrence renders as a compact `TypeName#id` backreference, which also makes
//! dumps of cyclic graphs terminate.
//!
//! Two dedup regimes exist. [`dump_structure`] treats two nodes as the same only
//! when they are the same instance. [`dump_structure_with_equivalence_reduction`]
//! additionally collapses distinct instances whose content fingerprints match,
//! which exposes structurally-identical-but-distinct objects.
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(missing_docs)]

pub mod classify;
pub mod collector;
pub mod descriptor;
pub mod dumper;
pub mod fingerprint;
pub mod registry;
pub mod sink;
pub mod traverse;

pub use graphdump_reflect as reflect;

pub use collector::GraphCollector;
pub use descriptor::Descriptor;
pub use dumper::{DedupKey, Dumper, VisitOrder};
pub use fingerprint::{compute_fingerprints, FingerprintMap};
pub use registry::ConstantRegistry;
pub use sink::TextSink;
pub use traverse::GraphTraverser;

use graphdump_reflect::{ClassInfoProvider, NodeRef};

/// Formats an object graph into a string, deduplicating by node identity.
///
/// Returns a multiline representation of `root` without a trailing newline.
pub fn dump_structure(
    provider: &dyn ClassInfoProvider,
    registry: Option<&ConstantRegistry>,
    root: Option<&NodeRef>,
) -> String {
    dump_with_fingerprints(provider, registry, None, root)
}

/// Formats an object graph into a string, additionally collapsing distinct
/// instances with identical content fingerprints to a single reference id.
pub fn dump_structure_with_equivalence_reduction(
    provider: &dyn ClassInfoProvider,
    registry: Option<&ConstantRegistry>,
    root: Option<&NodeRef>,
) -> String {
    let fingerprints = match root {
        Some(root) => compute_fingerprints(provider, registry, root),
        None => FingerprintMap::default(),
    };
    dump_with_fingerprints(provider, registry, Some(&fingerprints), root)
}

/// Traverses the graph in fingerprint-emission mode and returns the traversal
/// order.
///
/// Nodes found in `fingerprints` are emitted as their fingerprint token, assigned
/// no reference id and never recursed into; every other structured node is numbered
/// in first-visit order. The emission-mode text is appended to `out`. This entry
/// point exists so the content-equivalence pass can harvest visit order without
/// re-deriving fingerprints; it does not produce final dump text.
pub fn compute_visit_order(
    provider: &dyn ClassInfoProvider,
    registry: Option<&ConstantRegistry>,
    fingerprints: Option<&FingerprintMap>,
    root: Option<&NodeRef>,
    out: &mut String,
) -> VisitOrder {
    let mut sink = TextSink::new();
    let mut traverser = GraphTraverser::new(
        provider,
        registry,
        Dumper::new(fingerprints, /* emit_fingerprints */ true),
    );
    traverser.traverse_value(None, root, &mut sink);
    let reference_ids = traverser.into_collector().into_reference_ids();
    out.push_str(&sink.into_string());
    reference_ids
}

fn dump_with_fingerprints(
    provider: &dyn ClassInfoProvider,
    registry: Option<&ConstantRegistry>,
    fingerprints: Option<&FingerprintMap>,
    root: Option<&NodeRef>,
) -> String {
    let mut sink = TextSink::new();
    let mut traverser = GraphTraverser::new(
        provider,
        registry,
        Dumper::new(fingerprints, /* emit_fingerprints */ false),
    );
    traverser.traverse_value(None, root, &mut sink);
    sink.into_string()
}
