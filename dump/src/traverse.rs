//! Depth-first graph traversal driving a collector.

use graphdump_reflect::{
    ClassInfo, ClassInfoProvider, FieldKind, FieldValue, NodeData, NodeRef, TypeKind,
};

use crate::{
    classify::should_inline, collector::GraphCollector, registry::ConstantRegistry, sink::TextSink,
};

/// Walks an object graph depth first.
///
/// For every reference the walker determines the node's structural kind, consults
/// the collector's cache verdict for structured nodes, and invokes exactly one
/// rendering callback, recursing into children only on first visits. Traversal is
/// synchronous and runs to completion; recursion depth is bounded by the depth of
/// the input graph.
pub struct GraphTraverser<'a, C> {
    provider: &'a dyn ClassInfoProvider,
    registry: Option<&'a ConstantRegistry>,
    collector: C,
}

impl<'a, C: GraphCollector> GraphTraverser<'a, C> {
    /// Creates a traverser over the given metadata provider and optional constant
    /// registry.
    pub fn new(
        provider: &'a dyn ClassInfoProvider,
        registry: Option<&'a ConstantRegistry>,
        collector: C,
    ) -> Self {
        Self {
            provider,
            registry,
            collector,
        }
    }

    /// Consumes the traverser, returning the collector.
    pub fn into_collector(self) -> C {
        self.collector
    }

    /// Traverses one reference, rendering it and recursing into children on first
    /// visit.
    ///
    /// # Panics
    ///
    /// Panics when a struct node disagrees with the field schema its type
    /// registered; that is a defect in the metadata provider and aborts the dump
    /// with no partial result.
    pub fn traverse_value(
        &mut self,
        label: Option<&str>,
        value: Option<&NodeRef>,
        sink: &mut TextSink,
    ) {
        let Some(node) = value else {
            self.collector.output_null(label, sink);
            return;
        };
        if let Some(tag) = self.registry.and_then(|registry| registry.constant_tag(node)) {
            self.collector
                .output_serialization_constant(label, node.ty(), tag, sink);
            return;
        }
        if node.ty().kind() == TypeKind::Weak {
            self.collector.output_weak_reference(label, sink);
            return;
        }
        if should_inline(self.provider, node.ty()) {
            self.collector.output_inline_value(label, node, sink);
            return;
        }

        let Some(descriptor) = self.collector.check_cache(label, node.ty(), node, sink) else {
            // Already represented; a backreference or fingerprint was written.
            return;
        };

        let data = node.data();
        match &*data {
            NodeData::Bytes(bytes) => {
                self.collector.output_byte_array(label, &descriptor, bytes, sink)
            }
            NodeData::Array(elems) => {
                self.collector.output_inline_array(label, &descriptor, elems, sink)
            }
            NodeData::Refs(elems) | NodeData::Seq(elems) => {
                if elems.is_empty() {
                    self.collector.output_empty_aggregate(label, &descriptor, sink);
                } else {
                    self.collector.open_aggregate(label, &descriptor, sink);
                    for elem in elems {
                        self.traverse_value(None, elem.as_ref(), sink);
                    }
                    self.collector.close_aggregate(sink);
                }
            }
            NodeData::Map(entries) => {
                if entries.is_empty() {
                    self.collector.output_empty_aggregate(label, &descriptor, sink);
                } else {
                    self.collector.open_aggregate(label, &descriptor, sink);
                    for (key, value) in entries {
                        self.traverse_value(Some("key="), key.as_ref(), sink);
                        self.traverse_value(Some("value="), value.as_ref(), sink);
                    }
                    self.collector.close_aggregate(sink);
                }
            }
            NodeData::Struct(values) => {
                let ClassInfo::Open(fields) = self.provider.class_info(node.ty()) else {
                    panic!(
                        "type `{}` classified as structured but has no open schema",
                        node.ty().name()
                    );
                };
                assert!(
                    fields.len() == values.len(),
                    "schema mismatch for `{}`: {} fields described, {} values present",
                    node.ty().name(),
                    fields.len(),
                    values.len(),
                );
                if values.is_empty() {
                    self.collector.output_empty_aggregate(label, &descriptor, sink);
                } else {
                    self.collector.open_aggregate(label, &descriptor, sink);
                    for (field, value) in fields.iter().zip(values.iter()) {
                        match (field.kind(), value) {
                            (FieldKind::Scalar(kind), FieldValue::Scalar(scalar)) => {
                                assert!(
                                    scalar.kind() == kind,
                                    "schema mismatch for `{}.{}`: expected {:?}, found {:?}",
                                    node.ty().name(),
                                    field.name(),
                                    kind,
                                    scalar.kind(),
                                );
                                self.collector.output_primitive(field.name(), *scalar, sink);
                            }
                            (FieldKind::Reference, FieldValue::Ref(child)) => {
                                let child_label = format!("{}=", field.name());
                                self.traverse_value(Some(&child_label), child.as_ref(), sink);
                            }
                            _ => panic!(
                                "schema mismatch for `{}.{}`: field kind disagrees with stored value",
                                node.ty().name(),
                                field.name(),
                            ),
                        }
                    }
                    self.collector.close_aggregate(sink);
                }
            }
            NodeData::Scalar(_)
            | NodeData::Text(_)
            | NodeData::TypeName(_)
            | NodeData::Opaque(_)
            | NodeData::Weak(_) => {
                unreachable!("inline node reached structured rendering")
            }
        }
    }
}
