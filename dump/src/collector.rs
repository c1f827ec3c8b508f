//! The visitor interface between the graph walker and a data collector.

use graphdump_reflect::{Node, Scalar, TypeDesc};

use crate::{descriptor::Descriptor, sink::TextSink};

/// Receives exactly one callback per visited node or field during traversal.
///
/// The walker classifies every node into one of a closed set of kinds and invokes
/// the matching method. Structured nodes go through [`check_cache`] first; the
/// walker must not recurse when it returns `None`.
///
/// [`check_cache`]: GraphCollector::check_cache
pub trait GraphCollector {
    /// Renders an absent (null) reference.
    fn output_null(&mut self, label: Option<&str>, sink: &mut TextSink);

    /// Renders a pre-resolved registry constant as its type name and tag.
    fn output_serialization_constant(
        &mut self,
        label: Option<&str>,
        ty: &TypeDesc,
        tag: u32,
        sink: &mut TextSink,
    );

    /// Renders a weak reference, which is never followed.
    fn output_weak_reference(&mut self, label: Option<&str>, sink: &mut TextSink);

    /// Renders an inlined value via its natural text form.
    fn output_inline_value(&mut self, label: Option<&str>, node: &Node, sink: &mut TextSink);

    /// Renders a primitive field of a parent aggregate as `name=value`.
    fn output_primitive(&mut self, name: &str, value: Scalar, sink: &mut TextSink);

    /// Decides between first visit and backreference for a structured node.
    ///
    /// Returns `None` when the node is already represented (a backreference or
    /// fingerprint token has been written and the walker must not recurse), or a
    /// fresh [`Descriptor`] on first visit.
    fn check_cache(
        &mut self,
        label: Option<&str>,
        ty: &TypeDesc,
        node: &Node,
        sink: &mut TextSink,
    ) -> Option<Descriptor>;

    /// Renders a byte sequence as uppercase hex.
    fn output_byte_array(
        &mut self,
        label: Option<&str>,
        descriptor: &Descriptor,
        bytes: &[u8],
        sink: &mut TextSink,
    );

    /// Renders a fixed array of inline scalar elements on one line.
    fn output_inline_array(
        &mut self,
        label: Option<&str>,
        descriptor: &Descriptor,
        elems: &[Scalar],
        sink: &mut TextSink,
    );

    /// Renders an aggregate without children.
    fn output_empty_aggregate(
        &mut self,
        label: Option<&str>,
        descriptor: &Descriptor,
        sink: &mut TextSink,
    );

    /// Opens a non-empty aggregate; the walker renders each child next.
    fn open_aggregate(
        &mut self,
        label: Option<&str>,
        descriptor: &Descriptor,
        sink: &mut TextSink,
    );

    /// Closes the innermost open aggregate.
    fn close_aggregate(&mut self, sink: &mut TextSink);
}
