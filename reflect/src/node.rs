//! Graph nodes: reference counted cells with identity.

use std::{
    cell::{Ref, RefCell},
    rc::{Rc, Weak},
    sync::Arc,
};

use crate::{
    scalar::Scalar,
    type_desc::{TypeDesc, TypeKind},
};

/// Shared handle to a [`Node`].
///
/// Cloning the handle aliases the same node; the dump engine deduplicates aliased
/// occurrences by the identity of the cell, not by content.
pub type NodeRef = Rc<Node>;

/// Identity of a node cell, keyed by its address.
///
/// Only meaningful while the node is alive; containers keyed by `NodeAddr` must not
/// outlive the graph they were built from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeAddr(usize);

/// A value stored in a struct field position.
#[derive(Clone, Debug)]
pub enum FieldValue {
    /// An inline scalar stored directly in the parent.
    Scalar(Scalar),
    /// A reference to another node; `None` is the null reference.
    Ref(Option<NodeRef>),
}

/// Dynamic data of a node.
///
/// Reference positions hold `Option<NodeRef>`, with `None` standing for the null
/// reference.
#[derive(Debug)]
pub enum NodeData {
    /// A scalar value boxed as its own node.
    Scalar(Scalar),
    /// Text content.
    Text(Box<str>),
    /// A value naming a type.
    TypeName(Arc<TypeDesc>),
    /// Display form of a reflectively inaccessible value.
    Opaque(Box<str>),
    /// Byte sequence.
    Bytes(Vec<u8>),
    /// Fixed array of inline scalar elements.
    Array(Vec<Scalar>),
    /// Fixed array of references.
    Refs(Vec<Option<NodeRef>>),
    /// Ordered sequence of references.
    Seq(Vec<Option<NodeRef>>),
    /// Key/value mapping.
    Map(Vec<(Option<NodeRef>, Option<NodeRef>)>),
    /// Plain aggregate; values are matched positionally against the registered
    /// field schema of the node's type.
    Struct(Vec<FieldValue>),
    /// Weak reference to another node.
    Weak(Weak<Node>),
}

impl NodeData {
    fn matches(&self, kind: TypeKind) -> bool {
        match (self, kind) {
            (NodeData::Scalar(value), TypeKind::Scalar(kind)) => value.kind() == kind,
            (NodeData::Text(_), TypeKind::Text) => true,
            (NodeData::TypeName(_), TypeKind::TypeName) => true,
            // An opaque payload is valid both for dedicated opaque types and for
            // struct types whose fields cannot be enumerated.
            (NodeData::Opaque(_), TypeKind::Opaque | TypeKind::Struct) => true,
            (NodeData::Bytes(_), TypeKind::Bytes) => true,
            (NodeData::Array(_) | NodeData::Refs(_), TypeKind::Array) => true,
            (NodeData::Seq(_), TypeKind::Sequence) => true,
            (NodeData::Map(_), TypeKind::Mapping) => true,
            (NodeData::Struct(_), TypeKind::Struct) => true,
            (NodeData::Weak(_), TypeKind::Weak) => true,
            _ => false,
        }
    }
}

/// One object in a graph being dumped: a runtime type paired with dynamic data.
///
/// The data sits behind a [`RefCell`] so reference cycles can be tied after
/// allocation; the dump engine only ever reads it.
#[derive(Debug)]
pub struct Node {
    ty: Arc<TypeDesc>,
    data: RefCell<NodeData>,
}

impl Node {
    /// Creates a node.
    ///
    /// # Panics
    ///
    /// Panics when `data` does not match the structural kind of `ty`.
    pub fn new(ty: Arc<TypeDesc>, data: NodeData) -> NodeRef {
        assert!(
            data.matches(ty.kind()),
            "node data does not match type `{}` of kind {:?}",
            ty.name(),
            ty.kind(),
        );
        Rc::new(Self {
            ty,
            data: RefCell::new(data),
        })
    }

    /// Creates a scalar node of the matching built-in type.
    pub fn scalar(value: Scalar) -> NodeRef {
        Self::new(TypeDesc::of_scalar(value.kind()), NodeData::Scalar(value))
    }

    /// Creates a text node.
    pub fn text(value: &str) -> NodeRef {
        Self::new(TypeDesc::of_text(), NodeData::Text(value.into()))
    }

    /// Creates a node naming the given type.
    pub fn type_name(ty: Arc<TypeDesc>) -> NodeRef {
        Self::new(TypeDesc::of_type_name(), NodeData::TypeName(ty))
    }

    /// Creates an opaque node with the given display form.
    pub fn opaque(ty: Arc<TypeDesc>, display: &str) -> NodeRef {
        Self::new(ty, NodeData::Opaque(display.into()))
    }

    /// Creates a byte sequence node.
    pub fn bytes(values: Vec<u8>) -> NodeRef {
        Self::new(TypeDesc::of_bytes(), NodeData::Bytes(values))
    }

    /// Creates a fixed array node with inline scalar elements.
    pub fn array(ty: Arc<TypeDesc>, values: Vec<Scalar>) -> NodeRef {
        Self::new(ty, NodeData::Array(values))
    }

    /// Creates a fixed array node holding references.
    pub fn refs(ty: Arc<TypeDesc>, elems: Vec<Option<NodeRef>>) -> NodeRef {
        Self::new(ty, NodeData::Refs(elems))
    }

    /// Creates an ordered sequence node.
    pub fn seq(ty: Arc<TypeDesc>, elems: Vec<Option<NodeRef>>) -> NodeRef {
        Self::new(ty, NodeData::Seq(elems))
    }

    /// Creates a key/value mapping node.
    pub fn map(ty: Arc<TypeDesc>, entries: Vec<(Option<NodeRef>, Option<NodeRef>)>) -> NodeRef {
        Self::new(ty, NodeData::Map(entries))
    }

    /// Creates a plain aggregate node with positional field values.
    pub fn struct_(ty: Arc<TypeDesc>, values: Vec<FieldValue>) -> NodeRef {
        Self::new(ty, NodeData::Struct(values))
    }

    /// Creates a weak reference to `target`.
    pub fn weak(target: &NodeRef) -> NodeRef {
        Self::new(TypeDesc::of_weak(), NodeData::Weak(Rc::downgrade(target)))
    }

    /// Returns the runtime type of this node.
    pub fn ty(&self) -> &Arc<TypeDesc> {
        &self.ty
    }

    /// Returns the identity of this node cell.
    pub fn addr(&self) -> NodeAddr {
        NodeAddr(self as *const Node as usize)
    }

    /// Borrows the node data for reading.
    pub fn data(&self) -> Ref<'_, NodeData> {
        self.data.borrow()
    }

    /// The node's natural text form, used when the classifier inlines it.
    ///
    /// Literal kinds render their content; anything else falls back to the type
    /// name, which keeps the form deterministic.
    pub fn inline_text(&self) -> String {
        match &*self.data.borrow() {
            NodeData::Scalar(value) => value.to_string(),
            NodeData::Text(text) => text.to_string(),
            NodeData::TypeName(ty) => ty.name().to_string(),
            NodeData::Opaque(display) => display.to_string(),
            _ => self.ty.name().to_string(),
        }
    }

    /// Replaces the field at `index` of a struct node, for tying reference cycles.
    ///
    /// # Panics
    ///
    /// Panics when this is not a struct node or `index` is out of bounds.
    pub fn set_field(&self, index: usize, value: FieldValue) {
        match &mut *self.data.borrow_mut() {
            NodeData::Struct(values) => values[index] = value,
            _ => panic!("set_field on non-struct node `{}`", self.ty.name()),
        }
    }

    /// Replaces the element at `index` of a sequence or reference array node.
    ///
    /// # Panics
    ///
    /// Panics when this node has no reference elements or `index` is out of bounds.
    pub fn set_elem(&self, index: usize, value: Option<NodeRef>) {
        match &mut *self.data.borrow_mut() {
            NodeData::Seq(elems) | NodeData::Refs(elems) => elems[index] = value,
            _ => panic!("set_elem on non-sequence node `{}`", self.ty.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::scalar::ScalarKind;

    use super::*;

    #[test]
    fn identity_is_per_cell() {
        let a = Node::text("same");
        let b = Node::text("same");
        let alias = a.clone();
        assert_eq!(a.addr(), alias.addr());
        assert_ne!(a.addr(), b.addr());
    }

    #[test]
    fn inline_text_forms() {
        assert_eq!(Node::scalar(Scalar::I32(7)).inline_text(), "7");
        assert_eq!(Node::text("hi").inline_text(), "hi");
        let point = TypeDesc::named(TypeKind::Struct, "com.example.Point");
        assert_eq!(Node::type_name(point.clone()).inline_text(), "com.example.Point");
        assert_eq!(Node::opaque(point, "Point(1, 2)").inline_text(), "Point(1, 2)");
        let list = TypeDesc::named(TypeKind::Sequence, "com.example.List");
        assert_eq!(Node::seq(list, vec![]).inline_text(), "com.example.List");
    }

    #[test]
    fn cycles_can_be_tied() {
        let ty = TypeDesc::named(TypeKind::Struct, "com.example.Cyclic");
        let node = Node::struct_(ty, vec![FieldValue::Ref(None)]);
        node.set_field(0, FieldValue::Ref(Some(node.clone())));
        match &*node.data() {
            NodeData::Struct(values) => match &values[0] {
                FieldValue::Ref(Some(child)) => assert_eq!(child.addr(), node.addr()),
                other => panic!("unexpected field value {other:?}"),
            },
            other => panic!("unexpected node data {other:?}"),
        };
    }

    #[test]
    #[should_panic(expected = "node data does not match")]
    fn mismatched_data_rejected() {
        Node::new(
            TypeDesc::of_scalar(ScalarKind::Bool),
            NodeData::Scalar(Scalar::I32(1)),
        );
    }
}
