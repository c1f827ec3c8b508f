//! Reflective object model for graph dumping.
//!
//! Rust has no ambient reflection, so the "arbitrary object" boundary of the dump
//! engine is an explicit model: graph nodes are reference counted cells carrying a
//! runtime type descriptor and dynamic data, field layouts are registered with a
//! metadata provider, and node identity is the address of the cell. Graphs built
//! from these parts may share subgraphs and contain reference cycles.
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(missing_docs)]

pub mod node;
pub mod scalar;
pub mod schema;
pub mod type_desc;

pub use node::{FieldValue, Node, NodeAddr, NodeData, NodeRef};
pub use scalar::{Scalar, ScalarKind};
pub use schema::{ClassInfo, ClassInfoProvider, ClassRegistry, FieldInfo, FieldKind};
pub use type_desc::{TypeDesc, TypeKind, WEAK_TYPE_NAME};
