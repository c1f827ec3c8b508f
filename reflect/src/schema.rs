//! Field schemas and the class metadata provider.

use std::{hash::BuildHasherDefault, sync::Arc};

use hashbrown::HashMap;
use zwohash::ZwoHasher;

use crate::{scalar::ScalarKind, type_desc::TypeDesc};

type ZwoBuild = BuildHasherDefault<ZwoHasher>;

/// The kind of value a field stores.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldKind {
    /// A scalar stored inline in the parent aggregate.
    Scalar(ScalarKind),
    /// A reference to another node (possibly null).
    Reference,
}

/// One named, typed field of an open class.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: Box<str>,
    kind: FieldKind,
}

impl FieldInfo {
    /// Describes a scalar field.
    pub fn scalar(name: &str, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar(kind),
        }
    }

    /// Describes a reference field.
    pub fn reference(name: &str) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Reference,
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

/// Reflective metadata for a class.
#[derive(Clone, Debug)]
pub enum ClassInfo {
    /// Fields can be enumerated; the ordered schema is given.
    Open(Arc<[FieldInfo]>),
    /// Fields cannot be enumerated; instances render via their own text form.
    Closed,
}

impl ClassInfo {
    /// Returns whether this class is closed to field enumeration.
    pub fn is_closed(&self) -> bool {
        matches!(self, ClassInfo::Closed)
    }
}

/// Supplies reflective metadata for runtime types.
///
/// The dump engine is otherwise fully static; this is its only reflective seam.
pub trait ClassInfoProvider {
    /// Reports whether `ty` is open (with its ordered field schema) or closed.
    fn class_info(&self, ty: &TypeDesc) -> ClassInfo;
}

/// The provided [`ClassInfoProvider`]: a registry of schemas keyed by internal type
/// name, with cheap cached lookups.
///
/// Types never registered report [`ClassInfo::Closed`] — nothing can be enumerated
/// for them, so instances render inline via their own text form.
#[derive(Default)]
pub struct ClassRegistry {
    classes: HashMap<Box<str>, ClassInfo, ZwoBuild>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `internal_name` as open with the given ordered field schema.
    pub fn register_open(&mut self, internal_name: &str, fields: Vec<FieldInfo>) {
        self.classes
            .insert(internal_name.into(), ClassInfo::Open(fields.into()));
    }

    /// Registers `internal_name` as closed to field enumeration.
    pub fn register_closed(&mut self, internal_name: &str) {
        self.classes.insert(internal_name.into(), ClassInfo::Closed);
    }
}

impl ClassInfoProvider for ClassRegistry {
    fn class_info(&self, ty: &TypeDesc) -> ClassInfo {
        self.classes
            .get(ty.internal_name())
            .cloned()
            .unwrap_or(ClassInfo::Closed)
    }
}
