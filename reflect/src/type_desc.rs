//! Runtime type descriptors.

use std::sync::Arc;

use crate::scalar::ScalarKind;

/// Canonical name of the weak reference type.
///
/// Weak references are rendered as this name alone and are never followed.
pub const WEAK_TYPE_NAME: &str = "weak";

/// Structural category of a runtime type.
///
/// The category determines which rendering path the walker takes and feeds the
/// inline-vs-structured classification.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeKind {
    /// A scalar of the given kind.
    Scalar(ScalarKind),
    /// Text string, rendered inline as its literal content.
    Text,
    /// A value naming a type, rendered inline as that type's name.
    TypeName,
    /// A reflectively inaccessible value carrying only a display form.
    Opaque,
    /// Byte sequence, rendered as uppercase hex.
    Bytes,
    /// Fixed array, either of inline scalar elements or of references.
    Array,
    /// Ordered sequence of references.
    Sequence,
    /// Key/value mapping.
    Mapping,
    /// Plain aggregate with schema-described named fields.
    Struct,
    /// Weak (non-owning) reference.
    Weak,
}

/// An immutable runtime type description: structural kind, names, and whether the
/// type is compiler/runtime synthesized.
///
/// The canonical name is the preferred, fully qualified form; types that lack one
/// fall back to the internal name. Name resolution never fails.
#[derive(Debug)]
pub struct TypeDesc {
    kind: TypeKind,
    canonical: Option<Box<str>>,
    internal: Box<str>,
    synthetic: bool,
}

impl TypeDesc {
    /// Creates a descriptor whose canonical and internal names coincide.
    pub fn named(kind: TypeKind, name: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            canonical: Some(name.into()),
            internal: name.into(),
            synthetic: false,
        })
    }

    /// Creates a descriptor that has no canonical name, only an internal one.
    pub fn internal_only(kind: TypeKind, internal: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            canonical: None,
            internal: internal.into(),
            synthetic: false,
        })
    }

    /// Creates a descriptor for a compiler/runtime synthesized type.
    ///
    /// Synthesized types are always rendered inline.
    pub fn synthetic(kind: TypeKind, internal: &str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            canonical: None,
            internal: internal.into(),
            synthetic: true,
        })
    }

    /// Built-in descriptor for a scalar kind.
    pub fn of_scalar(kind: ScalarKind) -> Arc<Self> {
        Self::named(TypeKind::Scalar(kind), kind.type_name())
    }

    /// Built-in descriptor for text strings.
    pub fn of_text() -> Arc<Self> {
        Self::named(TypeKind::Text, "str")
    }

    /// Built-in descriptor for type-naming values.
    pub fn of_type_name() -> Arc<Self> {
        Self::named(TypeKind::TypeName, "type")
    }

    /// Built-in descriptor for byte sequences.
    pub fn of_bytes() -> Arc<Self> {
        Self::named(TypeKind::Bytes, "[u8]")
    }

    /// Built-in descriptor for weak references.
    pub fn of_weak() -> Arc<Self> {
        Self::named(TypeKind::Weak, WEAK_TYPE_NAME)
    }

    /// Returns the structural kind.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns the display name: the canonical name when present, otherwise the
    /// internal fallback.
    pub fn name(&self) -> &str {
        self.canonical.as_deref().unwrap_or(&self.internal)
    }

    /// Returns the internal name used as the metadata registry key.
    pub fn internal_name(&self) -> &str {
        &self.internal
    }

    /// Returns whether this type is compiler/runtime synthesized.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_prefers_canonical() {
        let named = TypeDesc::named(TypeKind::Struct, "com.example.Point");
        assert_eq!(named.name(), "com.example.Point");

        let fallback = TypeDesc::internal_only(TypeKind::Struct, "Point$1");
        assert_eq!(fallback.name(), "Point$1");
        assert_eq!(fallback.internal_name(), "Point$1");
    }

    #[test]
    fn synthetic_flag() {
        assert!(!TypeDesc::named(TypeKind::Struct, "a.B").is_synthetic());
        assert!(TypeDesc::synthetic(TypeKind::Struct, "a.B$$lambda").is_synthetic());
    }

    #[test]
    fn builtins() {
        assert_eq!(TypeDesc::of_scalar(ScalarKind::I32).name(), "i32");
        assert_eq!(TypeDesc::of_text().name(), "str");
        assert_eq!(TypeDesc::of_bytes().name(), "[u8]");
        assert_eq!(TypeDesc::of_weak().name(), WEAK_TYPE_NAME);
    }
}
