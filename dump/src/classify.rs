//! Decides whether values of a type render inline or as structured nodes.

use graphdump_reflect::{ClassInfoProvider, TypeDesc, TypeKind};

/// Returns whether instances of `ty` render as inline literals via their natural
/// text form instead of being expanded as structured nodes.
///
/// Inline values are never traversed into, never assigned reference ids, and never
/// deduplicated. Byte sequences and arrays, by contrast, always participate in
/// dedup even when their elements are scalars.
pub fn should_inline(provider: &dyn ClassInfoProvider, ty: &TypeDesc) -> bool {
    match ty.kind() {
        // Array kinds are never inlined.
        TypeKind::Bytes | TypeKind::Array => false,
        // Sequences and mappings have bespoke aggregate handling in the walker and
        // do not depend on reflective class information.
        TypeKind::Sequence | TypeKind::Mapping => false,
        // Weak references are resolved by the walker before classification.
        TypeKind::Weak => false,
        TypeKind::Scalar(_) | TypeKind::Text | TypeKind::TypeName | TypeKind::Opaque => true,
        // Closed classes render via their own text form as there's nothing else
        // that can be done with them.
        TypeKind::Struct => ty.is_synthetic() || provider.class_info(ty).is_closed(),
    }
}

#[cfg(test)]
mod tests {
    use graphdump_reflect::{ClassRegistry, FieldInfo, ScalarKind};

    use super::*;

    #[test]
    fn classification_rules() {
        let mut registry = ClassRegistry::new();
        registry.register_open(
            "com.example.Point",
            vec![FieldInfo::scalar("x", ScalarKind::I32)],
        );

        // Scalar-like kinds inline.
        assert!(should_inline(&registry, &TypeDesc::of_scalar(ScalarKind::I64)));
        assert!(should_inline(&registry, &TypeDesc::of_text()));
        assert!(should_inline(&registry, &TypeDesc::of_type_name()));

        // Arrays, sequences and mappings never inline.
        assert!(!should_inline(&registry, &TypeDesc::of_bytes()));
        assert!(!should_inline(
            &registry,
            &TypeDesc::named(TypeKind::Array, "[i32; 3]")
        ));
        assert!(!should_inline(
            &registry,
            &TypeDesc::named(TypeKind::Sequence, "com.example.List")
        ));
        assert!(!should_inline(
            &registry,
            &TypeDesc::named(TypeKind::Mapping, "com.example.Table")
        ));

        // Open structs expand, closed or synthetic ones inline.
        assert!(!should_inline(
            &registry,
            &TypeDesc::named(TypeKind::Struct, "com.example.Point")
        ));
        assert!(should_inline(
            &registry,
            &TypeDesc::named(TypeKind::Struct, "com.example.Unregistered")
        ));
        assert!(should_inline(
            &registry,
            &TypeDesc::synthetic(TypeKind::Struct, "com.example.Point$$lambda")
        ));
    }
}
