//! Node descriptors and formatting helpers.

use std::fmt;

use graphdump_reflect::TypeDesc;

/// Identifies a visited node: its type name paired with the reference id assigned
/// on first visit.
///
/// Renders as `name#id`, used both as the header of a full expansion and as the
/// entire text of a backreference.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Descriptor {
    type_name: Box<str>,
    id: u32,
}

impl Descriptor {
    /// Creates a descriptor for `ty` with the given reference id.
    pub fn new(ty: &TypeDesc, id: u32) -> Self {
        Self {
            type_name: ty.name().into(),
            id,
        }
    }

    /// Returns the type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the reference id.
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name, self.id)
    }
}

/// Formats bytes as uppercase two-digit hex with no separators.
pub fn hex_upper(bytes: &[u8]) -> String {
    use fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(out, "{byte:02X}").unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use graphdump_reflect::TypeKind;

    use super::*;

    #[test]
    fn descriptor_text_form() {
        let ty = TypeDesc::named(TypeKind::Struct, "com.example.Point");
        assert_eq!(Descriptor::new(&ty, 3).to_string(), "com.example.Point#3");
    }

    #[test]
    fn hex_is_uppercase_without_separators() {
        assert_eq!(hex_upper(&[0x0a, 0xff]), "0AFF");
        assert_eq!(hex_upper(&[]), "");
        assert_eq!(hex_upper(&[0x00, 0x01, 0x10]), "000110");
    }
}
