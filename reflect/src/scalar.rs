//! Scalar values and their natural text forms.

use std::fmt;

/// The runtime kind of a scalar value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ScalarKind {
    /// Boolean.
    Bool,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// Single precision float.
    F32,
    /// Double precision float.
    F64,
    /// Unicode scalar value.
    Char,
}

impl ScalarKind {
    /// Returns the canonical type name for this scalar kind.
    pub fn type_name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Char => "char",
        }
    }
}

/// A scalar value as stored in primitive fields and inline element arrays.
///
/// The [`Display`][fmt::Display] implementation is the value's natural text form
/// used throughout dump output. Floats always keep a decimal point (`1.0`, not `1`)
/// so they stay distinguishable from integers.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// 8-bit signed integer value.
    I8(i8),
    /// 16-bit signed integer value.
    I16(i16),
    /// 32-bit signed integer value.
    I32(i32),
    /// 64-bit signed integer value.
    I64(i64),
    /// Single precision float value.
    F32(f32),
    /// Double precision float value.
    F64(f64),
    /// Unicode scalar value.
    Char(char),
}

impl Scalar {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::I8(_) => ScalarKind::I8,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::I64(_) => ScalarKind::I64,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
            Scalar::Char(_) => ScalarKind::Char,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::I8(value) => write!(f, "{value}"),
            Scalar::I16(value) => write!(f, "{value}"),
            Scalar::I32(value) => write!(f, "{value}"),
            Scalar::I64(value) => write!(f, "{value}"),
            // `Display` for floats drops the decimal point on whole values, `Debug`
            // keeps it.
            Scalar::F32(value) => write!(f, "{value:?}"),
            Scalar::F64(value) => write!(f, "{value:?}"),
            Scalar::Char(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_text_forms() {
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::I8(-3).to_string(), "-3");
        assert_eq!(Scalar::I64(1 << 40).to_string(), "1099511627776");
        assert_eq!(Scalar::F32(1.0).to_string(), "1.0");
        assert_eq!(Scalar::F64(-2.5).to_string(), "-2.5");
        assert_eq!(Scalar::Char('x').to_string(), "x");
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Scalar::I32(0).kind(), ScalarKind::I32);
        assert_eq!(Scalar::F64(0.0).kind(), ScalarKind::F64);
        assert_eq!(ScalarKind::Char.type_name(), "char");
    }
}
