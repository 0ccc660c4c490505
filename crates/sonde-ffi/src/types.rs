//! Scalar kinds, runtime values, and declared call shapes
//!
//! Defines:
//! - `ValueKind`: the closed set of kinds a call boundary slot can carry
//! - `Value`: runtime representation of one scalar crossing the boundary
//! - `CallSignature`: the declared shape of one native call
//!
//! Kind mapping:
//! - ValueKind::Int32 → Value::Int32(i32), two's-complement 32-bit
//! - ValueKind::Int64 → Value::Int64(i64), two's-complement 64-bit
//! - ValueKind::Float64 → Value::Float64(f64), IEEE-754 double precision
//! - ValueKind::Void → Value::Void (return position only; no data)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared kind of one argument or return slot.
///
/// A signature is built from these kinds and is fixed at binding time; it is
/// never inferred from runtime values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit IEEE-754 float
    Float64,
    /// No value (return position of side-effect-only calls)
    Void,
}

impl ValueKind {
    /// Get a display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Float64 => "float64",
            ValueKind::Void => "void",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Runtime representation of one scalar crossing the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// 32-bit signed integer value
    Int32(i32),
    /// 64-bit signed integer value
    Int64(i64),
    /// 64-bit float value
    Float64(f64),
    /// No value
    Void,
}

impl Value {
    /// The kind this value occupies at the boundary
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int32(_) => ValueKind::Int32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Float64(_) => ValueKind::Float64,
            Value::Void => ValueKind::Void,
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

/// The declared call shape for one symbol: an ordered sequence of argument
/// kinds and one return kind.
///
/// Immutable once constructed. The boundary carries no machine-checkable
/// signature metadata, so this declaration is an externally-asserted contract;
/// it governs exactly how each argument is encoded for the call and how the
/// raw return is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSignature {
    params: Vec<ValueKind>,
    ret: ValueKind,
}

impl CallSignature {
    /// Declare a call shape from argument kinds and a return kind.
    pub fn new(params: Vec<ValueKind>, ret: ValueKind) -> Self {
        Self { params, ret }
    }

    /// Declare a no-argument shape issued for its side effect only.
    pub fn void() -> Self {
        Self::new(Vec::new(), ValueKind::Void)
    }

    /// Get the declared argument kinds
    pub fn params(&self) -> &[ValueKind] {
        &self.params
    }

    /// Get the declared return kind
    pub fn ret(&self) -> ValueKind {
        self.ret
    }

    /// Number of declared arguments
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for CallSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.params.iter().map(|k| k.display_name()).collect();
        write!(f, "({}) -> {}", params.join(", "), self.ret.display_name())
    }
}
