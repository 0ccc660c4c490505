//! Local validation of argument values against a declared signature
//!
//! Everything here runs before the native boundary is touched: a mismatch is
//! reported as `SignatureMismatch` and no native call happens.

use crate::error::FfiError;
use crate::types::{CallSignature, Value};

/// Check argument count and per-position kinds against `signature`.
pub(crate) fn check_args(signature: &CallSignature, args: &[Value]) -> Result<(), FfiError> {
    let params = signature.params();

    if args.len() != params.len() {
        return Err(FfiError::SignatureMismatch {
            expected: format!("{} argument(s)", params.len()),
            got: format!("{} argument(s)", args.len()),
        });
    }

    for (index, (arg, kind)) in args.iter().zip(params).enumerate() {
        if arg.kind() != *kind {
            return Err(FfiError::SignatureMismatch {
                expected: format!("{} at position {}", kind.display_name(), index),
                got: arg.kind().display_name().to_string(),
            });
        }
    }

    Ok(())
}

// Extraction helpers for the dispatch arms. Kinds are validated by
// `check_args` before dispatch, so a mismatch here is unreachable.

pub(crate) fn expect_i32(value: &Value) -> i32 {
    match value {
        Value::Int32(v) => *v,
        _ => unreachable!("argument kinds validated before dispatch"),
    }
}

pub(crate) fn expect_i64(value: &Value) -> i64 {
    match value {
        Value::Int64(v) => *v,
        _ => unreachable!("argument kinds validated before dispatch"),
    }
}

pub(crate) fn expect_f64(value: &Value) -> f64 {
    match value {
        Value::Float64(v) => *v,
        _ => unreachable!("argument kinds validated before dispatch"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueKind;

    fn add_signature() -> CallSignature {
        CallSignature::new(vec![ValueKind::Int32, ValueKind::Int32], ValueKind::Int32)
    }

    #[test]
    fn test_check_args_accepts_matching_shape() {
        let sig = add_signature();
        assert!(check_args(&sig, &[Value::Int32(3), Value::Int32(2)]).is_ok());
    }

    #[test]
    fn test_check_args_rejects_wrong_arity() {
        let sig = add_signature();
        let err = check_args(&sig, &[Value::Int32(3)]).unwrap_err();
        assert!(matches!(err, FfiError::SignatureMismatch { .. }));
    }

    #[test]
    fn test_check_args_rejects_wrong_kind() {
        let sig = add_signature();
        let err = check_args(&sig, &[Value::Int32(3), Value::Float64(2.0)]).unwrap_err();
        match err {
            FfiError::SignatureMismatch { expected, got } => {
                assert_eq!(expected, "int32 at position 1");
                assert_eq!(got, "float64");
            }
            other => panic!("expected SignatureMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_check_args_empty_signature() {
        let sig = CallSignature::void();
        assert!(check_args(&sig, &[]).is_ok());
        assert!(check_args(&sig, &[Value::Int32(1)]).is_err());
    }

    #[test]
    fn test_extraction_helpers() {
        assert_eq!(expect_i32(&Value::Int32(-7)), -7);
        assert_eq!(expect_i64(&Value::Int64(1 << 40)), 1 << 40);
        assert_eq!(expect_f64(&Value::Float64(0.25)), 0.25);
    }
}
