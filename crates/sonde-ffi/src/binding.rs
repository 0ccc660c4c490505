//! Call bindings and invocation across the native boundary
//!
//! A `CallBinding` pairs a resolved entry point with a declared shape and
//! issues calls through direct function-pointer casts selected by that shape.
//! Declared signatures are statically known at binding time, so direct casts
//! cover the supported shapes without a dynamic FFI library.

use crate::error::FfiError;
use crate::marshal::{self, expect_f64, expect_i32, expect_i64};
use crate::symbol::ResolvedSymbol;
use crate::types::{CallSignature, Value, ValueKind};

/// A resolved symbol paired with its declared call shape.
///
/// Construction cannot fail: the boundary has no introspectable type
/// information, so the signature is recorded as declared, not verified
/// against the native code. A binding is immutable once constructed and has
/// no teardown of its own beyond the owning library's close.
#[derive(Clone)]
pub struct CallBinding {
    symbol: ResolvedSymbol,
    signature: CallSignature,
}

impl CallBinding {
    /// Record the declared shape for `symbol`.
    pub fn bind(symbol: ResolvedSymbol, signature: CallSignature) -> Self {
        Self { symbol, signature }
    }

    /// The export name this binding calls
    pub fn name(&self) -> &str {
        self.symbol.name()
    }

    /// The declared call shape
    pub fn signature(&self) -> &CallSignature {
        &self.signature
    }

    /// Invoke the native function with `args`.
    ///
    /// Argument count and kinds are validated against the declared signature
    /// before the boundary is touched; a mismatch fails fast with
    /// `SignatureMismatch` and performs no native call. On a match the call is
    /// issued under the owning library's read lock, the declared-kind return
    /// is marshaled, and the result reported. Calls are never re-issued:
    /// native functions are not assumed idempotent.
    ///
    /// A signature that matches its local declaration but not the native
    /// definition cannot be detected here; such a call may corrupt memory,
    /// crash the process, or return nonsense. Keeping declarations next to
    /// the native library's own interface is the only mitigation.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, FfiError> {
        marshal::check_args(&self.signature, args)?;

        match self.symbol.library() {
            // Raw symbol: lifetime is the caller's contract from `from_raw`.
            None => unsafe { self.dispatch(args) },
            Some(weak) => {
                let state = weak.upgrade().ok_or(FfiError::InvalidState)?;
                let guard = state.read();
                if guard.is_none() {
                    return Err(FfiError::UseAfterClose {
                        path: state.display_path(),
                    });
                }
                // The read guard stays held across the call so a concurrent
                // close cannot unmap the entry point mid-call.
                let result = unsafe { self.dispatch(args) };
                drop(guard);
                result
            }
        }
    }

    /// Issue the call through a function-pointer cast selected by the
    /// declared shape.
    ///
    /// # Safety
    ///
    /// The entry point must stay mapped for the duration of the call and the
    /// declared signature must match the native definition.
    unsafe fn dispatch(&self, args: &[Value]) -> Result<Value, FfiError> {
        use ValueKind::{Float64, Int32, Int64, Void};

        let addr = self.symbol.addr();

        match (self.signature.params(), self.signature.ret()) {
            // No arguments
            ([], Int32) => {
                let f: extern "C" fn() -> i32 = std::mem::transmute(addr);
                Ok(Value::Int32(f()))
            }
            ([], Int64) => {
                let f: extern "C" fn() -> i64 = std::mem::transmute(addr);
                Ok(Value::Int64(f()))
            }
            ([], Float64) => {
                let f: extern "C" fn() -> f64 = std::mem::transmute(addr);
                Ok(Value::Float64(f()))
            }
            ([], Void) => {
                let f: extern "C" fn() = std::mem::transmute(addr);
                f();
                Ok(Value::Void)
            }

            // One argument
            ([Int32], Int32) => {
                let f: extern "C" fn(i32) -> i32 = std::mem::transmute(addr);
                Ok(Value::Int32(f(expect_i32(&args[0]))))
            }
            ([Int32], Void) => {
                let f: extern "C" fn(i32) = std::mem::transmute(addr);
                f(expect_i32(&args[0]));
                Ok(Value::Void)
            }
            ([Int64], Int64) => {
                let f: extern "C" fn(i64) -> i64 = std::mem::transmute(addr);
                Ok(Value::Int64(f(expect_i64(&args[0]))))
            }
            ([Int64], Void) => {
                let f: extern "C" fn(i64) = std::mem::transmute(addr);
                f(expect_i64(&args[0]));
                Ok(Value::Void)
            }
            ([Float64], Float64) => {
                let f: extern "C" fn(f64) -> f64 = std::mem::transmute(addr);
                Ok(Value::Float64(f(expect_f64(&args[0]))))
            }
            ([Float64], Void) => {
                let f: extern "C" fn(f64) = std::mem::transmute(addr);
                f(expect_f64(&args[0]));
                Ok(Value::Void)
            }

            // Two arguments
            ([Int32, Int32], Int32) => {
                let f: extern "C" fn(i32, i32) -> i32 = std::mem::transmute(addr);
                Ok(Value::Int32(f(expect_i32(&args[0]), expect_i32(&args[1]))))
            }
            ([Int32, Int32], Void) => {
                let f: extern "C" fn(i32, i32) = std::mem::transmute(addr);
                f(expect_i32(&args[0]), expect_i32(&args[1]));
                Ok(Value::Void)
            }
            ([Int64, Int64], Int64) => {
                let f: extern "C" fn(i64, i64) -> i64 = std::mem::transmute(addr);
                Ok(Value::Int64(f(expect_i64(&args[0]), expect_i64(&args[1]))))
            }
            ([Int64, Int64], Void) => {
                let f: extern "C" fn(i64, i64) = std::mem::transmute(addr);
                f(expect_i64(&args[0]), expect_i64(&args[1]));
                Ok(Value::Void)
            }
            ([Float64, Float64], Float64) => {
                let f: extern "C" fn(f64, f64) -> f64 = std::mem::transmute(addr);
                Ok(Value::Float64(f(expect_f64(&args[0]), expect_f64(&args[1]))))
            }
            ([Float64, Float64], Void) => {
                let f: extern "C" fn(f64, f64) = std::mem::transmute(addr);
                f(expect_f64(&args[0]), expect_f64(&args[1]));
                Ok(Value::Void)
            }

            // Three arguments
            ([Int32, Int32, Int32], Int32) => {
                let f: extern "C" fn(i32, i32, i32) -> i32 = std::mem::transmute(addr);
                Ok(Value::Int32(f(
                    expect_i32(&args[0]),
                    expect_i32(&args[1]),
                    expect_i32(&args[2]),
                )))
            }
            ([Int64, Int64, Int64], Int64) => {
                let f: extern "C" fn(i64, i64, i64) -> i64 = std::mem::transmute(addr);
                Ok(Value::Int64(f(
                    expect_i64(&args[0]),
                    expect_i64(&args[1]),
                    expect_i64(&args[2]),
                )))
            }
            ([Float64, Float64, Float64], Float64) => {
                let f: extern "C" fn(f64, f64, f64) -> f64 = std::mem::transmute(addr);
                Ok(Value::Float64(f(
                    expect_f64(&args[0]),
                    expect_f64(&args[1]),
                    expect_f64(&args[2]),
                )))
            }

            _ => Err(FfiError::UnsupportedSignature {
                signature: self.signature.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    // In-process C-ABI functions standing in for native exports.

    extern "C" fn test_add(a: i32, b: i32) -> i32 {
        a + b
    }

    extern "C" fn test_scale(value: f64, factor: f64) -> f64 {
        value * factor
    }

    extern "C" fn test_widen(v: i64) -> i64 {
        v * 2
    }

    extern "C" fn test_no_args() -> i32 {
        42
    }

    static NOOP_CALLS: AtomicU32 = AtomicU32::new(0);

    extern "C" fn test_noop() {
        NOOP_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn bind_raw(name: &str, addr: *const (), params: Vec<ValueKind>, ret: ValueKind) -> CallBinding {
        let symbol = unsafe { ResolvedSymbol::from_raw(name, addr) };
        CallBinding::bind(symbol, CallSignature::new(params, ret))
    }

    #[test]
    fn test_invoke_add() {
        let binding = bind_raw(
            "test_add",
            test_add as *const (),
            vec![ValueKind::Int32, ValueKind::Int32],
            ValueKind::Int32,
        );

        let result = binding.invoke(&[Value::Int32(3), Value::Int32(2)]).unwrap();
        assert_eq!(result, Value::Int32(5));
    }

    #[test]
    fn test_invoke_is_deterministic_for_pure_functions() {
        let binding = bind_raw(
            "test_add",
            test_add as *const (),
            vec![ValueKind::Int32, ValueKind::Int32],
            ValueKind::Int32,
        );

        let first = binding.invoke(&[Value::Int32(20), Value::Int32(22)]).unwrap();
        let second = binding.invoke(&[Value::Int32(20), Value::Int32(22)]).unwrap();
        assert_eq!(first, Value::Int32(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_invoke_float64() {
        let binding = bind_raw(
            "test_scale",
            test_scale as *const (),
            vec![ValueKind::Float64, ValueKind::Float64],
            ValueKind::Float64,
        );

        let result = binding
            .invoke(&[Value::Float64(21.0), Value::Float64(2.0)])
            .unwrap();
        assert_eq!(result, Value::Float64(42.0));
    }

    #[test]
    fn test_invoke_int64() {
        let binding = bind_raw(
            "test_widen",
            test_widen as *const (),
            vec![ValueKind::Int64],
            ValueKind::Int64,
        );

        let result = binding.invoke(&[Value::Int64(1 << 40)]).unwrap();
        assert_eq!(result, Value::Int64(1 << 41));
    }

    #[test]
    fn test_invoke_no_args() {
        let binding = bind_raw(
            "test_no_args",
            test_no_args as *const (),
            vec![],
            ValueKind::Int32,
        );

        assert_eq!(binding.invoke(&[]).unwrap(), Value::Int32(42));
    }

    #[test]
    fn test_mismatch_performs_no_native_call() {
        let binding = bind_raw("test_noop", test_noop as *const (), vec![], ValueKind::Void);

        let before = NOOP_CALLS.load(Ordering::SeqCst);
        let result = binding.invoke(&[Value::Int32(1)]);
        assert!(matches!(result, Err(FfiError::SignatureMismatch { .. })));
        assert_eq!(NOOP_CALLS.load(Ordering::SeqCst), before);

        let result = binding.invoke(&[]).unwrap();
        assert_eq!(result, Value::Void);
        assert_eq!(NOOP_CALLS.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_invoke_wrong_kind() {
        let binding = bind_raw(
            "test_add",
            test_add as *const (),
            vec![ValueKind::Int32, ValueKind::Int32],
            ValueKind::Int32,
        );

        let result = binding.invoke(&[Value::Int32(3), Value::Float64(2.0)]);
        assert!(matches!(result, Err(FfiError::SignatureMismatch { .. })));
    }

    #[test]
    fn test_unsupported_signature_reported_before_call() {
        let binding = bind_raw(
            "test_add",
            test_add as *const (),
            vec![ValueKind::Int32; 4],
            ValueKind::Int32,
        );

        let args = vec![Value::Int32(1); 4];
        let result = binding.invoke(&args);
        match result {
            Err(FfiError::UnsupportedSignature { signature }) => {
                assert_eq!(signature, "(int32, int32, int32, int32) -> int32");
            }
            other => panic!("expected UnsupportedSignature, got {other:?}"),
        }
    }
}
