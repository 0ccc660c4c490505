// Fixture shared library for the harness tests. Compiled at test time with
// `rustc --crate-type cdylib`; every export uses the C ABI and primitive
// scalars only.

use std::sync::atomic::{AtomicI64, Ordering};

static EXECUTE_CALLS: AtomicI64 = AtomicI64::new(0);

#[no_mangle]
pub extern "C" fn add_numbers(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

#[no_mangle]
pub extern "C" fn execute() {
    EXECUTE_CALLS.fetch_add(1, Ordering::SeqCst);
}

#[no_mangle]
pub extern "C" fn execute_count() -> i64 {
    EXECUTE_CALLS.load(Ordering::SeqCst)
}

#[no_mangle]
pub extern "C" fn negate(value: i64) -> i64 {
    value.wrapping_neg()
}

#[no_mangle]
pub extern "C" fn scale(value: f64, factor: f64) -> f64 {
    value * factor
}

#[no_mangle]
pub extern "C" fn forty_two() -> i32 {
    42
}
