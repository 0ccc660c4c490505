//! Sonde FFI - runtime probing of native shared libraries
//!
//! A minimal harness for binding to and invoking functions exported by a
//! separately compiled, dynamically loaded native library:
//! - Library lifecycle ([`NativeLibrary`]: open, resolve, close)
//! - Resolved entry points ([`ResolvedSymbol`])
//! - Declared call shapes ([`CallSignature`]) over primitive scalar kinds
//! - Invocation and marshaling ([`CallBinding`]), validated locally before
//!   the boundary is touched
//! - Batch probing ([`run_plan`]): a set of call descriptions in, structured
//!   outcomes out
//!
//! # Safety
//!
//! Crossing the call boundary means trusting a declared signature the native
//! side cannot confirm. All `unsafe` code is isolated in this crate behind
//! safe wrappers; a declared signature that disagrees with the native
//! definition is undefined behavior at call time, not a reportable error.

/// Sonde runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod binding;
pub mod error;
pub mod library;
pub mod probe;
pub mod symbol;
pub mod types;

mod marshal;

// Re-export commonly used types
pub use binding::CallBinding;
pub use error::FfiError;
pub use library::NativeLibrary;
pub use probe::{run_plan, CallOutcome, CallSpec};
pub use symbol::ResolvedSymbol;
pub use types::{CallSignature, Value, ValueKind};
