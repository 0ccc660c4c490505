//! Batch probing: run a set of call descriptions against one library
//!
//! The embedding layer hands over a library path and a list of [`CallSpec`]s;
//! the harness opens the library, runs every spec in order, closes, and
//! returns one structured outcome per spec. Rendering the outcomes is the
//! caller's responsibility.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::binding::CallBinding;
use crate::error::FfiError;
use crate::library::NativeLibrary;
use crate::types::{CallSignature, Value};

/// One call description: which export to invoke, with what declared shape,
/// and which argument values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSpec {
    /// Export name to resolve
    pub symbol: String,
    /// Declared call shape
    pub signature: CallSignature,
    /// Argument values, matching the declared shape
    #[serde(default)]
    pub args: Vec<Value>,
}

impl CallSpec {
    pub fn new(symbol: impl Into<String>, signature: CallSignature, args: Vec<Value>) -> Self {
        Self {
            symbol: symbol.into(),
            signature,
            args,
        }
    }
}

/// The outcome of one [`CallSpec`], attributable to exactly that spec.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome {
    /// The export name the spec asked for
    pub symbol: String,
    /// Typed return value, or the structured error of the failing step
    pub result: Result<Value, FfiError>,
}

/// Open the library at `path`, run every spec in order, close, and return the
/// per-call outcomes.
///
/// A failure to open propagates as `LoadFailure`. Per-call failures (missing
/// symbol, signature mismatch, unsupported shape) are recorded in their
/// outcome and never stop the remaining specs, and no call is ever retried.
/// The library is closed before returning, so outcomes never hold live
/// bindings.
pub fn run_plan(
    path: impl AsRef<Path>,
    specs: &[CallSpec],
) -> Result<Vec<CallOutcome>, FfiError> {
    let mut library = NativeLibrary::open(path)?;

    let mut outcomes = Vec::with_capacity(specs.len());
    for spec in specs {
        let result = library
            .resolve(&spec.symbol)
            .map(|symbol| CallBinding::bind(symbol, spec.signature.clone()))
            .and_then(|binding| binding.invoke(&spec.args));
        outcomes.push(CallOutcome {
            symbol: spec.symbol.clone(),
            result,
        });
    }

    library.close()?;
    Ok(outcomes)
}
