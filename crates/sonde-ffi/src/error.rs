//! Error taxonomy for the call-boundary harness
//!
//! Every fallible operation returns a discriminated outcome; each variant is
//! attributable to exactly one failing component. A true signature/contract
//! violation at the native boundary is undefined behavior, not a reportable
//! error, and has no variant here.

use thiserror::Error;

/// Errors surfaced by library loading, symbol resolution, and invocation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FfiError {
    /// Library path missing, unreadable, or not a valid loadable image.
    /// Recoverable: the caller may retry with a corrected path.
    #[error("failed to load library '{path}': {reason}")]
    LoadFailure { path: String, reason: String },

    /// Requested export absent from the library. Recoverable: the caller may
    /// try an alternate name or treat the symbol as optional. The handle
    /// remains open and usable.
    #[error("symbol '{symbol}' not found in library '{library}'")]
    SymbolNotFound { symbol: String, library: String },

    /// Operation attempted through a binding whose library handle no longer
    /// exists. Programming error, surfaced immediately, never retried.
    #[error("no live library handle behind this binding")]
    InvalidState,

    /// Argument count or kind supplied at call time disagrees with the bound
    /// signature. Caught before the native boundary is touched; always
    /// recoverable locally.
    #[error("signature mismatch: expected {expected}, got {got}")]
    SignatureMismatch { expected: String, got: String },

    /// Operation on a handle after close, including a second close.
    /// Programming error, surfaced immediately.
    #[error("library '{path}' used after close")]
    UseAfterClose { path: String },

    /// Declared call shape outside the dispatch table. Reported before any
    /// native call is issued.
    #[error("unsupported call signature {signature}")]
    UnsupportedSignature { signature: String },
}
