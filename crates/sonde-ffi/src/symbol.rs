//! Resolved export entry points

use std::sync::Weak;

use crate::library::LibraryState;

/// One named export resolved inside a library.
///
/// Carries the symbol name and the raw entry-point address. It performs no
/// call by itself: invocation requires a `CallBinding` that declares the call
/// shape. A symbol resolved from a [`NativeLibrary`](crate::NativeLibrary)
/// holds a weak back-reference to the owning handle and is invalidated by its
/// close; it never keeps the library alive.
#[derive(Clone, Debug)]
pub struct ResolvedSymbol {
    name: String,
    addr: *const (),
    library: Option<Weak<LibraryState>>,
}

// Safety: the address is never dereferenced through ResolvedSymbol itself;
// the invoker only calls through it while holding the owning library's read
// lock (or, for raw symbols, under the caller's lifetime contract).
unsafe impl Send for ResolvedSymbol {}
unsafe impl Sync for ResolvedSymbol {}

impl ResolvedSymbol {
    pub(crate) fn new(name: String, addr: *const (), library: Weak<LibraryState>) -> Self {
        Self {
            name,
            addr,
            library: Some(library),
        }
    }

    /// Wrap an entry point the caller already owns, such as an in-process
    /// `extern "C"` function.
    ///
    /// No library lifecycle is tracked for a raw symbol.
    ///
    /// # Safety
    ///
    /// The caller must ensure `addr` is a callable entry point that stays
    /// mapped for as long as the symbol (or any binding built from it) is
    /// used.
    pub unsafe fn from_raw(name: impl Into<String>, addr: *const ()) -> Self {
        Self {
            name: name.into(),
            addr,
            library: None,
        }
    }

    /// The export name this symbol was resolved under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn addr(&self) -> *const () {
        self.addr
    }

    pub(crate) fn library(&self) -> Option<&Weak<LibraryState>> {
        self.library.as_ref()
    }
}
