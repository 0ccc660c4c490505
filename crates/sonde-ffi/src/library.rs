//! Native library loading, lifecycle, and symbol resolution
//!
//! Cross-platform dynamic library loading via `libloading`. A
//! [`NativeLibrary`] is either open or closed; once closed, every operation on
//! it or on symbols and bindings derived from it fails with `UseAfterClose`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use libloading::Library;

use crate::error::FfiError;
use crate::symbol::ResolvedSymbol;

/// Lifecycle state shared between a library handle and everything resolved
/// from it.
///
/// The OS handle lives behind an `RwLock`: invocations hold the read lock for
/// the duration of a native call and `close` takes the write lock, so a close
/// is serialized with respect to in-flight calls. `None` means closed.
#[derive(Debug)]
pub(crate) struct LibraryState {
    pub(crate) path: PathBuf,
    pub(crate) handle: RwLock<Option<Library>>,
}

impl LibraryState {
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Option<Library>> {
        // The slot is a plain Option; recover the guard if a prior caller
        // panicked while holding it.
        self.handle.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Library>> {
        self.handle.write().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// One successfully opened native library.
///
/// Exclusively owned by the caller that opened it; only the owner can close
/// it. Symbols and bindings derived from the handle hold weak back-references,
/// never ownership. Dropping the handle without an explicit [`close`] releases
/// the OS handle as well, so a handle cannot leak across an error path.
///
/// [`close`]: NativeLibrary::close
#[derive(Debug)]
pub struct NativeLibrary {
    state: Arc<LibraryState>,
}

impl NativeLibrary {
    /// Load the shared object at `path`.
    ///
    /// Fails with `LoadFailure` when the file does not exist, is not a valid
    /// loadable image for the current platform, or the OS loader reports a
    /// link or dependency error. Loading the same path twice may share the
    /// underlying OS mapping, but each `open` yields an independent handle.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FfiError> {
        let path = path.as_ref().to_path_buf();

        // Safety: loading a shared object runs its initialization code in
        // this process. The caller vouches for the artifact.
        let library = unsafe {
            Library::new(&path).map_err(|e| FfiError::LoadFailure {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        };

        Ok(Self {
            state: Arc::new(LibraryState {
                path,
                handle: RwLock::new(Some(library)),
            }),
        })
    }

    /// The path this library was opened from
    pub fn path(&self) -> &Path {
        &self.state.path
    }

    /// Whether the handle is still open
    pub fn is_open(&self) -> bool {
        self.state.read().is_some()
    }

    /// Release the OS handle.
    ///
    /// Must run exactly once: a second close, like any other operation after
    /// close, fails with `UseAfterClose`. Closing invalidates every
    /// `ResolvedSymbol` and `CallBinding` derived from this handle. The write
    /// lock serializes close against in-flight invocations, and the exclusive
    /// borrow keeps close with the owner of the handle.
    pub fn close(&mut self) -> Result<(), FfiError> {
        let mut guard = self.state.write();
        match guard.take() {
            Some(library) => {
                drop(library);
                Ok(())
            }
            None => Err(FfiError::UseAfterClose {
                path: self.state.display_path(),
            }),
        }
    }

    /// Look up `name` in the library's export table.
    ///
    /// A pure lookup: idempotent, side-effect-free, and safe to issue from
    /// multiple threads sharing the handle. Fails with `SymbolNotFound` when
    /// the export is absent; the handle stays open and usable. Resolution does
    /// not validate that the symbol is callable or matches any signature —
    /// the native side carries no machine-checkable signature metadata, so
    /// that contract belongs to `CallBinding`.
    pub fn resolve(&self, name: &str) -> Result<ResolvedSymbol, FfiError> {
        let guard = self.state.read();
        let library = guard.as_ref().ok_or_else(|| FfiError::UseAfterClose {
            path: self.state.display_path(),
        })?;

        // Safety: the symbol is only used as an opaque address until a
        // CallBinding declares a shape for it.
        let symbol: libloading::Symbol<'_, *const ()> = unsafe {
            library
                .get(name.as_bytes())
                .map_err(|_| FfiError::SymbolNotFound {
                    symbol: name.to_string(),
                    library: self.state.display_path(),
                })?
        };

        let addr: *const () = *symbol;
        Ok(ResolvedSymbol::new(
            name.to_string(),
            addr,
            Arc::downgrade(&self.state),
        ))
    }
}
