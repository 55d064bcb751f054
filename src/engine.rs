use std::ffi::{c_char, c_uchar, CStr, CString};
use std::fs;
use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};

use migemo_sys::{self as sys, MigemoApi};
use tracing::{debug, debug_span, warn};

use crate::codec::{Decoder, Encoder};
use crate::dialect::Dialect;
use crate::error::{MigemoError, Result};
use crate::kind::{DataFileKind, OperatorKind};
use crate::regexp::RegexpString;
use crate::settings::Settings;

/// Owner of one native C/Migemo engine.
///
/// The engine is closed exactly once when the `Migemo` is dropped. It is
/// `Send` but not `Sync`: wrap it in a `Mutex` to share it between threads.
pub struct Migemo {
    raw: Option<NonNull<sys::migemo>>,
    api: &'static MigemoApi,
}

// SAFETY: the engine has no thread affinity; `&mut self` on every mutating
// call keeps access exclusive.
unsafe impl Send for Migemo {}

impl Migemo {
    /// Open an engine from the linked libmigemo, with no dictionaries loaded.
    #[cfg(feature = "link")]
    pub fn new() -> Self {
        // SAFETY: `LINKED` points at the real libmigemo symbols.
        unsafe { Self::with_api(&MigemoApi::LINKED) }
    }

    /// Like [`Migemo::new`] but fails if the engine could not be allocated.
    #[cfg(feature = "link")]
    pub fn try_new() -> Result<Self> {
        // SAFETY: `LINKED` points at the real libmigemo symbols.
        unsafe { Self::try_with_api(&MigemoApi::LINKED) }
    }

    /// Open an engine through `api`.
    ///
    /// Never fails. If the native open returns null the handle is kept in an
    /// unusable state and every fallible operation returns
    /// [`MigemoError::EngineUnavailable`].
    ///
    /// # Safety
    /// Every function in `api` must honor the C/Migemo 1.3 contract: `open`
    /// returns null or an engine that `close` frees, `query` returns null or
    /// a NUL-terminated buffer that only `release` frees, and `get_operator`
    /// returns null or a NUL-terminated string owned by the engine.
    ///
    /// ```compile_fail,E0133
    /// fn open(api: &'static migemo::sys::MigemoApi) -> migemo::Migemo {
    ///     migemo::Migemo::with_api(api)
    /// }
    /// ```
    pub unsafe fn with_api(api: &'static MigemoApi) -> Self {
        // SAFETY: a null dictionary path is accepted by `open`.
        let raw = NonNull::new(unsafe { (api.open)(ptr::null()) });
        if raw.is_none() {
            warn!("migemo_open returned null");
        } else {
            debug!("migemo engine opened");
        }
        Self { raw, api }
    }

    /// Like [`Migemo::with_api`] but fails if the engine could not be
    /// allocated.
    ///
    /// # Safety
    /// Same contract as [`Migemo::with_api`].
    pub unsafe fn try_with_api(api: &'static MigemoApi) -> Result<Self> {
        // SAFETY: forwarded from the caller.
        let migemo = unsafe { Self::with_api(api) };
        if migemo.raw.is_none() {
            return Err(MigemoError::EngineUnavailable);
        }
        Ok(migemo)
    }

    /// Open an engine with `dict` as its migemo-dict.
    ///
    /// The native open also picks up the conversion tables next to `dict`.
    ///
    /// # Safety
    /// Same contract as [`Migemo::with_api`].
    pub unsafe fn open_dictionary(
        api: &'static MigemoApi,
        dict: impl AsRef<Path>,
    ) -> Result<Self> {
        let dict = dict.as_ref();
        let c_path = path_to_cstring(dict)?;
        // SAFETY: `c_path` is NUL-terminated and outlives the call.
        let raw = NonNull::new(unsafe { (api.open)(c_path.as_ptr()) })
            .ok_or(MigemoError::EngineUnavailable)?;
        let migemo = Self {
            raw: Some(raw),
            api,
        };
        if !migemo.is_loaded() {
            return Err(MigemoError::Load {
                kind: DataFileKind::MigemoDict,
                path: dict.to_path_buf(),
            });
        }
        debug!(path = %dict.display(), "migemo engine opened with dictionary");
        Ok(migemo)
    }

    /// Whether the native engine was allocated.
    pub fn is_valid(&self) -> bool {
        self.raw.is_some()
    }

    /// The native engine pointer (null if unavailable). Ownership stays with
    /// `self`.
    pub fn as_raw(&self) -> *mut sys::migemo {
        self.raw.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    fn handle(&self) -> Result<*mut sys::migemo> {
        self.raw
            .map(NonNull::as_ptr)
            .ok_or(MigemoError::EngineUnavailable)
    }

    /// The fragment currently used for `kind`. PCRE syntax unless changed.
    pub fn operator(&self, kind: OperatorKind) -> Result<&[u8]> {
        let raw = self.handle()?;
        // SAFETY: `raw` is live and `as_raw` is a valid operator index.
        let op = unsafe { (self.api.get_operator)(raw, kind.as_raw()) };
        if op.is_null() {
            return Ok(&[]);
        }
        // SAFETY: the engine keeps the fragment alive until the next
        // set_operator, which needs `&mut self`.
        Ok(unsafe { CStr::from_ptr(op.cast::<c_char>()) }.to_bytes())
    }

    /// Load a dictionary or mapping file, returning the kind the engine
    /// actually loaded it as.
    pub fn load(&mut self, kind: DataFileKind, path: impl AsRef<Path>) -> Result<DataFileKind> {
        let path = path.as_ref();
        let _span = debug_span!("migemo_load", %kind, path = %path.display()).entered();
        let raw = self.handle()?;
        let c_path = path_to_cstring(path)?;

        // SAFETY: `raw` is live and `c_path` outlives the call.
        let loaded = unsafe { (self.api.load)(raw, kind.as_raw(), c_path.as_ptr()) };
        if loaded == sys::MIGEMO_DICTID_INVALID {
            debug!("rejected");
            return Err(MigemoError::Load {
                kind,
                path: path.to_path_buf(),
            });
        }
        let resolved = DataFileKind::try_from(loaded).map_err(MigemoError::UnknownDictId)?;
        debug!(%resolved, "loaded");
        Ok(resolved)
    }

    /// Load every conventionally named file present in `dir`.
    ///
    /// Files are probed in [`DataFileKind::DEFAULT_FILES`] order. Missing
    /// files are skipped; the first file that exists but fails to load stops
    /// the batch with its error. Returns the kinds loaded, in order.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<Vec<DataFileKind>> {
        let dir = dir.as_ref();
        let _span = debug_span!("migemo_load_dir", dir = %dir.display()).entered();
        self.handle()?;

        let mut loaded = Vec::new();
        for (kind, path) in default_paths(dir) {
            if fs::metadata(&path).is_err() {
                debug!(path = %path.display(), "not present, skipped");
                continue;
            }
            loaded.push(self.load(kind, &path)?);
        }
        debug!(count = loaded.len(), "directory loaded");
        Ok(loaded)
    }

    /// True once any dictionary has been loaded. False for an unusable handle.
    pub fn is_loaded(&self) -> bool {
        match self.raw {
            // SAFETY: `raw` stays live until `Drop`.
            Some(raw) => unsafe { (self.api.is_enable)(raw.as_ptr()) != 0 },
            None => false,
        }
    }

    /// Install the decoder used when parsing dictionary files loaded from
    /// now on. `None` restores the built-in decoder.
    pub fn set_decoder(&mut self, decoder: Option<Decoder>) -> Result<()> {
        let raw = self.handle()?;
        // SAFETY: `raw` is live; `decoder` is a plain `extern "C"` fn.
        unsafe { (self.api.setproc_char2int)(raw, decoder) };
        Ok(())
    }

    /// Install the encoder used when rendering characters. `None` restores
    /// the built-in encoder.
    pub fn set_encoder(&mut self, encoder: Option<Encoder>) -> Result<()> {
        let raw = self.handle()?;
        // SAFETY: `raw` is live; `encoder` is a plain `extern "C"` fn.
        unsafe { (self.api.setproc_int2char)(raw, encoder) };
        Ok(())
    }

    /// Replace the fragment used for `kind`.
    ///
    /// Returns `Ok(false)` if the engine rejects it (too long, or containing
    /// a NUL byte); the previous fragment then stays in effect.
    pub fn set_operator(&mut self, kind: OperatorKind, op: impl AsRef<[u8]>) -> Result<bool> {
        let raw = self.handle()?;
        let Ok(op) = CString::new(op.as_ref()) else {
            return Ok(false);
        };
        // SAFETY: `raw` is live and `op` is NUL-terminated; the engine
        // copies the fragment.
        let accepted =
            unsafe { (self.api.set_operator)(raw, kind.as_raw(), op.as_ptr().cast::<c_uchar>()) }
                != 0;
        if accepted {
            debug!(%kind, op = %op.to_string_lossy(), "operator set");
        } else {
            debug!(%kind, "operator rejected");
        }
        Ok(accepted)
    }

    /// Apply every fragment of `dialect`. Returns `Ok(true)` only if the
    /// engine accepted all of them.
    pub fn set_dialect(&mut self, dialect: Dialect) -> Result<bool> {
        let mut all = true;
        for (kind, frag) in dialect.fragments() {
            all &= self.set_operator(kind, frag)?;
        }
        Ok(all)
    }

    /// Load the configured dictionary directory, then apply the dialect and
    /// per-role overrides.
    ///
    /// Stops with [`MigemoError::OperatorRejected`] at the first fragment the
    /// engine refuses; fragments applied before it stay in effect.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<()> {
        if let Some(dir) = settings.dictionary_dir() {
            self.load_dir(dir)?;
        }
        for (kind, frag) in settings.operator_fragments() {
            if !self.set_operator(kind, frag.as_bytes())? {
                warn!(%kind, frag = %frag, "operator rejected by engine");
                return Err(MigemoError::OperatorRejected {
                    kind,
                    fragment: frag,
                });
            }
        }
        Ok(())
    }

    /// Expand SKK-style romaji into a pattern matching its Japanese
    /// renderings.
    ///
    /// `Ok(None)` when the engine produced nothing (e.g. no dictionary).
    pub fn query(&mut self, romaji: impl AsRef<[u8]>) -> Result<Option<RegexpString>> {
        let raw = self.handle()?;
        let input = CString::new(romaji.as_ref()).map_err(|_| MigemoError::InvalidQuery)?;
        // SAFETY: `raw` is live and `input` is NUL-terminated.
        let out = unsafe { (self.api.query)(raw, input.as_ptr().cast::<c_uchar>()) };
        let Some(out) = NonNull::new(out) else {
            debug!(input_len = input.as_bytes().len(), "no pattern");
            return Ok(None);
        };
        // SAFETY: `out` was just returned by query and nothing else owns it.
        let pattern = unsafe { RegexpString::from_raw(out, self.api) };
        debug!(
            input_len = input.as_bytes().len(),
            pattern_len = pattern.len(),
            "query"
        );
        Ok(Some(pattern))
    }

    /// [`Migemo::query`] for UTF-8 input and output.
    pub fn query_str(&mut self, romaji: &str) -> Result<Option<String>> {
        match self.query(romaji)? {
            Some(pattern) => Ok(Some(pattern.to_str()?.to_owned())),
            None => Ok(None),
        }
    }
}

#[cfg(feature = "link")]
impl Default for Migemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Migemo {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            // SAFETY: `take` guarantees this is the only close of `raw`.
            unsafe { (self.api.close)(raw.as_ptr()) };
            debug!("migemo engine closed");
        }
    }
}

impl std::fmt::Debug for Migemo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migemo")
            .field("valid", &self.is_valid())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| MigemoError::InvalidPath(path.to_path_buf()))
}

#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Result<CString> {
    let s = path.to_string_lossy().into_owned();
    CString::new(s).map_err(|_| MigemoError::InvalidPath(path.to_path_buf()))
}

/// Paths [`Migemo::load_dir`] probes in `dir`, in order. `Path::join` adds a
/// separator only when `dir` lacks one.
pub fn default_paths(dir: impl AsRef<Path>) -> Vec<(DataFileKind, PathBuf)> {
    DataFileKind::DEFAULT_FILES
        .iter()
        .map(|(kind, name)| (*kind, dir.as_ref().join(name)))
        .collect()
}
