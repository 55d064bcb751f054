use std::ffi::{c_char, c_uchar, CStr};
use std::fmt;
use std::ops::Deref;
use std::ptr::{self, NonNull};

use migemo_sys::MigemoApi;

/// A pattern returned by [`Migemo::query`](crate::Migemo::query).
///
/// The buffer is owned by the caller and handed back to the engine's
/// `release` routine on drop. Release is not tied to any engine instance,
/// so a `RegexpString` may outlive the `Migemo` that produced it.
pub struct RegexpString {
    ptr: NonNull<c_uchar>,
    len: usize,
    api: &'static MigemoApi,
}

// SAFETY: the buffer is exclusively owned and immutable; the release routine
// does not touch engine state.
unsafe impl Send for RegexpString {}
unsafe impl Sync for RegexpString {}

impl RegexpString {
    /// Take ownership of a buffer returned by `api.query`.
    ///
    /// # Safety
    /// `ptr` must be a NUL-terminated buffer produced by `api.query` that has
    /// not been released and is not owned elsewhere.
    pub(crate) unsafe fn from_raw(ptr: NonNull<c_uchar>, api: &'static MigemoApi) -> Self {
        let len = CStr::from_ptr(ptr.as_ptr().cast::<c_char>()).to_bytes().len();
        Self { ptr, len, api }
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `len` bytes were measured up to the terminator in `from_raw`
        // and the buffer is immutable while owned.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn to_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    pub fn to_string_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }
}

impl Deref for RegexpString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for RegexpString {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for RegexpString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RegexpString")
            .field(&self.to_string_lossy())
            .finish()
    }
}

impl fmt::Display for RegexpString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Drop for RegexpString {
    fn drop(&mut self) {
        // As of C/Migemo 1.3, migemo_release only frees its second argument,
        // so the engine pointer may be null.
        unsafe { (self.api.release)(ptr::null_mut(), self.ptr.as_ptr()) };
    }
}
