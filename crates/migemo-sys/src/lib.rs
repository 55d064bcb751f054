//! Raw bindings to C/Migemo 1.3.
//!
//! The native library is consumed through [`MigemoApi`], a table of
//! `extern "C"` function pointers mirroring `migemo.h`. The table built from
//! the linked library is [`MigemoApi::LINKED`] (feature `link`); any other
//! table with the same contract can stand in for it.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_uchar, c_uint};

// --- migemo_load() dictionary ids ---

pub const MIGEMO_DICTID_INVALID: c_int = 0;
pub const MIGEMO_DICTID_MIGEMO: c_int = 1;
pub const MIGEMO_DICTID_ROMA2HIRA: c_int = 2;
pub const MIGEMO_DICTID_HIRA2KATA: c_int = 3;
pub const MIGEMO_DICTID_HAN2ZEN: c_int = 4;
pub const MIGEMO_DICTID_ZEN2HAN: c_int = 5;

// --- migemo_set_operator() / migemo_get_operator() indices ---

pub const MIGEMO_OPINDEX_OR: c_int = 0;
pub const MIGEMO_OPINDEX_NEST_IN: c_int = 1;
pub const MIGEMO_OPINDEX_NEST_OUT: c_int = 2;
pub const MIGEMO_OPINDEX_SELECT_IN: c_int = 3;
pub const MIGEMO_OPINDEX_SELECT_OUT: c_int = 4;
pub const MIGEMO_OPINDEX_NEWLINE: c_int = 5;

/// Operator fragments are stored in fixed buffers of this size,
/// terminating NUL included.
pub const RXGEN_OP_MAXLEN: usize = 8;

/// Opaque engine object (`struct _migemo`).
#[repr(C)]
pub struct migemo {
    _private: [u8; 0],
}

/// Decodes one character starting at `in_`, stores its code in `out` and
/// returns the number of bytes consumed. Returning 0 selects the engine's
/// built-in decoding for that position.
pub type MIGEMO_PROC_CHAR2INT = unsafe extern "C" fn(in_: *const c_uchar, out: *mut c_uint) -> c_int;

/// Encodes code `in_` into `out` and returns the number of bytes written.
/// Returning 0 selects the engine's built-in encoding.
pub type MIGEMO_PROC_INT2CHAR = unsafe extern "C" fn(in_: c_uint, out: *mut c_uchar) -> c_int;

/// The native entry points, one field per function in `migemo.h`.
#[derive(Clone, Copy)]
pub struct MigemoApi {
    pub open: unsafe extern "C" fn(dict: *const c_char) -> *mut migemo,
    pub close: unsafe extern "C" fn(object: *mut migemo),
    pub query: unsafe extern "C" fn(object: *mut migemo, query: *const c_uchar) -> *mut c_uchar,
    pub release: unsafe extern "C" fn(object: *mut migemo, string: *mut c_uchar),
    pub set_operator:
        unsafe extern "C" fn(object: *mut migemo, index: c_int, op: *const c_uchar) -> c_int,
    pub get_operator: unsafe extern "C" fn(object: *mut migemo, index: c_int) -> *const c_uchar,
    pub setproc_char2int:
        unsafe extern "C" fn(object: *mut migemo, proc_: Option<MIGEMO_PROC_CHAR2INT>),
    pub setproc_int2char:
        unsafe extern "C" fn(object: *mut migemo, proc_: Option<MIGEMO_PROC_INT2CHAR>),
    pub load:
        unsafe extern "C" fn(object: *mut migemo, dict_id: c_int, dict_file: *const c_char) -> c_int,
    pub is_enable: unsafe extern "C" fn(object: *mut migemo) -> c_int,
}

impl std::fmt::Debug for MigemoApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigemoApi")
            .field("open", &(self.open as *const ()))
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "link")]
mod linked {
    use super::*;

    extern "C" {
        pub fn migemo_open(dict: *const c_char) -> *mut migemo;
        pub fn migemo_close(object: *mut migemo);
        pub fn migemo_query(object: *mut migemo, query: *const c_uchar) -> *mut c_uchar;
        pub fn migemo_release(object: *mut migemo, string: *mut c_uchar);
        pub fn migemo_set_operator(object: *mut migemo, index: c_int, op: *const c_uchar) -> c_int;
        pub fn migemo_get_operator(object: *mut migemo, index: c_int) -> *const c_uchar;
        pub fn migemo_setproc_char2int(object: *mut migemo, proc_: Option<MIGEMO_PROC_CHAR2INT>);
        pub fn migemo_setproc_int2char(object: *mut migemo, proc_: Option<MIGEMO_PROC_INT2CHAR>);
        pub fn migemo_load(object: *mut migemo, dict_id: c_int, dict_file: *const c_char) -> c_int;
        pub fn migemo_is_enable(object: *mut migemo) -> c_int;
    }
}

#[cfg(feature = "link")]
pub use linked::*;

#[cfg(feature = "link")]
impl MigemoApi {
    /// Entry points of the libmigemo this crate was linked against.
    pub const LINKED: MigemoApi = MigemoApi {
        open: migemo_open,
        close: migemo_close,
        query: migemo_query,
        release: migemo_release,
        set_operator: migemo_set_operator,
        get_operator: migemo_get_operator,
        setproc_char2int: migemo_setproc_char2int,
        setproc_int2char: migemo_setproc_int2char,
        load: migemo_load,
        is_enable: migemo_is_enable,
    };
}
