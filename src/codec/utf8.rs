//! UTF-8 codec for dictionaries converted to UTF-8.

use std::ffi::{c_int, c_uchar, c_uint};

/// Length of the sequence introduced by `lead`, or 0 if `lead` cannot start one.
fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 0,
    }
}

/// Decode one UTF-8 sequence from a NUL-terminated buffer.
///
/// Returns the number of bytes consumed, or 0 for a malformed or truncated
/// sequence so the engine falls back to its default decoding.
///
/// # Safety
/// `in_` must be null or point to a NUL-terminated buffer. `out` must be
/// null or valid for writes.
pub unsafe extern "C" fn decode(in_: *const c_uchar, out: *mut c_uint) -> c_int {
    if in_.is_null() {
        return 0;
    }
    let len = sequence_len(*in_);
    if len == 0 {
        return 0;
    }
    let mut buf = [0u8; 4];
    buf[0] = *in_;
    for (i, slot) in buf.iter_mut().enumerate().take(len).skip(1) {
        // A NUL terminator is never a continuation byte, so this stops
        // before reading past the end of the buffer.
        let b = *in_.add(i);
        if b & 0xc0 != 0x80 {
            return 0;
        }
        *slot = b;
    }
    let Some(ch) = std::str::from_utf8(&buf[..len])
        .ok()
        .and_then(|s| s.chars().next())
    else {
        return 0;
    };
    if !out.is_null() {
        *out = ch as c_uint;
    }
    len as c_int
}

/// Encode `code` as UTF-8 into `out`, returning the number of bytes
/// written, or 0 if `code` is not a Unicode scalar value.
///
/// # Safety
/// `out` must be null or valid for writes of 4 bytes.
pub unsafe extern "C" fn encode(code: c_uint, out: *mut c_uchar) -> c_int {
    let Some(ch) = char::from_u32(code) else {
        return 0;
    };
    let mut buf = [0u8; 4];
    let bytes = ch.encode_utf8(&mut buf).as_bytes();
    if !out.is_null() {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), out, bytes.len());
    }
    bytes.len() as c_int
}
