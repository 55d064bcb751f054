//! Character codecs installable with [`Migemo::set_decoder`](crate::Migemo::set_decoder)
//! and [`Migemo::set_encoder`](crate::Migemo::set_encoder).
//!
//! The engine calls these while parsing dictionary files and while
//! rendering patterns. Without one, it uses its built-in guess (CP932,
//! EUC-JP or UTF-8, detected from the dictionary).

pub mod utf8;

/// Byte-to-code callback (`MIGEMO_PROC_CHAR2INT`).
pub type Decoder = migemo_sys::MIGEMO_PROC_CHAR2INT;

/// Code-to-byte callback (`MIGEMO_PROC_INT2CHAR`).
pub type Encoder = migemo_sys::MIGEMO_PROC_INT2CHAR;
