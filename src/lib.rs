//! Safe bindings for C/Migemo, the Japanese incremental search engine.
//!
//! C/Migemo expands romaji into a regular expression matching its Japanese
//! renderings (kanji, hiragana, katakana, full-width forms):
//!
//! ```no_run
//! # #[cfg(feature = "link")]
//! # fn main() -> Result<(), migemo::MigemoError> {
//! let mut migemo = migemo::Migemo::new();
//! migemo.load_dir("/usr/share/cmigemo/utf-8")?;
//! if let Some(pattern) = migemo.query("kensaku")? {
//!     println!("{pattern}");
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "link"))]
//! # fn main() {}
//! ```
//!
//! The engine itself lives in libmigemo; this crate owns its handle and
//! returned buffers, maps its constants to enums and its failures to
//! [`MigemoError`].

pub mod codec;
pub mod dialect;
mod engine;
mod error;
mod kind;
mod regexp;
pub mod settings;
pub mod trace_init;

#[cfg(test)]
mod tests;

pub use dialect::Dialect;
pub use engine::{default_paths, Migemo};
pub use error::{MigemoError, Result};
pub use kind::{DataFileKind, OperatorKind};
pub use regexp::RegexpString;
pub use settings::Settings;

pub use migemo_sys as sys;
