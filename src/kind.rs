//! Typed counterparts of the native `MIGEMO_DICTID_*` and `MIGEMO_OPINDEX_*`
//! constants.

use std::ffi::c_int;
use std::fmt;

use migemo_sys as sys;
use serde::{Deserialize, Serialize};

/// Kind of dictionary/mapping file passed to [`Migemo::load`](crate::Migemo::load).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataFileKind {
    #[serde(rename = "han2zen")]
    Hankaku2Zenkaku,
    #[serde(rename = "hira2kata")]
    Hiragana2Katakana,
    #[serde(rename = "migemo-dict")]
    MigemoDict,
    #[serde(rename = "roma2hira")]
    Roman2Hiragana,
    #[serde(rename = "zen2han")]
    Zenkaku2Hankaku,
}

impl DataFileKind {
    /// Every kind paired with its conventional file name, in the order
    /// [`Migemo::load_dir`](crate::Migemo::load_dir) probes them.
    pub const DEFAULT_FILES: [(DataFileKind, &'static str); 5] = [
        (DataFileKind::Hankaku2Zenkaku, "han2zen.dat"),
        (DataFileKind::Hiragana2Katakana, "hira2kata.dat"),
        (DataFileKind::MigemoDict, "migemo-dict"),
        (DataFileKind::Roman2Hiragana, "roma2hira.dat"),
        (DataFileKind::Zenkaku2Hankaku, "zen2han.dat"),
    ];

    pub const ALL: [DataFileKind; 5] = [
        DataFileKind::Hankaku2Zenkaku,
        DataFileKind::Hiragana2Katakana,
        DataFileKind::MigemoDict,
        DataFileKind::Roman2Hiragana,
        DataFileKind::Zenkaku2Hankaku,
    ];

    pub fn as_raw(self) -> c_int {
        match self {
            DataFileKind::Hankaku2Zenkaku => sys::MIGEMO_DICTID_HAN2ZEN,
            DataFileKind::Hiragana2Katakana => sys::MIGEMO_DICTID_HIRA2KATA,
            DataFileKind::MigemoDict => sys::MIGEMO_DICTID_MIGEMO,
            DataFileKind::Roman2Hiragana => sys::MIGEMO_DICTID_ROMA2HIRA,
            DataFileKind::Zenkaku2Hankaku => sys::MIGEMO_DICTID_ZEN2HAN,
        }
    }
}

impl TryFrom<c_int> for DataFileKind {
    type Error = c_int;

    /// Fails with the raw value for `MIGEMO_DICTID_INVALID` and anything
    /// outside the native table.
    fn try_from(raw: c_int) -> Result<Self, Self::Error> {
        match raw {
            sys::MIGEMO_DICTID_HAN2ZEN => Ok(DataFileKind::Hankaku2Zenkaku),
            sys::MIGEMO_DICTID_HIRA2KATA => Ok(DataFileKind::Hiragana2Katakana),
            sys::MIGEMO_DICTID_MIGEMO => Ok(DataFileKind::MigemoDict),
            sys::MIGEMO_DICTID_ROMA2HIRA => Ok(DataFileKind::Roman2Hiragana),
            sys::MIGEMO_DICTID_ZEN2HAN => Ok(DataFileKind::Zenkaku2Hankaku),
            other => Err(other),
        }
    }
}

impl fmt::Display for DataFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataFileKind::Hankaku2Zenkaku => "han2zen",
            DataFileKind::Hiragana2Katakana => "hira2kata",
            DataFileKind::MigemoDict => "migemo-dict",
            DataFileKind::Roman2Hiragana => "roma2hira",
            DataFileKind::Zenkaku2Hankaku => "zen2han",
        };
        f.write_str(name)
    }
}

/// Role of a regular-expression fragment the engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    CharClassIn,
    CharClassOut,
    GroupingIn,
    GroupingOut,
    #[serde(rename = "newline")]
    NewLine,
    Or,
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 6] = [
        OperatorKind::Or,
        OperatorKind::GroupingIn,
        OperatorKind::GroupingOut,
        OperatorKind::CharClassIn,
        OperatorKind::CharClassOut,
        OperatorKind::NewLine,
    ];

    pub fn as_raw(self) -> c_int {
        match self {
            OperatorKind::CharClassIn => sys::MIGEMO_OPINDEX_SELECT_IN,
            OperatorKind::CharClassOut => sys::MIGEMO_OPINDEX_SELECT_OUT,
            OperatorKind::GroupingIn => sys::MIGEMO_OPINDEX_NEST_IN,
            OperatorKind::GroupingOut => sys::MIGEMO_OPINDEX_NEST_OUT,
            OperatorKind::NewLine => sys::MIGEMO_OPINDEX_NEWLINE,
            OperatorKind::Or => sys::MIGEMO_OPINDEX_OR,
        }
    }
}

impl TryFrom<c_int> for OperatorKind {
    type Error = c_int;

    fn try_from(raw: c_int) -> Result<Self, Self::Error> {
        match raw {
            sys::MIGEMO_OPINDEX_SELECT_IN => Ok(OperatorKind::CharClassIn),
            sys::MIGEMO_OPINDEX_SELECT_OUT => Ok(OperatorKind::CharClassOut),
            sys::MIGEMO_OPINDEX_NEST_IN => Ok(OperatorKind::GroupingIn),
            sys::MIGEMO_OPINDEX_NEST_OUT => Ok(OperatorKind::GroupingOut),
            sys::MIGEMO_OPINDEX_NEWLINE => Ok(OperatorKind::NewLine),
            sys::MIGEMO_OPINDEX_OR => Ok(OperatorKind::Or),
            other => Err(other),
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatorKind::CharClassIn => "char_class_in",
            OperatorKind::CharClassOut => "char_class_out",
            OperatorKind::GroupingIn => "grouping_in",
            OperatorKind::GroupingOut => "grouping_out",
            OperatorKind::NewLine => "newline",
            OperatorKind::Or => "or",
        };
        f.write_str(name)
    }
}
