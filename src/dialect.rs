//! Operator presets for the regular-expression flavours cmigemo supports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::kind::OperatorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Engine defaults.
    #[default]
    Pcre,
    /// POSIX extended; no `\s`, so line breaks are not bridged.
    Egrep,
    Vim,
    Emacs,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [Dialect::Pcre, Dialect::Egrep, Dialect::Vim, Dialect::Emacs];

    pub fn fragment(self, kind: OperatorKind) -> &'static str {
        match (self, kind) {
            (_, OperatorKind::CharClassIn) => "[",
            (_, OperatorKind::CharClassOut) => "]",
            (Dialect::Pcre | Dialect::Egrep, OperatorKind::Or) => "|",
            (Dialect::Pcre | Dialect::Egrep, OperatorKind::GroupingIn) => "(",
            (Dialect::Pcre | Dialect::Egrep, OperatorKind::GroupingOut) => ")",
            (Dialect::Pcre, OperatorKind::NewLine) => r"\s*",
            (Dialect::Egrep, OperatorKind::NewLine) => "",
            (Dialect::Vim | Dialect::Emacs, OperatorKind::Or) => r"\|",
            (Dialect::Vim, OperatorKind::GroupingIn) => r"\%(",
            (Dialect::Emacs, OperatorKind::GroupingIn) => r"\(",
            (Dialect::Vim | Dialect::Emacs, OperatorKind::GroupingOut) => r"\)",
            (Dialect::Vim, OperatorKind::NewLine) => r"\_s*",
            (Dialect::Emacs, OperatorKind::NewLine) => r"\s-*",
        }
    }

    /// `(kind, fragment)` for every operator role.
    pub fn fragments(self) -> impl Iterator<Item = (OperatorKind, &'static str)> {
        OperatorKind::ALL.into_iter().map(move |k| (k, self.fragment(k)))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Pcre => "pcre",
            Dialect::Egrep => "egrep",
            Dialect::Vim => "vim",
            Dialect::Emacs => "emacs",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown dialect: {0} (expected pcre, egrep, vim or emacs)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDialect(s.to_string()))
    }
}
