//! Lookup kinds.

use crate::error::UnknownKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The identifier families the proxy can look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupKind {
    PhoneBasic,
    PhoneTruecaller,
    BankBin,
    BankIfsc,
    InstagramProfile,
    InstagramPosts,
    NationalIdFamily,
}

impl LookupKind {
    pub const ALL: [LookupKind; 7] = [
        LookupKind::PhoneBasic,
        LookupKind::PhoneTruecaller,
        LookupKind::BankBin,
        LookupKind::BankIfsc,
        LookupKind::InstagramProfile,
        LookupKind::InstagramPosts,
        LookupKind::NationalIdFamily,
    ];

    /// Kebab-case slug, as used in routes and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::PhoneBasic => "phone-basic",
            LookupKind::PhoneTruecaller => "phone-truecaller",
            LookupKind::BankBin => "bank-bin",
            LookupKind::BankIfsc => "bank-ifsc",
            LookupKind::InstagramProfile => "instagram-profile",
            LookupKind::InstagramPosts => "instagram-posts",
            LookupKind::NationalIdFamily => "national-id-family",
        }
    }

    /// Position in [`LookupKind::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LookupKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
