use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tax region with its own independently published withholding tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Continente,
    Acores,
    Madeira,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown region '{0}'")]
pub struct UnknownRegion(pub String);

impl Region {
    pub fn all() -> &'static [Region] {
        &[Region::Continente, Region::Acores, Region::Madeira]
    }

    /// Code used in storage paths and published file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continente => "continente",
            Self::Acores => "acores",
            Self::Madeira => "madeira",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Continente => "Portugal Continental",
            Self::Acores => "Região Autónoma dos Açores",
            Self::Madeira => "Região Autónoma da Madeira",
        }
    }

    /// Accepts the storage code or the long name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s || r.label().to_lowercase() == s)
            .or(match s.as_str() {
                "açores" => Some(Self::Acores),
                _ => None,
            })
    }
}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_storage_codes() {
        assert_eq!(Region::parse("continente"), Some(Region::Continente));
        assert_eq!(Region::parse("acores"), Some(Region::Acores));
        assert_eq!(Region::parse("madeira"), Some(Region::Madeira));
    }

    #[test]
    fn parse_accepts_long_names() {
        assert_eq!(
            Region::parse("Portugal Continental"),
            Some(Region::Continente)
        );
        assert_eq!(
            Region::parse("Região Autónoma dos Açores"),
            Some(Region::Acores)
        );
        assert_eq!(
            Region::parse("Região Autónoma da Madeira"),
            Some(Region::Madeira)
        );
    }

    #[test]
    fn parse_is_case_insensitive_and_accepts_accented_code() {
        assert_eq!(Region::parse(" MADEIRA "), Some(Region::Madeira));
        assert_eq!(Region::parse("Açores"), Some(Region::Acores));
    }

    #[test]
    fn from_str_reports_unknown_region() {
        let err = "lisboa".parse::<Region>().unwrap_err();

        assert_eq!(err, UnknownRegion("lisboa".to_string()));
    }

    #[test]
    fn display_uses_storage_code() {
        assert_eq!(Region::Acores.to_string(), "acores");
    }
}
