//! How often a type may occur inside its container.
//!
//! Two notations are accepted when reading rulesets:
//!
//! | Canonical | Legacy | Meaning |
//! |-----------|--------|---------|
//! | `0..1` | `1o` | optional, at most once |
//! | `1` | `1m` | mandatory, exactly once |
//! | `0..n` | `*` | optional, repeatable |
//! | `1..n` | `+` | mandatory, repeatable |
//!
//! Written values always use the canonical notation.

use crate::error::UghError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Cardinality {
    ZeroOrOne,
    ExactlyOne,
    ZeroOrMore,
    OneOrMore,
}

impl Cardinality {
    pub fn min(self) -> usize {
        match self {
            Cardinality::ZeroOrOne | Cardinality::ZeroOrMore => 0,
            Cardinality::ExactlyOne | Cardinality::OneOrMore => 1,
        }
    }

    /// Upper bound, `None` when unbounded.
    pub fn max(self) -> Option<usize> {
        match self {
            Cardinality::ZeroOrOne | Cardinality::ExactlyOne => Some(1),
            Cardinality::ZeroOrMore | Cardinality::OneOrMore => None,
        }
    }

    pub fn is_required(self) -> bool {
        self.min() > 0
    }

    /// Whether one more entry fits when `count` are already present.
    pub fn allows_another(self, count: usize) -> bool {
        match self.max() {
            Some(max) => count < max,
            None => true,
        }
    }

    /// Whether one entry can be taken away when `count` are present.
    pub fn allows_removal(self, count: usize) -> bool {
        count > self.min()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "0..1",
            Cardinality::ExactlyOne => "1",
            Cardinality::ZeroOrMore => "0..n",
            Cardinality::OneOrMore => "1..n",
        }
    }
}

impl FromStr for Cardinality {
    type Err = UghError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0..1" | "1o" => Ok(Cardinality::ZeroOrOne),
            "1" | "1..1" | "1m" => Ok(Cardinality::ExactlyOne),
            "0..n" | "0..*" | "*" => Ok(Cardinality::ZeroOrMore),
            "1..n" | "1..*" | "+" => Ok(Cardinality::OneOrMore),
            other => Err(UghError::InvalidCardinality(other.to_string())),
        }
    }
}

impl TryFrom<String> for Cardinality {
    type Error = UghError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cardinality> for String {
    fn from(value: Cardinality) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_notation() {
        assert_eq!("0..1".parse::<Cardinality>().unwrap(), Cardinality::ZeroOrOne);
        assert_eq!("1".parse::<Cardinality>().unwrap(), Cardinality::ExactlyOne);
        assert_eq!("0..n".parse::<Cardinality>().unwrap(), Cardinality::ZeroOrMore);
        assert_eq!("1..n".parse::<Cardinality>().unwrap(), Cardinality::OneOrMore);
    }

    #[test]
    fn parses_legacy_notation() {
        assert_eq!("1o".parse::<Cardinality>().unwrap(), Cardinality::ZeroOrOne);
        assert_eq!("1m".parse::<Cardinality>().unwrap(), Cardinality::ExactlyOne);
        assert_eq!("*".parse::<Cardinality>().unwrap(), Cardinality::ZeroOrMore);
        assert_eq!("+".parse::<Cardinality>().unwrap(), Cardinality::OneOrMore);
    }

    #[test]
    fn rejects_unknown_notation() {
        let err = "2..5".parse::<Cardinality>().unwrap_err();
        assert!(matches!(err, UghError::InvalidCardinality(s) if s == "2..5"));
    }

    #[test]
    fn bounds() {
        assert_eq!(Cardinality::ZeroOrOne.min(), 0);
        assert_eq!(Cardinality::ZeroOrOne.max(), Some(1));
        assert_eq!(Cardinality::OneOrMore.min(), 1);
        assert_eq!(Cardinality::OneOrMore.max(), None);
        assert!(Cardinality::ExactlyOne.is_required());
        assert!(!Cardinality::ZeroOrMore.is_required());
    }

    #[test]
    fn allows_another_respects_max() {
        assert!(Cardinality::ExactlyOne.allows_another(0));
        assert!(!Cardinality::ExactlyOne.allows_another(1));
        assert!(Cardinality::ZeroOrMore.allows_another(500));
    }

    #[test]
    fn allows_removal_respects_min() {
        assert!(!Cardinality::ExactlyOne.allows_removal(1));
        assert!(Cardinality::OneOrMore.allows_removal(2));
        assert!(Cardinality::ZeroOrOne.allows_removal(1));
    }

    #[test]
    fn serializes_canonically() {
        let json = serde_json::to_string(&Cardinality::OneOrMore).unwrap();
        assert_eq!(json, "\"1..n\"");
        let parsed: Cardinality = serde_json::from_str("\"1m\"").unwrap();
        assert_eq!(parsed, Cardinality::ExactlyOne);
    }
}
