//! Restriction kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The two built-in kinds of restriction. Selects the adapter that reads and
/// mutates the matching OS resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RestrictionKind {
    /// A domain name redirected away through the hosts file
    Domain,
    /// An application pattern whose processes are periodically killed
    Application,
}

impl RestrictionKind {
    /// All kinds, in commit order.
    pub const ALL: [RestrictionKind; 2] = [Self::Domain, Self::Application];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "Domain",
            Self::Application => "Application",
        }
    }

    /// One-line usage description with an example list.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Domain => {
                "A single domain name or a list of domains separated with ',' [www.google.com,www.youtube.com]"
            }
            Self::Application => {
                "A single application name or a list of applications names separated with ',' [spotify,chrome]"
            }
        }
    }
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RestrictionKind {
    type Err = Error;

    /// Case-insensitive: `domain`, `Domain` and `DOMAIN` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("domain".parse::<RestrictionKind>().unwrap(), RestrictionKind::Domain);
        assert_eq!(
            " APPLICATION ".parse::<RestrictionKind>().unwrap(),
            RestrictionKind::Application
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "firewall".parse::<RestrictionKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidKind(ref s) if s == "firewall"));
    }

    #[test]
    fn serializes_as_name() {
        let json = serde_json::to_string(&RestrictionKind::Application).unwrap();
        assert_eq!(json, "\"Application\"");
    }
}
