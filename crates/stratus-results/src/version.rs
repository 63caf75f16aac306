//! API microversions and per-field version gates
//!
//! Services that support microversions return the version a request was
//! served at in a response header. Fields introduced or retired at a given
//! version carry a [`VersionGate`]; map projection drops fields whose gate
//! does not admit the response version.

use crate::error::{Result, ResultError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `major.minor` API version.
///
/// Components compare numerically, so `2.9 < 2.10` and `"2.09"` parses to
/// the same version as `"2.9"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    major: u32,
    minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl FromStr for ApiVersion {
    type Err = ResultError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ResultError::InvalidVersion(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        let component = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u32>().map_err(|_| invalid())
        };
        Ok(Self::new(component(major)?, component(minor)?))
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = ResultError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(v: ApiVersion) -> Self {
        v.to_string()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Inclusive version bounds for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionGate {
    pub min: Option<ApiVersion>,
    pub max: Option<ApiVersion>,
}

impl VersionGate {
    /// Gate that admits every version.
    pub const OPEN: VersionGate = VersionGate {
        min: None,
        max: None,
    };

    pub const fn new(min: Option<ApiVersion>, max: Option<ApiVersion>) -> Self {
        Self { min, max }
    }

    /// Check whether a field with this gate is visible at `requested`.
    ///
    /// Without a requested version the caller is treated as speaking the
    /// oldest API: fields that need a minimum version are hidden and fields
    /// that were only retired later stay visible.
    pub fn admits(&self, requested: Option<ApiVersion>) -> bool {
        let above_min = match (self.min, requested) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(min), Some(v)) => v >= min,
        };
        let below_max = match (self.max, requested) {
            (None, _) | (_, None) => true,
            (Some(max), Some(v)) => v <= max,
        };
        above_min && below_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_order() {
        let v209: ApiVersion = "2.09".parse().unwrap();
        let v210: ApiVersion = "2.10".parse().unwrap();
        assert_eq!(v209, ApiVersion::new(2, 9));
        assert!(v209 < v210);
        assert!(ApiVersion::new(2, 9) < ApiVersion::new(2, 10));
        assert!(ApiVersion::new(3, 0) > ApiVersion::new(2, 99));
        assert_eq!(v210.to_string(), "2.10");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "2", "2.", ".1", "two.ten", "2.10.1", "-1.0", "latest"] {
            assert!(
                matches!(bad.parse::<ApiVersion>(), Err(ResultError::InvalidVersion(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_serde_as_string() {
        let v: ApiVersion = serde_json::from_str("\"1.10\"").unwrap();
        assert_eq!(v, ApiVersion::new(1, 10));
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"1.10\"");
        assert!(serde_json::from_str::<ApiVersion>("\"nope\"").is_err());
    }

    #[test]
    fn test_min_gate() {
        let gate = VersionGate::new(Some(ApiVersion::new(2, 10)), None);
        assert!(!gate.admits(None));
        assert!(!gate.admits(Some(ApiVersion::new(2, 5))));
        assert!(gate.admits(Some(ApiVersion::new(2, 10))));
        assert!(gate.admits(Some(ApiVersion::new(2, 11))));
    }

    #[test]
    fn test_max_gate() {
        let gate = VersionGate::new(None, Some(ApiVersion::new(2, 9)));
        assert!(gate.admits(None));
        assert!(gate.admits(Some(ApiVersion::new(2, 5))));
        assert!(gate.admits(Some(ApiVersion::new(2, 9))));
        assert!(!gate.admits(Some(ApiVersion::new(2, 10))));
    }

    #[test]
    fn test_range_gate() {
        let gate = VersionGate::new(Some(ApiVersion::new(2, 6)), Some(ApiVersion::new(2, 15)));
        assert!(!gate.admits(None));
        assert!(!gate.admits(Some(ApiVersion::new(2, 5))));
        assert!(gate.admits(Some(ApiVersion::new(2, 6))));
        assert!(gate.admits(Some(ApiVersion::new(2, 15))));
        assert!(!gate.admits(Some(ApiVersion::new(2, 16))));
        assert!(VersionGate::OPEN.admits(None));
    }
}
