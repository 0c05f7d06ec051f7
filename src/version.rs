use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A Python grammar revision, `(major, minor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Python 3 dropped the `L` suffix on integer literals.
    pub fn forbids_long_suffix(&self) -> bool {
        self.major >= 3
    }

    /// Python 3 dropped bare octal literals such as `017`.
    pub fn forbids_bare_octal(&self) -> bool {
        self.major >= 3
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(3, 4)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid Python version `{0}`, expected MAJOR.MINOR (e.g. 3.4)")]
pub struct ParseVersionError(String);

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}
