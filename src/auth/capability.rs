//! Capabilities an API key can be scoped to.

use std::fmt;
use std::str::FromStr;

/// A single permitted operation class.
///
/// Capabilities are not hierarchical: an `Administer` key cannot upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Store files.
    Upload,
    /// Fetch private files and private links.
    Download,
    /// Create, disable and re-enable short links.
    Shorten,
    /// Issue, disable and re-enable API keys.
    Administer,
}

impl Capability {
    /// All capabilities.
    pub const ALL: [Capability; 4] = [
        Capability::Upload,
        Capability::Download,
        Capability::Shorten,
        Capability::Administer,
    ];

    /// Convert capability to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Upload => "upload",
            Capability::Download => "download",
            Capability::Shorten => "shorten",
            Capability::Administer => "administer",
        }
    }

    /// Parse a capability name, case-insensitive and trimmed.
    ///
    /// `api` is accepted as an alias for `administer`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "upload" => Some(Capability::Upload),
            "download" => Some(Capability::Download),
            "shorten" => Some(Capability::Shorten),
            "administer" | "api" => Some(Capability::Administer),
            _ => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::parse(s).ok_or_else(|| format!("unknown capability: {s}"))
    }
}
