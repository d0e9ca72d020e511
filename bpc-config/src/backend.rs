//! Build-tool backends a tree can be emitted for.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Supported build-descriptor backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Root Makefile recursing into one Makefile per directory bucket
    RecursiveMake,
    /// One Makefile including a fragment per directory bucket
    SingleMake,
    /// Chain of Bash scripts doing explicit timestamp checks
    Bash,
    /// A single SConstruct
    Scons,
    /// Bazel packages per directory bucket
    Bazel,
    /// Ninja files per directory bucket
    Ninja,
}

impl Backend {
    /// Every backend, in emission order.
    pub const ALL: [Backend; 6] = [
        Backend::RecursiveMake,
        Backend::SingleMake,
        Backend::Bash,
        Backend::Scons,
        Backend::Bazel,
        Backend::Ninja,
    ];

    /// Returns the backend identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::RecursiveMake => "recursive-make",
            Backend::SingleMake => "single-make",
            Backend::Bash => "bash",
            Backend::Scons => "scons",
            Backend::Bazel => "bazel",
            Backend::Ninja => "ninja",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recursive-make" | "rmake" => Ok(Backend::RecursiveMake),
            "single-make" | "smake" | "make" => Ok(Backend::SingleMake),
            "bash" | "sh" => Ok(Backend::Bash),
            "scons" => Ok(Backend::Scons),
            "bazel" => Ok(Backend::Bazel),
            "ninja" => Ok(Backend::Ninja),
            _ => Err(format!(
                "unknown backend '{}', expected one of: {}",
                s,
                Backend::ALL.map(|b| b.as_str()).join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Backend::from_str("ninja").unwrap(), Backend::Ninja);
        assert_eq!(Backend::from_str("Bazel").unwrap(), Backend::Bazel);
        assert_eq!(Backend::from_str("rmake").unwrap(), Backend::RecursiveMake);
        assert_eq!(Backend::from_str("make").unwrap(), Backend::SingleMake);
        assert_eq!(Backend::from_str("sh").unwrap(), Backend::Bash);

        let err = Backend::from_str("buck").unwrap_err();
        assert!(err.contains("unknown backend 'buck'"));
        assert!(err.contains("recursive-make, single-make, bash, scons, bazel, ninja"));
    }

    #[test]
    fn test_display_round_trips() {
        for backend in Backend::ALL {
            assert_eq!(Backend::from_str(&backend.to_string()).unwrap(), backend);
        }
    }

    #[test]
    fn test_deserialize() {
        let backend: Backend = serde_json::from_str(r#""single-make""#).unwrap();
        assert_eq!(backend, Backend::SingleMake);

        assert!(serde_json::from_str::<Backend>(r#""cmake""#).is_err());
    }
}
