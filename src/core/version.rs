//! Version tokens attached to registered handles.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The version a handle was registered with.
///
/// Output collaborators typically append the version to the source locator to bust
/// caches. Three cases are distinguished:
/// - [`Default`](Self::Default): no version given, use the registry's default token
/// - [`Unversioned`](Self::Unversioned): explicitly no version at all
/// - [`Tagged`](Self::Tagged): an explicit version string
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Version {
    /// Fall back to the registry default version
    #[default]
    Default,
    /// Never attach a version
    Unversioned,
    /// An explicit version token
    Tagged(String),
}

impl Version {
    /// Create a tagged version.
    pub fn tagged(version: impl Into<String>) -> Self {
        Self::Tagged(version.into())
    }

    /// The version string to emit, given the registry default.
    ///
    /// ```
    /// use handledeps::core::Version;
    ///
    /// assert_eq!(Version::tagged("1.2").effective(Some("6.4")), Some("1.2"));
    /// assert_eq!(Version::Default.effective(Some("6.4")), Some("6.4"));
    /// assert_eq!(Version::Unversioned.effective(Some("6.4")), None);
    /// ```
    #[must_use]
    pub fn effective<'a>(&'a self, default: Option<&'a str>) -> Option<&'a str> {
        match self {
            Self::Default => default,
            Self::Unversioned => None,
            Self::Tagged(v) => Some(v.as_str()),
        }
    }
}

impl From<Option<&str>> for Version {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Default, Self::tagged)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Unversioned => write!(f, "unversioned"),
            Self::Tagged(v) => write!(f, "{v}"),
        }
    }
}

// On disk a version is a string, `false` (unversioned), or absent/`true` (default).
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum VersionRepr {
    Tag(String),
    Flag(bool),
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Default => VersionRepr::Flag(true).serialize(serializer),
            Self::Unversioned => VersionRepr::Flag(false).serialize(serializer),
            Self::Tagged(v) => VersionRepr::Tag(v.clone()).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match VersionRepr::deserialize(deserializer)? {
            VersionRepr::Tag(v) => Self::Tagged(v),
            VersionRepr::Flag(true) => Self::Default,
            VersionRepr::Flag(false) => Self::Unversioned,
        })
    }
}
