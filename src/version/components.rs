//! Four-component version values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum legal value for a single version component.
pub const COMPONENT_MAX: u32 = 2_147_483_647;

/// One position in a Major.Minor.Build.Revision version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Major,
    Minor,
    Build,
    Revision,
}

impl Component {
    /// All components, left to right
    pub const ALL: [Component; 4] = [
        Component::Major,
        Component::Minor,
        Component::Build,
        Component::Revision,
    ];

    /// Zero-based position of the component
    pub fn index(self) -> usize {
        match self {
            Component::Major => 0,
            Component::Minor => 1,
            Component::Build => 2,
            Component::Revision => 3,
        }
    }

    /// Returns the string representation of the component
    pub fn as_str(self) -> &'static str {
        match self {
            Component::Major => "major",
            Component::Minor => "minor",
            Component::Build => "build",
            Component::Revision => "revision",
        }
    }
}

/// A best-effort four-component version.
///
/// Each component is either present (a concrete value in
/// `0..=`[`COMPONENT_MAX`]) or absent. Parser output is always contiguous
/// from the left (minor present implies major present, and so on), but a
/// partial source reading may legitimately carry gaps, e.g. a registry probe
/// that only knows the revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionComponents {
    major: Option<u32>,
    minor: Option<u32>,
    build: Option<u32>,
    revision: Option<u32>,
}

impl VersionComponents {
    /// A version with only the major component known
    pub fn from_major(major: u32) -> Self {
        let mut v = Self::default();
        v.set(Component::Major, major);
        v
    }

    /// A version with all four components known
    pub fn full(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        let mut v = Self::default();
        v.set(Component::Major, major);
        v.set(Component::Minor, minor);
        v.set(Component::Build, build);
        v.set(Component::Revision, revision);
        v
    }

    pub fn get(&self, component: Component) -> Option<u32> {
        match component {
            Component::Major => self.major,
            Component::Minor => self.minor,
            Component::Build => self.build,
            Component::Revision => self.revision,
        }
    }

    /// Set a component. Values past [`COMPONENT_MAX`] are clamped to it.
    pub fn set(&mut self, component: Component, value: u32) {
        let value = Some(value.min(COMPONENT_MAX));
        match component {
            Component::Major => self.major = value,
            Component::Minor => self.minor = value,
            Component::Build => self.build = value,
            Component::Revision => self.revision = value,
        }
    }

    /// True when no component is present
    pub fn is_empty(&self) -> bool {
        Component::ALL.iter().all(|&c| self.get(c).is_none())
    }

    /// Number of present components counted from the left, stopping at the
    /// first gap
    pub fn contiguous_len(&self) -> usize {
        Component::ALL
            .iter()
            .take_while(|&&c| self.get(c).is_some())
            .count()
    }
}

impl fmt::Display for VersionComponents {
    /// Renders the contiguous present prefix, dot-joined. Components after a
    /// gap are not rendered.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &component) in Component::ALL.iter().enumerate() {
            let Some(value) = self.get(component) else {
                break;
            };
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
