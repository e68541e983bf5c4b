//! Probe collaborator traits

#[cfg(test)]
use mockall::automock;

use crate::version::components::VersionComponents;

/// A probe that yields a raw dot-delimited version string, e.g. the WMI
/// `Win32_OperatingSystem.Version` property or `cmd /c ver` output.
///
/// `None` means the probe could not answer (unreachable service, command
/// failure); bounding the probe's runtime is the implementation's job.
#[cfg_attr(test, automock)]
pub trait RawVersionProvider {
    fn fetch(&self) -> Option<String>;
}

/// A probe that yields already-structured components, e.g. the fixed file
/// version of the kernel image or the `CurrentVersion` registry values.
#[cfg_attr(test, automock)]
pub trait ComponentProvider {
    fn fetch(&self) -> Option<VersionComponents>;
}
