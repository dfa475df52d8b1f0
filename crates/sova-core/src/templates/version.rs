//! Compatibility between the running CLI and a template store's declared version
//!
//! A store's `template.yaml` may carry a `version`: the oldest CLI release its
//! templates were written against. A store without one, or with a version that
//! does not parse, is assumed compatible.

use super::manifest::{StoreManifest, STORE_MANIFEST};
use semver::Version;
use tracing::debug;

/// Outcome of comparing the CLI version with a store manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compatibility {
    Compatible,
    /// No usable version on one side; nothing to compare
    Unknown,
    /// The store needs a newer CLI than the one running
    CliTooOld { required: Version, running: Version },
}

impl Compatibility {
    pub fn check(cli_version: &str, manifest: &StoreManifest) -> Self {
        let Some(declared) = manifest.version.as_deref() else {
            return Self::Unknown;
        };
        let parsed = (parse_version(cli_version), parse_version(declared));
        let (Some(running), Some(required)) = parsed else {
            debug!(cli_version, declared, "unparseable version");
            return Self::Unknown;
        };

        if running < required {
            Self::CliTooOld { required, running }
        } else {
            Self::Compatible
        }
    }

    /// User-facing warning, or `None` when there is nothing to report
    pub fn warning(&self, upgrade_command: &str) -> Option<String> {
        match self {
            Self::CliTooOld { required, running } => Some(format!(
                "Warning: the template store ({}) requires CLI version {} or newer.\n\
                 You are running version {}.\n\
                 Consider updating: {}",
                STORE_MANIFEST, required, running, upgrade_command
            )),
            _ => None,
        }
    }
}

/// Warning text when `manifest` expects a newer CLI than `cli_version`
pub fn check_compatibility(
    cli_version: &str,
    manifest: &StoreManifest,
    upgrade_command: &str,
) -> Option<String> {
    Compatibility::check(cli_version, manifest).warning(upgrade_command)
}

/// Parse a version string, tolerating a leading `v` and surrounding whitespace
fn parse_version(version_str: &str) -> Option<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install sova --force";

    fn store(version: Option<&str>) -> StoreManifest {
        StoreManifest {
            version: version.map(str::to_string),
            ..StoreManifest::default()
        }
    }

    #[test]
    fn test_store_requires_newer_cli() {
        let result = Compatibility::check("0.1.0", &store(Some("0.2.0")));
        assert_eq!(
            result,
            Compatibility::CliTooOld {
                required: Version::new(0, 2, 0),
                running: Version::new(0, 1, 0),
            }
        );

        let warning = result.warning(UPGRADE).unwrap();
        assert!(warning.contains("template.yaml"));
        assert!(warning.contains("0.2.0"));
        assert!(warning.contains(UPGRADE));
    }

    #[test]
    fn test_leading_v_on_both_sides() {
        assert_eq!(
            Compatibility::check("v0.3.1", &store(Some("v0.3.1"))),
            Compatibility::Compatible
        );
        assert!(matches!(
            Compatibility::check("v0.3.0", &store(Some(" v0.3.1 "))),
            Compatibility::CliTooOld { .. }
        ));
    }

    #[test]
    fn test_prerelease_cli_is_older_than_release_store() {
        let release = store(Some("0.2.0"));
        let prerelease = store(Some("0.2.0-beta.1"));
        let beta = "0.2.0-beta.1";
        assert!(check_compatibility(beta, &release, UPGRADE).is_some());
        assert!(check_compatibility("0.2.0", &prerelease, UPGRADE).is_none());
    }

    #[test]
    fn test_unversioned_or_unparseable_store_is_not_reported() {
        assert_eq!(
            Compatibility::check("0.1.0", &store(None)),
            Compatibility::Unknown
        );
        assert_eq!(
            Compatibility::check("0.1.0", &store(Some("latest"))),
            Compatibility::Unknown
        );
        assert_eq!(
            Compatibility::check("dev", &store(Some("0.1.0"))),
            Compatibility::Unknown
        );
        let newer = store(Some("9.0.0"));
        assert!(check_compatibility("dev", &newer, UPGRADE).is_none());
    }

    #[test]
    fn test_bundled_store_matches_this_release() {
        let bundled = crate::templates::TemplateStore::bundled().unwrap();
        assert_eq!(
            Compatibility::check(env!("CARGO_PKG_VERSION"), bundled.manifest()),
            Compatibility::Compatible
        );
    }
}
