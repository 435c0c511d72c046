//! App identity and the GitHub release check backing "Check for updates".

use std::fmt;

use reqwest::Client;
use semver::Version;
use serde::Deserialize;
use thiserror::Error;

pub const APP_NAME: &str = "AICO ERP";
pub const APP_REPO_URL: &str = "https://github.com/aico-software/aico_erp_desktop";

const TAGS_URL: &str =
    "https://api.github.com/repos/aico-software/aico_erp_desktop/tags?per_page=100";

/// `git describe` output baked in by `build.rs`; absent in plain cargo builds.
const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("update request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unparseable version: {0}")]
    BadVersion(#[from] semver::Error),
}

#[derive(Clone, Debug)]
pub struct ReleaseTag {
    pub name: String,
    pub version: Version,
}

#[derive(Clone, Debug)]
pub struct UpdateInfo {
    pub current: Version,
    pub latest: Option<ReleaseTag>,
}

impl UpdateInfo {
    pub fn update_available(&self) -> bool {
        matches!(&self.latest, Some(tag) if tag.version > self.current)
    }
}

impl fmt::Display for UpdateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.latest {
            Some(tag) if tag.version > self.current => {
                write!(
                    f,
                    "New version available: {} (current v{})",
                    tag.name, self.current
                )
            }
            Some(tag) => write!(f, "Up to date on {}", tag.name),
            None => write!(f, "No release information found"),
        }
    }
}

#[derive(Deserialize)]
struct TagEntry {
    name: String,
}

/// Shown in the title area and the settings page.
pub fn version_label() -> String {
    GIT_TAG
        .map(str::to_string)
        .unwrap_or_else(|| format!("v{}", env!("CARGO_PKG_VERSION")))
}

pub async fn check_for_update() -> Result<UpdateInfo, UpdateError> {
    let client = Client::builder()
        .user_agent(format!("{APP_NAME}/{}", version_label()))
        .build()?;
    let tags: Vec<TagEntry> = client
        .get(TAGS_URL)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let latest = tags
        .into_iter()
        .filter_map(|tag| {
            let version = parse_loose(&tag.name).ok()?;
            Some(ReleaseTag {
                name: tag.name,
                version,
            })
        })
        .max_by(|a, b| a.version.cmp(&b.version));

    Ok(UpdateInfo {
        current: current_version()?,
        latest,
    })
}

fn current_version() -> Result<Version, UpdateError> {
    parse_loose(GIT_TAG.unwrap_or(env!("CARGO_PKG_VERSION")))
}

/// Accepts tags with or without a leading `v`.
fn parse_loose(raw: &str) -> Result<Version, UpdateError> {
    Ok(Version::parse(raw.trim().trim_start_matches(['v', 'V']))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_with_or_without_v_prefix() {
        assert_eq!(parse_loose("v1.2.0").unwrap(), Version::new(1, 2, 0));
        assert_eq!(parse_loose("1.2.0").unwrap(), Version::new(1, 2, 0));
        assert!(parse_loose("release-1").is_err());
    }

    #[test]
    fn only_strictly_newer_tags_count_as_updates() {
        let at = |name: &str, v: Version| ReleaseTag {
            name: name.to_string(),
            version: v,
        };

        let newer = UpdateInfo {
            current: Version::new(1, 2, 0),
            latest: Some(at("v1.3.0", Version::new(1, 3, 0))),
        };
        assert!(newer.update_available());
        assert!(newer.to_string().starts_with("New version available"));

        let same = UpdateInfo {
            current: Version::new(1, 2, 0),
            latest: Some(at("v1.2.0", Version::new(1, 2, 0))),
        };
        assert!(!same.update_available());

        let unknown = UpdateInfo {
            current: Version::new(1, 2, 0),
            latest: None,
        };
        assert!(!unknown.update_available());
    }
}
