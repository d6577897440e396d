use crate::repository::GitRepository;
use changelog::{ChangelogError, ReleaseTagAuthority};
use semver::Version;
use tracing::debug;

/// Release tags named `<prefix><semantic version>`
pub struct TagPersister<'a> {
    repo: &'a GitRepository,
    prefix: String,
}

impl<'a> TagPersister<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self::with_prefix(repo, "")
    }

    pub fn with_prefix<S: Into<String>>(repo: &'a GitRepository, prefix: S) -> Self {
        Self {
            repo,
            prefix: prefix.into(),
        }
    }
}

impl ReleaseTagAuthority for TagPersister<'_> {
    fn current_release_tag(&self) -> changelog::Result<Option<String>> {
        let tags = self
            .repo
            .tag_names()
            .map_err(|err| ChangelogError::ReleaseTag(err.user_message()))?;

        let latest = latest_release_tag(&tags, &self.prefix);
        debug!(prefix = %self.prefix, tags = tags.len(), ?latest, "Resolved release tag");
        Ok(latest)
    }

    fn tag_for_version(&self, version: &str) -> String {
        format!("{}{}", self.prefix, version)
    }
}

/// The tag with the highest semantic version after `prefix`. Tags that do not
/// carry the prefix or a valid version are ignored.
pub fn latest_release_tag<S: AsRef<str>>(tags: &[S], prefix: &str) -> Option<String> {
    tags.iter()
        .map(AsRef::as_ref)
        .filter_map(|tag| {
            let version = Version::parse(tag.strip_prefix(prefix)?).ok()?;
            Some((version, tag))
        })
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, tag)| tag.to_string())
}
