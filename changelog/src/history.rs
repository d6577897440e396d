//! Collaborators the changelog generation depends on.
//!
//! Both are injected into [`crate::ChangelogFormatter`] so tests can swap in
//! fakes and callers can back them with any VCS tooling.

use crate::types::{CommitRange, CommitRecord, Result};

/// Lists commits of a range in the source's native order.
pub trait HistorySource {
    /// Fails with [`crate::ChangelogError::HistoryAccess`] when the query cannot complete.
    fn commits(&self, range: &CommitRange) -> Result<Vec<CommitRecord>>;
}

/// Knows the released tags of the project.
pub trait ReleaseTagAuthority {
    /// The tag of the latest release, or `None` before the first release.
    fn current_release_tag(&self) -> Result<Option<String>>;

    /// The tag name the given version is (or will be) released under.
    fn tag_for_version(&self, version: &str) -> String;
}
