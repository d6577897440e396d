use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GitError, Result};
use crate::log::{LOG_FORMAT, parse_log_output};
use changelog::{ChangelogError, CommitRange, CommitRecord, HistorySource};
use git2::Repository;
use tracing::debug;

/// A repository on disk, read through `git2` and the system `git` binary
pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepository {
    /// Opens the repository containing `path`.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path.as_ref()).map_err(|e| {
            GitError::RepositoryError(format!("Failed to discover git repository: {}", e))
        })?;

        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| GitError::RepositoryError("Bare repositories are not supported".into()))?;

        debug!(workdir = %workdir.display(), "Opened repository");
        Ok(Self { repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Names of all tags in the repository.
    pub fn tag_names(&self) -> Result<Vec<String>> {
        let names = self
            .repo
            .tag_names(None)
            .map_err(|e| GitError::Git2Error(e).with_context("Failed to list tags"))?;

        Ok(names.iter().flatten().map(str::to_string).collect())
    }

    /// Runs `git log` over `revision` and parses subjects and bodies.
    ///
    /// Uses `std::process::Command` so the output matches what `git log`
    /// shows for the same range, merge commits included.
    pub fn log(&self, revision: &str) -> Result<Vec<CommitRecord>> {
        let command = format!("git log {} {}", revision, LOG_FORMAT);
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.workdir)
            .args(["log", revision, LOG_FORMAT])
            .output()
            .map_err(|e| GitError::IoError(e).with_context(format!("Failed to execute {}", command)))?;

        if !output.status.success() {
            let mut diagnostics = String::from_utf8_lossy(&output.stderr).to_string();
            diagnostics.push_str(&String::from_utf8_lossy(&output.stdout));
            return Err(GitError::CommandFailed {
                command,
                diagnostics,
            });
        }

        Ok(parse_log_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl HistorySource for GitRepository {
    fn commits(&self, range: &CommitRange) -> changelog::Result<Vec<CommitRecord>> {
        self.log(&range.revision())
            .map_err(|err| ChangelogError::HistoryAccess {
                range: range.to_string(),
                diagnostics: err.diagnostics(),
            })
    }
}
