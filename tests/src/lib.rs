//! Helpers for building throwaway git repositories in integration tests.

use std::cell::Cell;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// A repository in a temporary directory, driven through the system `git`
pub struct TestRepo {
    dir: TempDir,
    clock: Cell<u64>,
}

impl TestRepo {
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            clock: Cell::new(1_704_067_200),
        };
        repo.git(&["init", "-q"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Runs git with a fixed identity and a strictly increasing clock so the
    /// log order never depends on timing.
    pub fn git(&self, args: &[&str]) -> String {
        let now = self.clock.get() + 60;
        self.clock.set(now);
        let date = format!("{now} +0000");

        let output = Command::new("git")
            .arg("-C")
            .arg(self.path())
            .args([
                "-c",
                "user.name=Test User",
                "-c",
                "user.email=test@example.com",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "tag.gpgsign=false",
            ])
            .args(args)
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .env("GIT_MERGE_AUTOEDIT", "no")
            .output()
            .expect("Failed to run git");

        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// A regular commit with no file changes.
    pub fn commit(&self, subject: &str, body: &str) {
        let mut args = vec!["commit", "-q", "--allow-empty", "-m", subject];
        if !body.is_empty() {
            args.extend(["-m", body]);
        }
        self.git(&args);
    }

    /// Merges a one-commit branch with the subject and body GitHub writes
    /// for a merged pull request.
    pub fn merge_pull_request(&self, number: u32, title: &str) {
        let branch = format!("feature-{number}");
        let subject = format!("Merge pull request #{number} from acme/{branch}");

        self.git(&["checkout", "-q", "-b", &branch]);
        self.commit(&format!("Work on {title}"), "");
        self.git(&["checkout", "-q", "-"]);
        self.git(&["merge", "-q", "--no-ff", &branch, "-m", &subject, "-m", title]);
    }

    pub fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_pull_request_creates_merge_commit() {
        let repo = TestRepo::new();
        repo.commit("Initial commit", "");
        repo.merge_pull_request(7, "Add feature");

        let log = repo.git(&["log", "-1", "--format=%s%n%b%n%P"]);
        let lines: Vec<&str> = log.lines().collect();

        assert_eq!(lines[0], "Merge pull request #7 from acme/feature-7");
        assert_eq!(lines[1], "Add feature");
        assert_eq!(lines.last().unwrap().split_whitespace().count(), 2);
    }
}
