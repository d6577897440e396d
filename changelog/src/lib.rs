//! Generates "Keep a Changelog" entries from merged pull requests.
//!
//! The history and the release tags are read through [`HistorySource`] and
//! [`ReleaseTagAuthority`], so the formatter never talks to git directly.

pub mod config;
pub mod core;
pub mod error;
pub mod extractor;
pub mod formatter;
pub mod history;
pub mod linker;
pub mod position;
pub mod template;
pub mod types;
pub mod utils;

pub use config::{ChangelogOptions, ResolvedConfig, TitleSource};
pub use crate::core::{ChangelogFormatter, PREAMBLE};
pub use error::ChangelogError;
pub use history::{HistorySource, ReleaseTagAuthority};
pub use template::UrlTemplate;
pub use types::{CommitRange, CommitRecord, PullRequest, Result};
