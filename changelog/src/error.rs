use thiserror::Error;

/// Errors that can occur while generating a changelog entry
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read commit history for range '{range}': {diagnostics}")]
    HistoryAccess { range: String, diagnostics: String },

    #[error("Failed to determine the current release tag: {0}")]
    ReleaseTag(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<ChangelogError>),
}

impl ChangelogError {
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    /// A template that rendering needs was neither set nor derivable.
    #[must_use]
    pub fn missing_template(option: &str, needed_for: &str) -> Self {
        Self::Configuration(format!(
            "option '{option}' is required to render {needed_for}; set it explicitly or set 'repository-identifier'"
        ))
    }

    #[must_use]
    pub fn invalid_pattern(option: &str, pattern: &str, error: &regex::Error) -> Self {
        Self::Configuration(format!(
            "option '{option}' is not a valid regular expression ({pattern}): {error}"
        ))
    }

    /// True for every error caused by the configuration rather than the repository.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::WithContext(_, inner) => inner.is_configuration(),
            _ => false,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(msg) => format!("Invalid changelog configuration: {msg}"),
            Self::HistoryAccess { range, diagnostics } => {
                let diagnostics = diagnostics.trim();
                if diagnostics.is_empty() {
                    format!("Could not read commits in '{range}'")
                } else {
                    format!("Could not read commits in '{range}':\n{diagnostics}")
                }
            }
            Self::ReleaseTag(msg) => format!("Could not determine the last release: {msg}"),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}
