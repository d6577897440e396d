use thiserror::Error;

/// Git operation error type that provides detailed context about the error
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git2 error: {0}")]
    Git2Error(#[from] git2::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Failed to execute '{command}': {diagnostics}")]
    CommandFailed {
        command: String,
        diagnostics: String,
    },

    #[error("{0}: {1}")]
    WithContext(String, Box<GitError>),
}

impl GitError {
    /// Add context to an error
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        GitError::WithContext(context.into(), Box::new(self))
    }

    /// Raw output of the failed command, if any
    pub fn diagnostics(&self) -> String {
        match self {
            GitError::CommandFailed { diagnostics, .. } => diagnostics.clone(),
            GitError::WithContext(_, err) => err.diagnostics(),
            other => other.to_string(),
        }
    }

    /// Get a user-friendly message for command line display
    pub fn user_message(&self) -> String {
        match self {
            GitError::Git2Error(e) => {
                let msg = format!("{}", e);
                // Extract just the message without the class and code details
                msg.split(';').next().map_or_else(
                    || format!("Git error: {}", msg),
                    |main_msg| format!("Git error: {}", main_msg.trim()),
                )
            }
            GitError::IoError(e) => format!("I/O error: {}", e),
            GitError::RepositoryError(msg) => format!("Repository error: {}", msg),
            GitError::CommandFailed {
                command,
                diagnostics,
            } => format!("'{}' failed: {}", command, diagnostics.trim()),
            GitError::WithContext(ctx, err) => format!("{}: {}", ctx, err.user_message()),
        }
    }
}

pub type Result<T> = std::result::Result<T, GitError>;
