use anyhow::{Context, bail};
use changelog::ChangelogOptions;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Contents of the optional settings file
#[derive(Debug, Default, PartialEq)]
pub struct Settings {
    pub tag_prefix: Option<String>,
    pub changelog: ChangelogOptions,
}

impl Settings {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Parses TOML whose keys are the changelog option names plus `tag-prefix`.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let mut table: toml::Table = toml::from_str(content)?;

        let tag_prefix = match table.remove("tag-prefix") {
            None => None,
            Some(toml::Value::String(prefix)) => Some(prefix),
            Some(other) => bail!("'tag-prefix' must be a string, got {}", other.type_str()),
        };
        let changelog = toml::Value::Table(table).try_into::<ChangelogOptions>()?;

        Ok(Self {
            tag_prefix,
            changelog,
        })
    }
}
