use crate::utils::PLACEHOLDER_PATTERN;
use regex::Captures;
use std::fmt::{self, Display, Formatter};

/// A URL template with `{name}` or positional `{0}` placeholders.
///
/// Each argument is a `(name, value)` pair; its position in the slice is its
/// positional index. Placeholders that match neither are kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn render(&self, args: &[(&str, &str)]) -> String {
        PLACEHOLDER_PATTERN
            .replace_all(&self.0, |caps: &Captures| {
                let key = &caps[1];
                let value = match key.parse::<usize>() {
                    Ok(index) => args.get(index).map(|(_, value)| *value),
                    Err(_) => args
                        .iter()
                        .find(|(name, _)| *name == key)
                        .map(|(_, value)| *value),
                };
                value.map_or_else(|| caps[0].to_string(), str::to_string)
            })
            .into_owned()
    }
}

impl Display for UrlTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UrlTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for UrlTemplate {
    fn from(template: String) -> Self {
        Self(template)
    }
}
