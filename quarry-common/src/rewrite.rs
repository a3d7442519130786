//! Document id rewriting
//!
//! Backend documents are keyed by an id (often a file path or internal URL).
//! A single pattern/replacement pair turns that id into two display values:
//! - a link target (pattern replaced by the replacement string)
//! - a fallback title (pattern removed)
//!
//! Only the first match is rewritten in both cases.

use regex::Regex;

use crate::{Error, Result};

/// String rewrite capability used by the result presenter
pub trait IdRewrite: Send + Sync {
    /// Rewrite a document id into a display URL
    fn to_url(&self, id: &str) -> String;

    /// Derive a display title from a document id
    fn to_title(&self, id: &str) -> String;
}

/// Regex-backed id rewrite
///
/// The replacement string supports `$1` / `${name}` capture references.
#[derive(Debug, Clone)]
pub struct RegexRewrite {
    pattern: Regex,
    replacement: String,
}

impl RegexRewrite {
    /// Compile a rewrite rule
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the pattern does not compile.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::InvalidInput(format!("Invalid rewrite pattern '{}': {}", pattern, e)))?;

        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }
}

impl IdRewrite for RegexRewrite {
    fn to_url(&self, id: &str) -> String {
        self.pattern
            .replace(id, self.replacement.as_str())
            .into_owned()
    }

    fn to_title(&self, id: &str) -> String {
        self.pattern.replace(id, "").into_owned()
    }
}
