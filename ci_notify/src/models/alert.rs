//! Build alerts — compiler/tool diagnostics attached to a build.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildAlert {
    pub kind: AlertKind,
    /// The diagnostic line as captured from the build log.
    pub text: String,
    pub source_file: Option<String>,
    pub source_line: Option<u32>,
    pub pre_context: Option<String>,
    pub post_context: Option<String>,
}

impl BuildAlert {
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, text)
    }

    fn new(kind: AlertKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            source_file: None,
            source_line: None,
            pre_context: None,
            post_context: None,
        }
    }
}
